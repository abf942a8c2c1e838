//! 内存版 Broker（InMemoryBroker）
//!
//! 基于 `tokio::sync::mpsc` 的按主题 FIFO 队列，满足 `MessageBroker` 协议：
//! - `publish`：生成消息标识（uuid v4）并入队；
//! - `subscribe`：每个主题仅允许一个订阅者，返回 'static 投递流；
//! - `complete`：记录结果；`RetryLater` 时以相同标识、递增的重投次数重新入队，
//!   超过 `max_reconsume_times` 后转入死信；
//! - `fault`：直接转入死信。
//!
//! 典型用途：测试环境与本地开发（回放文件中的消息）。

use crate::consuming::MessageBroker;
use crate::error::{DomainError, DomainResult as Result};
use crate::message::{ConsumeStatus, EventMessage};
use async_trait::async_trait;
use dashmap::DashMap;
use futures_core::stream::BoxStream;
use futures_util::StreamExt;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio_stream::wrappers::UnboundedReceiverStream;
use uuid::Uuid;

/// 与 RocketMQ 默认的最大重投次数保持一致
pub const DEFAULT_MAX_RECONSUME_TIMES: u32 = 16;

struct TopicQueue {
    tx: mpsc::UnboundedSender<EventMessage>,
    rx: Option<mpsc::UnboundedReceiver<EventMessage>>,
}

impl TopicQueue {
    fn new() -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self { tx, rx: Some(rx) }
    }
}

#[derive(Clone)]
pub struct InMemoryBroker {
    topics: Arc<DashMap<String, TopicQueue>>,
    outcomes: Arc<DashMap<String, Vec<ConsumeStatus>>>,
    dead_letters: Arc<DashMap<String, EventMessage>>,
    max_reconsume_times: u32,
}

impl Default for InMemoryBroker {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_RECONSUME_TIMES)
    }
}

impl InMemoryBroker {
    pub fn new(max_reconsume_times: u32) -> Self {
        Self {
            topics: Arc::new(DashMap::new()),
            outcomes: Arc::new(DashMap::new()),
            dead_letters: Arc::new(DashMap::new()),
            max_reconsume_times,
        }
    }

    /// 发布一条消息，返回生成的消息标识
    pub fn publish(&self, topic: &str, body: impl Into<Vec<u8>>) -> Result<String> {
        let message = EventMessage::builder()
            .message_id(Uuid::new_v4().to_string())
            .topic(topic)
            .body(body)
            .build();
        let id = message.message_id().to_string();
        self.enqueue(message)?;
        Ok(id)
    }

    fn enqueue(&self, message: EventMessage) -> Result<()> {
        let tx = self
            .topics
            .entry(message.topic().to_string())
            .or_insert_with(TopicQueue::new)
            .tx
            .clone();
        tx.send(message)
            .map_err(|e| DomainError::broker(format!("topic closed: {}", e.0.topic())))
    }

    fn dead_letter(&self, message: &EventMessage) {
        self.dead_letters
            .insert(message.message_id().to_string(), message.clone());
    }

    /// 某条消息历次投递的消费结果
    pub fn outcomes(&self, message_id: &str) -> Vec<ConsumeStatus> {
        self.outcomes
            .get(message_id)
            .map(|o| o.value().clone())
            .unwrap_or_default()
    }

    pub fn dead_letters(&self) -> Vec<EventMessage> {
        self.dead_letters.iter().map(|e| e.value().clone()).collect()
    }

    pub fn is_dead_lettered(&self, message_id: &str) -> bool {
        self.dead_letters.contains_key(message_id)
    }

    pub fn max_reconsume_times(&self) -> u32 {
        self.max_reconsume_times
    }
}

#[async_trait]
impl MessageBroker for InMemoryBroker {
    async fn subscribe(&self, topic: &str) -> Result<BoxStream<'static, Result<EventMessage>>> {
        let rx = self
            .topics
            .entry(topic.to_string())
            .or_insert_with(TopicQueue::new)
            .rx
            .take()
            .ok_or_else(|| DomainError::broker(format!("topic already subscribed: {topic}")))?;

        Ok(Box::pin(UnboundedReceiverStream::new(rx).map(Ok)))
    }

    async fn complete(&self, message: &EventMessage, status: ConsumeStatus) -> Result<()> {
        self.outcomes
            .entry(message.message_id().to_string())
            .or_default()
            .push(status);

        match status {
            ConsumeStatus::Success => Ok(()),
            ConsumeStatus::RetryLater if message.reconsume_times() < self.max_reconsume_times => {
                self.enqueue(message.redelivery())
            }
            ConsumeStatus::RetryLater => {
                tracing::warn!(
                    message_id = message.message_id(),
                    reconsume_times = message.reconsume_times(),
                    "max reconsume times reached, dead-lettering"
                );
                self.dead_letter(message);
                Ok(())
            }
        }
    }

    async fn fault(&self, message: &EventMessage, error: &DomainError) -> Result<()> {
        tracing::warn!(
            message_id = message.message_id(),
            %error,
            "dead-lettering message after dispatch error"
        );
        self.dead_letter(message);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn publish_then_subscribe_delivers_in_order() {
        let broker = InMemoryBroker::default();
        let a = broker.publish("t", "a").unwrap();
        let b = broker.publish("t", "b").unwrap();

        let mut stream = broker.subscribe("t").await.unwrap();
        assert_eq!(stream.next().await.unwrap().unwrap().message_id(), a);
        assert_eq!(stream.next().await.unwrap().unwrap().message_id(), b);
    }

    #[tokio::test]
    async fn second_subscriber_is_rejected() {
        let broker = InMemoryBroker::default();
        let _first = broker.subscribe("t").await.unwrap();
        assert!(matches!(
            broker.subscribe("t").await,
            Err(DomainError::Broker { .. })
        ));
    }

    #[tokio::test]
    async fn retry_later_redelivers_same_id_until_cap() {
        let broker = InMemoryBroker::new(1);
        let id = broker.publish("t", "x").unwrap();
        let mut stream = broker.subscribe("t").await.unwrap();

        let first = stream.next().await.unwrap().unwrap();
        broker
            .complete(&first, ConsumeStatus::RetryLater)
            .await
            .unwrap();

        let second = stream.next().await.unwrap().unwrap();
        assert_eq!(second.message_id(), id);
        assert_eq!(second.reconsume_times(), 1);

        broker
            .complete(&second, ConsumeStatus::RetryLater)
            .await
            .unwrap();
        assert!(broker.is_dead_lettered(&id));
        assert_eq!(
            broker.outcomes(&id),
            vec![ConsumeStatus::RetryLater, ConsumeStatus::RetryLater]
        );
    }

    #[tokio::test]
    async fn fault_dead_letters() {
        let broker = InMemoryBroker::default();
        let id = broker.publish("t", "nope").unwrap();
        let mut stream = broker.subscribe("t").await.unwrap();
        let msg = stream.next().await.unwrap().unwrap();

        broker
            .fault(&msg, &DomainError::broker("boom"))
            .await
            .unwrap();

        assert!(broker.is_dead_lettered(&id));
        assert!(broker.outcomes(&id).is_empty());
    }
}
