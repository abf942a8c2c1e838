//! 消费循环（Consumer）
//!
//! 将 Broker 的一次投递桥接为一次分发结果：
//! `RECEIVED → DECODED → DISPATCHED → {SUCCESS, RETRY_LATER}`
//! - 解码失败：作为错误从分发入口抛出，不产生消费结果；
//! - 处理器正常返回（无论 `true`/`false`）：`SUCCESS`，布尔值仅记录日志；
//! - 处理器返回 `HandleError::Consume`：`RETRY_LATER`，由 Broker 重投；
//! - 处理器缺陷（`HandleError::Unexpected`）：作为 `DomainError::EventHandler` 抛出。
//!
//! 循环本身不做任何重试；逐条消息可重入，消息之间仅共享只读注册表。
//!
use super::MessageBroker;
use crate::{
    error::{DomainError, DomainResult, HandleError},
    handling::HandlerRegistry,
    message::{ConsumeStatus, DecodedEvent, EventMessage},
};
use bon::Builder;
use futures_util::{StreamExt, future::join_all};
use std::future::Future;
use std::sync::Arc;
use tokio::task::{JoinError, JoinHandle};
use tokio_util::sync::CancellationToken;

#[derive(Builder)]
pub struct Consumer {
    broker: Arc<dyn MessageBroker>,
    registry: Arc<HandlerRegistry>,
    #[builder(into)]
    topic: String,
    #[builder(default)]
    config: ConsumerConfig,
}

impl Consumer {
    pub fn topic(&self) -> &str {
        &self.topic
    }

    pub fn registry(&self) -> &HandlerRegistry {
        &self.registry
    }

    /// 分发入口：可在多个并发上下文中同时调用
    pub async fn dispatch(&self, message: &EventMessage) -> DomainResult<ConsumeStatus> {
        let message_id = message.message_id();
        tracing::info!(message_id, reconsume_times = message.reconsume_times(), "consume message");
        tracing::debug!(message_id, body = %message.body_lossy(), "message body");

        let event = DecodedEvent::decode(message.body()).map_err(|source| DomainError::Decode {
            message_id: message_id.to_string(),
            source,
        })?;

        let handler = self.registry.resolve_event(&event);
        let handler_name = handler.handler_name();
        tracing::info!(message_id, handler = handler_name, "using handler");

        match handler.handle(&event).await {
            Ok(handled) => {
                if !handled {
                    tracing::warn!(
                        message_id,
                        handler = handler_name,
                        event_type = ?event.event_type(),
                        event_name = ?event.event_name(),
                        "event declined by handler"
                    );
                }
                Ok(ConsumeStatus::Success)
            }
            Err(HandleError::Consume { reason }) => {
                tracing::error!(
                    message_id,
                    handler = handler_name,
                    event_type = ?event.event_type(),
                    event_name = ?event.event_name(),
                    %reason,
                    "failed to handle message"
                );
                Ok(ConsumeStatus::RetryLater)
            }
            Err(HandleError::Unexpected(err)) => Err(DomainError::EventHandler {
                handler: handler_name.to_string(),
                reason: format!("{err:#}"),
            }),
        }
    }

    /// 启动订阅，返回可用于关闭/等待的句柄
    pub fn start(self: Arc<Self>) -> ConsumerHandle {
        let token = CancellationToken::new();
        let task = tokio::spawn(Self::subscribe_loop(self, token.clone()));

        ConsumerHandle {
            token,
            tasks: vec![task],
        }
    }

    async fn subscribe_loop(self: Arc<Self>, token: CancellationToken) -> DomainResult<()> {
        let stream = self.broker.subscribe(&self.topic).await?;
        let concurrency = self.config.concurrency.max(1);
        tracing::info!(topic = %self.topic, concurrency, "subscribed to topic");

        // 取消后不再接收新投递，已在处理中的消息会执行完毕
        stream
            .take_until(token.cancelled_owned())
            .for_each_concurrent(Some(concurrency), |delivery| {
                let this = self.clone();
                async move {
                    match delivery {
                        Ok(message) => this.consume(message).await,
                        Err(err) => tracing::warn!(%err, "broker delivery error"),
                    }
                }
            })
            .await;

        tracing::info!(topic = %self.topic, "consumer stopped");
        Ok(())
    }

    async fn consume(&self, message: EventMessage) {
        let reported = match self.dispatch(&message).await {
            Ok(status) => {
                tracing::info!(message_id = message.message_id(), %status, "message consumed");
                self.broker.complete(&message, status).await
            }
            Err(err) => {
                tracing::error!(
                    message_id = message.message_id(),
                    %err,
                    cause = ?std::error::Error::source(&err).map(ToString::to_string),
                    "dispatch failed"
                );
                self.broker.fault(&message, &err).await
            }
        };

        if let Err(err) = reported {
            tracing::error!(message_id = message.message_id(), %err, "broker call failed");
        }
    }
}

/// 消费循环配置
#[derive(Clone, Copy, Debug)]
pub struct ConsumerConfig {
    /// 同时处理的投递数；1 表示顺序消费
    pub concurrency: usize,
}

impl ConsumerConfig {
    pub fn orderly() -> Self {
        Self { concurrency: 1 }
    }

    pub fn concurrent(concurrency: usize) -> Self {
        Self {
            concurrency: concurrency.max(1),
        }
    }

    pub fn is_orderly(&self) -> bool {
        self.concurrency <= 1
    }
}

impl Default for ConsumerConfig {
    fn default() -> Self {
        Self::orderly()
    }
}

/// 消费循环运行句柄：用于优雅关闭与等待任务结束
pub struct ConsumerHandle {
    token: CancellationToken,
    tasks: Vec<JoinHandle<DomainResult<()>>>,
}

impl ConsumerHandle {
    /// 停止接收新投递
    pub fn shutdown(&self) {
        self.token.cancel();
    }

    /// 等待订阅任务结束（含处理中的消息）
    pub async fn join(mut self) -> DomainResult<()> {
        let tasks = std::mem::take(&mut self.tasks);
        collect(join_all(tasks).await)
    }

    /// 运行直到 `signal` 完成后关闭并等待；订阅任务提前结束（如订阅失败）时立即返回其结果
    pub async fn run_until(mut self, signal: impl Future<Output = ()>) -> DomainResult<()> {
        let tasks = join_all(std::mem::take(&mut self.tasks));
        tokio::pin!(tasks);

        tokio::select! {
            results = &mut tasks => return collect(results),
            _ = signal => {}
        }

        self.shutdown();
        collect(tasks.await)
    }
}

fn collect(results: Vec<Result<DomainResult<()>, JoinError>>) -> DomainResult<()> {
    for r in results {
        r.map_err(|e| DomainError::Task {
            reason: e.to_string(),
        })??;
    }
    Ok(())
}

impl Drop for ConsumerHandle {
    fn drop(&mut self) {
        self.shutdown();
    }
}
