//! Broker 客户端（MessageBroker）协议
//!
//! 消费循环与底层消息中间件之间的接缝：订阅主题、回报消费结果，
//! 以及在分发入口抛出错误时交由 Broker 客户端自行处置（故障边界）。
//!
use crate::{
    error::{DomainError, DomainResult as Result},
    message::{ConsumeStatus, EventMessage},
};
use async_trait::async_trait;
use futures_core::stream::BoxStream;

#[async_trait]
pub trait MessageBroker: Send + Sync {
    /// 订阅主题，返回一个 'static 生命周期的投递流，便于在 tokio::spawn 中使用
    async fn subscribe(&self, topic: &str) -> Result<BoxStream<'static, Result<EventMessage>>>;

    /// 回报一次投递的消费结果：`Success` 确认，`RetryLater` 请求重投
    async fn complete(&self, message: &EventMessage, status: ConsumeStatus) -> Result<()>;

    /// 分发入口返回错误（解码失败、处理器缺陷）时调用；默认记录后丢弃
    async fn fault(&self, message: &EventMessage, error: &DomainError) -> Result<()> {
        tracing::warn!(
            message_id = message.message_id(),
            %error,
            "dropping message after dispatch error"
        );
        Ok(())
    }
}
