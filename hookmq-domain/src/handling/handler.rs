//! 事件处理器（EventHandler）
//!
//! 对一条已解码事件执行（或委托）领域动作并报告结果：
//! - `Ok(true)`：已处理（包括刻意忽略）；
//! - `Ok(false)`：领域层面的拒绝，但不作为错误抛出；
//! - `Err(HandleError::Consume)`：可恢复失败，请求 Broker 重投；
//! - `Err(HandleError::Unexpected)`：处理器缺陷。
//!
//! 处理器不得持有逐次调用的可变状态，注册表会在多个并发分发中共享同一实例。
//!
use crate::{error::HandleResult, message::DecodedEvent};
use async_trait::async_trait;

#[async_trait]
pub trait EventHandler: Send + Sync {
    /// 处理器名称（用于日志与审计）
    fn handler_name(&self) -> &str;

    /// 处理事件
    async fn handle(&self, event: &DecodedEvent) -> HandleResult<bool>;
}
