//! 哨兵处理器
//!
//! 行为与输入无关的两个固定处理器：
//! - `NoOpHandler`：刻意忽略的事件，恒返回 `true`，无副作用；
//! - `UnknownEventHandler`：无法分类的事件，记录分类键后恒返回 `false`。
//!   仅作为注册表的兜底返回，不以任何键注册。
//!
use super::EventHandler;
use crate::{error::HandleResult, message::DecodedEvent};
use async_trait::async_trait;

#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpHandler;

#[async_trait]
impl EventHandler for NoOpHandler {
    fn handler_name(&self) -> &str {
        "noop"
    }

    async fn handle(&self, _event: &DecodedEvent) -> HandleResult<bool> {
        Ok(true)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct UnknownEventHandler;

#[async_trait]
impl EventHandler for UnknownEventHandler {
    fn handler_name(&self) -> &str {
        "unknown"
    }

    async fn handle(&self, event: &DecodedEvent) -> HandleResult<bool> {
        tracing::error!(
            event_type = ?event.event_type(),
            event_name = ?event.event_name(),
            "unknown event"
        );
        Ok(false)
    }
}
