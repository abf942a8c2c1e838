//! 分类处理器
//!
//! 每个已知事件分类对应一个薄装饰处理器：记录日志并报告成功。
//! 具体领域动作是扩展点，可通过装饰链在其前后组合。
//!
use super::chain::{Decorated, EventAction};
use crate::{
    error::HandleResult,
    message::{DecodedEvent, EventCategory},
};
use async_trait::async_trait;

/// 记录事件并成功返回的分类动作
#[derive(Debug, Clone, Copy)]
pub struct LogEvent {
    category: EventCategory,
}

impl LogEvent {
    pub fn new(category: EventCategory) -> Self {
        Self { category }
    }

    pub fn category(&self) -> EventCategory {
        self.category
    }
}

#[async_trait]
impl EventAction for LogEvent {
    fn action_name(&self) -> &str {
        self.category.key()
    }

    async fn run(&self, event: &DecodedEvent) -> HandleResult<bool> {
        // 合并请求事件以 event_type 标识，其余以 event_name 标识
        let label = match self.category {
            EventCategory::MergeRequest => event.event_type(),
            _ => event.event_name(),
        };
        tracing::info!(handler = %self.category, event = ?label, "handling event");
        Ok(true)
    }
}

/// 分类处理器：无内层的 `LogEvent` 装饰器
pub type CategoryHandler = Decorated<LogEvent>;

pub fn category_handler(category: EventCategory) -> CategoryHandler {
    Decorated::new(LogEvent::new(category))
}
