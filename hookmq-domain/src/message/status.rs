use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// 消费结果：Broker 据此决定确认还是重投
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConsumeStatus {
    /// 确认消费
    Success,
    /// 请求稍后重投
    RetryLater,
}

impl Display for ConsumeStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Success => write!(f, "SUCCESS"),
            Self::RetryLater => write!(f, "RETRY_LATER"),
        }
    }
}
