//! 消费核心统一错误定义
//!
//! 聚焦解码、处理器边界、Broker 交互与注册表构建的最小必要集合：
//! - `DomainError`：分发入口向外抛出的错误（解码失败、处理器缺陷等）；
//! - `HandleError`：处理器边界上的错误，其中 `Consume` 为唯一被消费循环捕获、
//!   并转换为 `RETRY_LATER` 的领域异常；
//! - `DecodeError`：消息体解码失败的具体原因。
//!
use thiserror::Error;

/// 统一错误类型（消费核心最小必要集）
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum DomainError {
    // --- 解码 ---
    #[error("decode failed: message={message_id}")]
    Decode {
        message_id: String,
        #[source]
        source: DecodeError,
    },

    // --- 处理器 ---
    #[error("event handler error: handler={handler}, reason={reason}")]
    EventHandler { handler: String, reason: String },

    // --- Broker ---
    #[error("broker error: {reason}")]
    Broker { reason: String },
    #[error("consumer task failed: {reason}")]
    Task { reason: String },

    // --- 注册表 ---
    #[error("handler already registered: key={key}")]
    AlreadyRegistered { key: String },
    #[error("invalid value: {reason}")]
    InvalidValue { reason: String },
}

impl DomainError {
    pub fn broker(reason: impl Into<String>) -> Self {
        Self::Broker {
            reason: reason.into(),
        }
    }

    pub fn invalid_value(reason: impl Into<String>) -> Self {
        Self::InvalidValue {
            reason: reason.into(),
        }
    }
}

/// 统一 Result 类型别名
pub type DomainResult<T> = Result<T, DomainError>;

/// 消息体解码失败原因
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("payload is not valid utf-8: {0}")]
    Utf8(#[from] std::str::Utf8Error),
    #[error("payload is not a json object: {0}")]
    Json(#[from] serde_json::Error),
}

/// 处理器边界错误
#[derive(Debug, Error)]
pub enum HandleError {
    /// 可恢复的领域失败：消费循环捕获后返回 `RETRY_LATER`，交由 Broker 重投
    #[error("consume failed: {reason}")]
    Consume { reason: String },
    /// 处理器缺陷：不被消费循环吞掉，作为 `DomainError::EventHandler` 向外抛出
    #[error(transparent)]
    Unexpected(#[from] anyhow::Error),
}

impl HandleError {
    pub fn consume(reason: impl Into<String>) -> Self {
        Self::Consume {
            reason: reason.into(),
        }
    }

    /// 是否为需要 Broker 重投的领域异常
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Consume { .. })
    }
}

/// 处理器 Result 类型别名
pub type HandleResult<T> = Result<T, HandleError>;
