//! 消费子系统（consuming）
//!
//! 提供订阅与分发的运行时：
//! - `MessageBroker`：订阅主题、回报消费结果与故障处置的统一接口；
//! - `InMemoryBroker`：按主题的内存队列实现，支持重投与死信；
//! - `Consumer`：解码 → 解析处理器 → 执行 → 映射消费结果的消费循环；
//! - `ConsumerHandle`：停止接收新投递并等待处理中的消息完成。
//!
//! 该模块不绑定具体传输实现，可对接任意消息中间件客户端。
//!
pub mod broker;
pub mod broker_inmemory;
pub mod consumer;

pub use broker::MessageBroker;
pub use broker_inmemory::{DEFAULT_MAX_RECONSUME_TIMES, InMemoryBroker};
pub use consumer::{Consumer, ConsumerConfig, ConsumerHandle};
