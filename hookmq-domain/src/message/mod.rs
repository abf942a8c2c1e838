//! 消息模型（message）
//!
//! - `EventMessage`：Broker 投递的原始消息（标识 + 字节负载）；
//! - `DecodedEvent`：解码后的结构化事件，携带分类键 `event_type`/`event_name`；
//! - `EventCategory`：系统已知的事件分类及其注册键；
//! - `ConsumeStatus`：回报给 Broker 的消费结果。
//!
pub mod category;
pub mod decoded_event;
pub mod event_message;
pub mod status;

pub use category::EventCategory;
pub use decoded_event::DecodedEvent;
pub use event_message::EventMessage;
pub use status::ConsumeStatus;
