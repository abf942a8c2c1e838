//! 处理子系统（handling）
//!
//! - `EventHandler`：处理一条已解码事件的统一协议；
//! - `Decorated`/`EventAction`：最多包裹一个内层处理器的装饰链，AND 语义否决；
//! - `NoOpHandler`/`UnknownEventHandler`：哨兵处理器；
//! - `CategoryHandler`：每个已知分类一个的薄装饰处理器；
//! - `HandlerRegistry`：启动时构建一次的只读注册表与解析算法。
//!
pub mod category;
pub mod chain;
pub mod handler;
pub mod registry;
pub mod sentinel;

pub use category::{CategoryHandler, LogEvent, category_handler};
pub use chain::{Decorated, EventAction, Passthrough};
pub use handler::EventHandler;
pub use registry::{HandlerRegistry, HandlerRegistryBuilder, Route};
pub use sentinel::{NoOpHandler, UnknownEventHandler};
