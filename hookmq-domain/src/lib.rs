//! 事件消息消费核心（hookmq-domain）
//!
//! 从主题接收用户/群组/项目生命周期与仓库推送/合并等事件通知，完成：
//! - 解码（`message`）：原始字节负载 → `DecodedEvent`；
//! - 分类与解析（`handling`）：按 `event_type` → `event_name` → 兜底的顺序选出处理器；
//! - 处理器协议与装饰链（`handling`）：AND 语义的线性链，外加两个哨兵处理器；
//! - 消费循环（`consuming`）：执行处理器并将结果映射为 `SUCCESS`/`RETRY_LATER`。
//!
//! 底层 Broker 连接、配置加载与日志初始化属于外部基础设施，
//! 本 crate 仅通过 `MessageBroker` 接口与之交互。
//!
//! 典型用法：
//! 1. 启动时以 `HandlerRegistry::standard()` 构建只读注册表；
//! 2. 以 `Consumer::builder()` 组装 Broker、注册表与主题；
//! 3. 调用 `Consumer::start` 获得 `ConsumerHandle`，关闭时 `shutdown` + `join`。
//!
#[cfg(feature = "consuming")]
pub mod consuming;
pub mod error;
pub mod handling;
pub mod message;
