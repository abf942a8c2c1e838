//! 应用层（hookmq-application）
//!
//! 围绕消费核心的外部基础设施：配置加载、日志初始化、运行器与本地回放。
//!
pub mod config;
pub mod error;
pub mod replay;
pub mod runner;
pub mod telemetry;

pub use config::AppConfig;
pub use error::{AppError, AppResult};
pub use runner::Runner;
