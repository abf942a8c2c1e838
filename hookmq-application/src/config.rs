//! 应用配置（AppConfig）
//!
//! 启动时读取一次、此后不可变。合并顺序（后者覆盖前者）：
//! 1. 内置默认值；
//! 2. TOML 配置文件（可选）；
//! 3. 环境变量 `HOOKMQ_*`；
//! 4. 命令行参数。
//!
//! 合并完成后统一校验。
//!
//! ```toml
//! [broker]
//! group_id = "scm-consumer"
//! name_server_ip = "10.0.0.8"
//! name_server_port = 9876
//! topic = "scm_events"
//!
//! [consumer]
//! orderly = true
//!
//! [dev]
//! dev_mode = false
//! ```
use crate::error::{AppError, AppResult};
use hookmq_domain::consuming::{ConsumerConfig, DEFAULT_MAX_RECONSUME_TIMES};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub broker: BrokerConfig,
    pub consumer: ConsumerSection,
    pub dev: DevConfig,
}

/// Broker 连接与订阅
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BrokerConfig {
    /// 消费组
    pub group_id: String,
    /// NameServer 地址
    pub name_server_ip: String,
    pub name_server_port: u16,
    /// 订阅主题
    pub topic: String,
}

impl Default for BrokerConfig {
    fn default() -> Self {
        Self {
            group_id: String::new(),
            name_server_ip: "127.0.0.1".to_string(),
            name_server_port: 9876,
            topic: String::new(),
        }
    }
}

/// 消费循环
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsumerSection {
    /// 顺序消费：同一时刻只处理一条消息
    pub orderly: bool,
    /// 非顺序消费时的并发数
    pub concurrency: usize,
    /// 超过后 Broker 不再重投
    pub max_reconsume_times: u32,
}

impl Default for ConsumerSection {
    fn default() -> Self {
        Self {
            orderly: true,
            concurrency: 8,
            max_reconsume_times: DEFAULT_MAX_RECONSUME_TIMES,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DevConfig {
    pub dev_mode: bool,
}

/// 命令行覆盖项
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub topic: Option<String>,
    pub concurrency: Option<usize>,
    pub dev_mode: Option<bool>,
}

impl AppConfig {
    /// 按默认值 → 文件 → 环境变量 → 命令行的顺序合并并校验
    pub fn load(path: Option<&Path>, overrides: ConfigOverrides) -> AppResult<Self> {
        let mut config = match path {
            Some(path) => Self::from_toml_file(path)?,
            None => Self::default(),
        };
        config.apply_env(|key| std::env::var(key).ok())?;
        config.apply_overrides(overrides);
        config.validate()?;
        Ok(config)
    }

    pub fn from_toml_file(path: &Path) -> AppResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            AppError::Config(format!("failed to read {}: {e}", path.display()))
        })?;
        Self::from_toml_str(&text)
    }

    pub fn from_toml_str(text: &str) -> AppResult<Self> {
        Ok(toml::from_str(text)?)
    }

    /// 应用 `HOOKMQ_*` 环境变量；`lookup` 便于测试注入
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) -> AppResult<()> {
        if let Some(v) = lookup("HOOKMQ_GROUP_ID") {
            self.broker.group_id = v;
        }
        if let Some(v) = lookup("HOOKMQ_NAME_SERVER_IP") {
            self.broker.name_server_ip = v;
        }
        if let Some(v) = lookup("HOOKMQ_NAME_SERVER_PORT") {
            self.broker.name_server_port = v.parse().map_err(|e| {
                AppError::Config(format!("HOOKMQ_NAME_SERVER_PORT={v}: {e}"))
            })?;
        }
        if let Some(v) = lookup("HOOKMQ_TOPIC") {
            self.broker.topic = v;
        }
        if let Some(v) = lookup("HOOKMQ_DEV_MODE") {
            self.dev.dev_mode = v
                .parse()
                .map_err(|e| AppError::Config(format!("HOOKMQ_DEV_MODE={v}: {e}")))?;
        }
        Ok(())
    }

    pub fn apply_overrides(&mut self, overrides: ConfigOverrides) {
        if let Some(topic) = overrides.topic {
            self.broker.topic = topic;
        }
        if let Some(concurrency) = overrides.concurrency {
            self.consumer.orderly = false;
            self.consumer.concurrency = concurrency;
        }
        if let Some(dev_mode) = overrides.dev_mode {
            self.dev.dev_mode = dev_mode;
        }
    }

    pub fn validate(&self) -> AppResult<()> {
        let broker = &self.broker;
        if broker.group_id.trim().is_empty() {
            return Err(AppError::Config("broker.group_id must be set".into()));
        }
        if broker.name_server_ip.trim().is_empty() {
            return Err(AppError::Config("broker.name_server_ip must be set".into()));
        }
        if broker.name_server_port == 0 {
            return Err(AppError::Config("broker.name_server_port must be non-zero".into()));
        }
        if broker.topic.trim().is_empty() {
            return Err(AppError::Config("broker.topic must be set".into()));
        }
        if !self.consumer.orderly && self.consumer.concurrency == 0 {
            return Err(AppError::Config("consumer.concurrency must be positive".into()));
        }
        Ok(())
    }

    pub fn name_server_address(&self) -> String {
        format!(
            "{}:{}",
            self.broker.name_server_ip, self.broker.name_server_port
        )
    }

    pub fn consumer_config(&self) -> ConsumerConfig {
        if self.consumer.orderly {
            ConsumerConfig::orderly()
        } else {
            ConsumerConfig::concurrent(self.consumer.concurrency)
        }
    }
}
