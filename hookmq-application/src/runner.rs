//! 运行器（Runner）
//!
//! 在进程入口构建一次，显式持有消费循环：记录运行模式与连接信息，
//! 启动订阅，等待关闭信号后停止接收新投递，并等待处理中的消息完成。
//!
use crate::{config::AppConfig, error::AppResult};
use hookmq_domain::consuming::{Consumer, MessageBroker};
use hookmq_domain::handling::HandlerRegistry;
use std::future::Future;
use std::sync::Arc;

pub struct Runner {
    config: AppConfig,
    consumer: Arc<Consumer>,
}

impl Runner {
    /// 以标准注册表组装消费循环
    pub fn new(config: AppConfig, broker: Arc<dyn MessageBroker>) -> Self {
        Self::with_registry(config, broker, HandlerRegistry::standard())
    }

    pub fn with_registry(
        config: AppConfig,
        broker: Arc<dyn MessageBroker>,
        registry: HandlerRegistry,
    ) -> Self {
        let consumer = Consumer::builder()
            .broker(broker)
            .registry(Arc::new(registry))
            .topic(config.broker.topic.clone())
            .config(config.consumer_config())
            .build();

        Self {
            config,
            consumer: Arc::new(consumer),
        }
    }

    pub fn consumer(&self) -> &Arc<Consumer> {
        &self.consumer
    }

    pub async fn run(self, shutdown: impl Future<Output = ()>) -> AppResult<()> {
        tracing::info!(
            dev_mode = self.config.dev.dev_mode,
            "program is running in development mode: {}",
            self.config.dev.dev_mode
        );
        tracing::info!(topic = %self.config.broker.topic, "subscribe to topic");
        tracing::info!(
            address = %self.config.name_server_address(),
            group_id = %self.config.broker.group_id,
            "configured name server"
        );

        // 订阅失败时不等待关闭信号，直接返回错误
        self.consumer
            .clone()
            .start()
            .run_until(async {
                shutdown.await;
                tracing::info!("shutting down consumer");
            })
            .await?;
        Ok(())
    }
}
