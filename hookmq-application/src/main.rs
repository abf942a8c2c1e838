use clap::Parser;
use hookmq_application::config::{AppConfig, ConfigOverrides};
use hookmq_application::{AppResult, Runner, replay, telemetry};
use hookmq_domain::consuming::InMemoryBroker;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

#[derive(Parser, Debug)]
#[command(name = "hookmq", about = "Consume SCM event notifications from a message queue")]
struct Args {
    /// TOML 配置文件路径
    #[arg(long)]
    config: Option<PathBuf>,

    /// 覆盖订阅主题
    #[arg(long)]
    topic: Option<String>,

    /// 以指定并发数非顺序消费
    #[arg(long)]
    concurrency: Option<usize>,

    /// 开启开发模式
    #[arg(long)]
    dev: bool,

    /// 启动前将文件中每行 JSON 作为一条消息发布（本地开发）
    #[arg(long)]
    replay: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> ExitCode {
    telemetry::init_tracing();
    let args = Args::parse();

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(%err, "an error occurred");
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> AppResult<()> {
    let overrides = ConfigOverrides {
        topic: args.topic,
        concurrency: args.concurrency,
        dev_mode: args.dev.then_some(true),
    };
    let config = AppConfig::load(args.config.as_deref(), overrides)?;

    let broker = Arc::new(InMemoryBroker::new(config.consumer.max_reconsume_times));
    if let Some(path) = &args.replay {
        let count = replay::replay_file(&broker, &config.broker.topic, path).await?;
        tracing::info!(count, path = %path.display(), "replayed messages");
    }

    Runner::new(config, broker).run(shutdown_signal()).await
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(%err, "failed to listen for shutdown signal");
    }
}
