use tracing_subscriber::EnvFilter;

/// 初始化 tracing：`RUST_LOG` 优先，缺省为 `info`
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}
