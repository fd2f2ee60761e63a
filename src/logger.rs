use tracing_subscriber::EnvFilter;

/// 初始化日志，默认 info 级别，可通过 `RUST_LOG` 覆盖
pub fn init() {
    init_with_level("info");
}

/// 使用指定的默认级别初始化日志
///
/// 重复调用不会报错（测试中会多次初始化）
pub fn init_with_level(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}
