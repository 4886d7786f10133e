// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license
//! 日志初始化

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// 默认过滤规则 (RUST_LOG 优先)
fn default_filter(verbose: bool) -> &'static str {
    if verbose {
        "scene_lens=debug,info"
    } else {
        "scene_lens=info,warn"
    }
}

/// 初始化 tracing 订阅者, 重复调用时静默忽略
pub fn init_logging(verbose: bool) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(verbose)));

    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_target(false).compact())
        .try_init();
}
