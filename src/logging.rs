// ==========================================
// 日志系统初始化
// ==========================================
// 使用 tracing 和 tracing-subscriber
// 支持环境变量配置日志级别，并同步写入日志文件
// ==========================================

use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// 日志文件路径环境变量（空串表示不写文件）
pub const LOG_FILE_ENV: &str = "LOG_FILE";

/// 默认日志文件
pub const DEFAULT_LOG_FILE: &str = "parser.log";

/// 初始化日志系统
///
/// # 环境变量
/// - RUST_LOG: 日志级别过滤器（默认: info）
///   例如: RUST_LOG=debug 或 RUST_LOG=rental_report_ingest=trace
/// - LOG_FILE: 追加写入的日志文件（默认: parser.log）
///
/// # 示例
/// ```no_run
/// use rental_report_ingest::logging;
/// logging::init();
/// ```
pub fn init() {
    // 从环境变量读取日志级别，默认为 info
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    // 控制台输出
    let console = fmt::layer()
        .with_target(true)
        .with_thread_ids(false)
        .with_line_number(true);

    // 文件输出（无 ANSI 颜色）
    let mut file_error = None;
    let file_layer = log_file_path().and_then(|path| {
        match OpenOptions::new().create(true).append(true).open(&path) {
            Ok(file) => Some(
                fmt::layer()
                    .with_ansi(false)
                    .with_target(true)
                    .with_line_number(true)
                    .with_writer(Mutex::new(file)),
            ),
            Err(e) => {
                file_error = Some((path, e));
                None
            }
        }
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(console)
        .with(file_layer)
        .init();

    if let Some((path, e)) = file_error {
        tracing::warn!(path = %path.display(), error = %e, "日志文件无法打开, 仅输出到控制台");
    }
}

fn log_file_path() -> Option<PathBuf> {
    match std::env::var(LOG_FILE_ENV) {
        Ok(v) if v.trim().is_empty() => None,
        Ok(v) => Some(PathBuf::from(v.trim())),
        Err(_) => Some(PathBuf::from(DEFAULT_LOG_FILE)),
    }
}

/// 初始化测试环境的日志系统
///
/// 使用更详细的日志级别，便于调试
pub fn init_test() {
    let _ = fmt()
        .with_env_filter(EnvFilter::new("debug"))
        .with_test_writer()
        .try_init();
}
