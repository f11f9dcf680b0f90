//! 可观测性模块
//!
//! 提供应用指标和结构化日志初始化。

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::config::config::LoggingConfig;

// ===== Simple Metrics (using atomics for zero-dep implementation) =====

/// 应用指标
#[derive(Clone, Default)]
pub struct AppMetrics {
    pub discover_requests_total: Arc<AtomicU64>,
    pub launch_requests_total: Arc<AtomicU64>,
    pub components_created_total: Arc<AtomicU64>,
    pub thumbnails_assigned_total: Arc<AtomicU64>,
    pub import_failures_total: Arc<AtomicU64>,
}

impl AppMetrics {
    /// 记录 discover 请求
    pub fn record_discover_request(&self) {
        self.discover_requests_total.fetch_add(1, Ordering::SeqCst);
    }

    /// 记录 launch 请求
    pub fn record_launch_request(&self) {
        self.launch_requests_total.fetch_add(1, Ordering::SeqCst);
    }

    /// 记录组件创建
    pub fn record_component_created(&self) {
        self.components_created_total.fetch_add(1, Ordering::SeqCst);
    }

    /// 记录缩略图赋值
    pub fn record_thumbnail_assigned(&self) {
        self.thumbnails_assigned_total.fetch_add(1, Ordering::SeqCst);
    }

    /// 记录导入失败
    pub fn record_import_failure(&self) {
        self.import_failures_total.fetch_add(1, Ordering::SeqCst);
    }

    /// 生成 Prometheus 格式指标
    pub fn gather(&self) -> String {
        format!(
            r#"# HELP discover_requests_total Total discover requests handled
# TYPE discover_requests_total counter
discover_requests_total {}
# HELP launch_requests_total Total launch requests handled
# TYPE launch_requests_total counter
launch_requests_total {}
# HELP components_created_total Total thumbnail components created
# TYPE components_created_total counter
components_created_total {}
# HELP thumbnails_assigned_total Total thumbnail references assigned
# TYPE thumbnails_assigned_total counter
thumbnails_assigned_total {}
# HELP import_failures_total Total failed import runs
# TYPE import_failures_total counter
import_failures_total {}
"#,
            self.discover_requests_total.load(Ordering::SeqCst),
            self.launch_requests_total.load(Ordering::SeqCst),
            self.components_created_total.load(Ordering::SeqCst),
            self.thumbnails_assigned_total.load(Ordering::SeqCst),
            self.import_failures_total.load(Ordering::SeqCst),
        )
    }
}

// ===== Structured Logging =====

/// 初始化结构化日志
///
/// 配置了 log_dir 时写入按天滚动的日志文件，返回的 guard 在进程存活期间
/// 必须持有。
pub fn init_tracing(
    service_name: &str,
    config: &LoggingConfig,
) -> Option<tracing_appender::non_blocking::WorkerGuard> {
    let level = if config.level.is_empty() {
        "info"
    } else {
        config.level.as_str()
    };
    let env_filter =
        std::env::var("RUST_LOG").unwrap_or_else(|_| format!("{},{}={}", level, service_name, level));

    match &config.log_dir {
        Some(dir) => {
            let file_appender = tracing_appender::rolling::daily(dir, "thumbsync.log");
            let (writer, guard) = tracing_appender::non_blocking(file_appender);

            if config.structured {
                let subscriber = tracing_subscriber::fmt()
                    .json()
                    .with_env_filter(env_filter)
                    .with_writer(writer)
                    .finish();
                tracing::subscriber::set_global_default(subscriber)
                    .expect("Failed to set tracing subscriber");
            } else {
                let subscriber = tracing_subscriber::fmt()
                    .with_env_filter(env_filter)
                    .with_target(true)
                    .with_writer(writer)
                    .finish();
                tracing::subscriber::set_global_default(subscriber)
                    .expect("Failed to set tracing subscriber");
            }

            Some(guard)
        }
        None => {
            let subscriber = tracing_subscriber::fmt()
                .with_env_filter(env_filter)
                .with_target(true)
                .with_line_number(true)
                .finish();
            tracing::subscriber::set_global_default(subscriber)
                .expect("Failed to set tracing subscriber");

            None
        }
    }
}
