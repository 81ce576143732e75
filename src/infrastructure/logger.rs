//! 日志基础设施

use std::io;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::{non_blocking, rolling};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::config::LoggingConfig;

pub struct Logger;

impl Logger {
    /// 初始化日志系统
    ///
    /// - 按日期分割的文件日志（非阻塞写入）
    /// - 可选的彩色控制台输出
    /// - 日志级别取自配置，设置了 `RUST_LOG` 时以环境变量为准
    ///
    /// 返回的 guard 需要在进程生命周期内持有，drop 时会刷新剩余日志。
    pub fn init(config: &LoggingConfig) -> anyhow::Result<WorkerGuard> {
        std::fs::create_dir_all(&config.log_path)?;

        let file_appender = rolling::daily(&config.log_path, &config.file_prefix);
        let (non_blocking, guard) = non_blocking(file_appender);

        let filter = EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new(&config.level))?;

        let console_layer = config
            .console_output
            .then(|| fmt::layer().with_writer(io::stdout).with_ansi(true).boxed());

        tracing_subscriber::registry()
            .with(filter)
            .with(
                // 文件日志层
                fmt::layer()
                    .with_writer(non_blocking)
                    .with_ansi(false)
                    .with_target(false)
                    .with_thread_names(true),
            )
            .with(console_layer)
            .try_init()?;

        Ok(guard)
    }
}
