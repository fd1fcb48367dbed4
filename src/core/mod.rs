//! Core logger types

pub mod buffer_pool;
pub mod caller;
pub mod config;
pub mod error;
pub mod flush_daemon;
pub mod format;
pub mod log_level;
pub mod logger;
pub mod metrics;
pub mod timestamp;

pub use buffer_pool::{BufferPool, PooledBuffer};
pub use caller::{CallerInfo, CallerResolver, ANONYMOUS};
pub use config::{Colors, Config, Rgb, DEFAULT_FOLDER_NAME, DEFAULT_FORMAT_PREFIX};
pub use error::{LoggerError, Result};
pub use flush_daemon::{FlushDaemon, DEFAULT_FLUSH_INTERVAL};
pub use format::{debug_arg, display_arg, error_arg, format_template, prepare, Arg, AsArg};
pub use log_level::LogLevel;
pub use logger::{Logger, LoggerBuilder};
pub use metrics::LoggerMetrics;
