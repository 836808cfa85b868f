//! Core logger types and traits

pub mod appender;
pub mod config;
pub mod error;
pub mod formatter;
pub mod log_event;
pub mod log_level;
pub mod logger;
pub mod metrics;
pub mod registry;
pub mod thread;
pub mod util;

pub use appender::{Appender, AppenderState};
pub use config::{AppenderConfig, LoggerConfig};
pub use error::{LoggerError, Result};
pub use formatter::{FormatItem, LogFormatter, DEFAULT_DATE_FORMAT, DEFAULT_PATTERN};
pub use log_event::{LogEvent, LogEventWrap};
pub use log_level::LogLevel;
pub use logger::{Logger, LoggerBuilder, ROOT_LOGGER_NAME};
pub use metrics::SinkMetrics;
pub use registry::LoggerManager;
pub use thread::{Thread, ThreadInfo, UNKNOWN_THREAD_NAME};
