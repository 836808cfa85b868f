//! # lch_log
//!
//! A synchronous Rust logging framework built around named loggers,
//! printf-like pattern layouts and pluggable appenders.
//!
//! ## Features
//!
//! - **Pattern Layouts**: `%d{%Y-%m-%d %H:%M:%S}%T[%p]%T%m%n` style formats compiled once
//! - **Two Level Gates**: Loggers and appenders filter independently
//! - **Never Fails**: Malformed patterns render visible markers instead of erroring
//! - **Thread Identity**: Named threads with a thread-local identity for log fields
//!
//! ## Example
//!
//! ```
//! use lch_log::prelude::*;
//! use lch_log::info;
//! use std::sync::Arc;
//!
//! let logger = Logger::builder("app")
//!     .min_level(LogLevel::Info)
//!     .pattern("%d{%H:%M:%S}%T[%p]%T[%c]%T%m%n")
//!     .appender(StdoutAppender::new())
//!     .build();
//! LoggerManager::global().add_logger(Arc::clone(&logger));
//!
//! info!(LoggerManager::global().get_logger("app"), "listening on {}", 8080);
//! ```

pub mod appenders;
pub mod core;
pub mod macros;

pub mod prelude {
    pub use crate::appenders::{BufferAppender, FileAppender, StdoutAppender};
    pub use crate::core::{
        Appender, AppenderConfig, FormatItem, LogEvent, LogEventWrap, LogFormatter, LogLevel,
        Logger, LoggerBuilder, LoggerConfig, LoggerError, LoggerManager, Result, SinkMetrics,
        Thread, ThreadInfo,
    };
}

pub use appenders::{BufferAppender, FileAppender, StdoutAppender};
pub use core::{
    Appender, AppenderConfig, AppenderState, FormatItem, LogEvent, LogEventWrap, LogFormatter,
    LogLevel, Logger, LoggerBuilder, LoggerConfig, LoggerError, LoggerManager, Result,
    SinkMetrics, Thread, ThreadInfo, DEFAULT_PATTERN, ROOT_LOGGER_NAME,
};
