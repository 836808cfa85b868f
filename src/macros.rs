//! Logging macros for call sites.
//!
//! Every macro takes an `Arc<Logger>` expression, captures `file!()` and
//! `line!()`, and delivers through a [`LogEventWrap`](crate::LogEventWrap)
//! at the end of the statement.
//!
//! # Examples
//!
//! ```
//! use lch_log::prelude::*;
//! use lch_log::{info, log_event};
//! use std::fmt::Write;
//!
//! let logger = LoggerManager::global().root();
//!
//! // Basic logging
//! info!(logger, "Server started");
//!
//! // With format arguments
//! let port = 8080;
//! info!(logger, "Server listening on port {}", port);
//!
//! // Stream style
//! write!(log_event!(logger, LogLevel::Warn), "disk usage at {}%", 91).unwrap();
//! ```

/// Create a [`LogEventWrap`](crate::LogEventWrap) for stream-style writing.
///
/// The event is delivered when the wrap is dropped, which for a temporary
/// is the end of the enclosing statement. The logger's level is applied at
/// delivery.
///
/// # Examples
///
/// ```
/// # use lch_log::prelude::*;
/// # use std::sync::Arc;
/// use lch_log::log_event;
/// use std::fmt::Write;
///
/// let logger = Arc::new(Logger::new("app"));
/// write!(log_event!(logger, LogLevel::Info), "user {} logged in", 42).unwrap();
/// ```
#[macro_export]
macro_rules! log_event {
    ($logger:expr, $level:expr) => {
        $crate::LogEventWrap::new($crate::LogEvent::capture(
            ::std::sync::Arc::clone(&$logger),
            $level,
            file!(),
            line!(),
        ))
    };
}

/// Log a message with automatic formatting.
///
/// Skips building the event entirely when the logger's level filters it.
///
/// # Examples
///
/// ```
/// # use lch_log::prelude::*;
/// # let logger = LoggerManager::global().root();
/// use lch_log::log;
/// log!(logger, LogLevel::Info, "Simple message");
/// log!(logger, LogLevel::Error, "Error code: {}", 500);
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, $($arg:tt)+) => {{
        let logger: &::std::sync::Arc<$crate::Logger> = &$logger;
        let level = $level;
        if logger.level() <= level {
            let mut wrap = $crate::log_event!(logger, level);
            wrap.event_mut().format(format_args!($($arg)+));
        }
    }};
}

/// Log a debug-level message.
///
/// # Examples
///
/// ```
/// # use lch_log::prelude::*;
/// # let logger = LoggerManager::global().root();
/// use lch_log::debug;
/// debug!(logger, "Debug information");
/// debug!(logger, "Counter value: {}", 10);
/// ```
#[macro_export]
macro_rules! debug {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Debug, $($arg)+)
    };
}

/// Log an info-level message.
#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Info, $($arg)+)
    };
}

/// Log a warning-level message.
///
/// # Examples
///
/// ```
/// # use lch_log::prelude::*;
/// # let logger = LoggerManager::global().root();
/// use lch_log::warn;
/// warn!(logger, "Low disk space");
/// warn!(logger, "Retry attempt {} of {}", 3, 5);
/// ```
#[macro_export]
macro_rules! warn {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Warn, $($arg)+)
    };
}

/// Log an error-level message.
#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Error, $($arg)+)
    };
}

/// Log a fatal-level message.
///
/// # Examples
///
/// ```
/// # use lch_log::prelude::*;
/// # let logger = LoggerManager::global().root();
/// use lch_log::fatal;
/// fatal!(logger, "Critical system failure");
/// fatal!(logger, "Unable to recover from error: {}", "disk full");
/// ```
#[macro_export]
macro_rules! fatal {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Fatal, $($arg)+)
    };
}
