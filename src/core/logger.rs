//! Named logger: severity gate and appender fan-out

use super::{
    appender::Appender,
    error::{LoggerError, Result},
    formatter::{LogFormatter, DEFAULT_PATTERN},
    log_event::LogEvent,
    log_level::LogLevel,
};
use parking_lot::RwLock;
use std::fmt;
use std::sync::Arc;

/// Name of the registry's fallback logger
pub const ROOT_LOGGER_NAME: &str = "root";

/// A named severity gate owning an ordered list of appenders.
///
/// All state sits behind `parking_lot` locks, so a shared `Arc<Logger>`
/// can be reconfigured while other threads log through it.
pub struct Logger {
    name: String,
    min_level: RwLock<LogLevel>,
    formatter: RwLock<Arc<LogFormatter>>,
    appenders: RwLock<Vec<Arc<dyn Appender>>>,
}

impl Logger {
    /// Create a logger at `Debug` level using [`DEFAULT_PATTERN`]
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            min_level: RwLock::new(LogLevel::Debug),
            formatter: RwLock::new(Arc::new(LogFormatter::new(DEFAULT_PATTERN))),
            appenders: RwLock::new(Vec::new()),
        }
    }

    /// Create a logger named [`ROOT_LOGGER_NAME`]
    #[must_use]
    pub fn root() -> Self {
        Self::new(ROOT_LOGGER_NAME)
    }

    pub fn builder(name: impl Into<String>) -> LoggerBuilder {
        LoggerBuilder::new(name)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn level(&self) -> LogLevel {
        *self.min_level.read()
    }

    pub fn set_level(&self, level: LogLevel) {
        *self.min_level.write() = level;
    }

    /// Default formatter handed to appenders attached without one
    pub fn formatter(&self) -> Arc<LogFormatter> {
        Arc::clone(&self.formatter.read())
    }

    /// Replace the default formatter.
    ///
    /// Appenders already attached keep the formatter they were given.
    pub fn set_formatter(&self, formatter: Arc<LogFormatter>) {
        *self.formatter.write() = formatter;
    }

    /// Compile `pattern` and make it the default formatter.
    ///
    /// Unlike [`LogFormatter::new`], a pattern with error markers is rejected
    /// and the current formatter is kept.
    pub fn set_pattern(&self, pattern: &str) -> Result<()> {
        let formatter = LogFormatter::new(pattern);
        if formatter.has_error() {
            return Err(LoggerError::pattern(
                pattern,
                "pattern contains unknown keys or an unterminated sub-format",
            ));
        }
        self.set_formatter(Arc::new(formatter));
        Ok(())
    }

    /// Attach an appender, giving it this logger's formatter if it has none
    pub fn add_appender(&self, appender: Arc<dyn Appender>) {
        if appender.formatter().is_none() {
            appender.set_formatter(self.formatter());
        }
        self.appenders.write().push(appender);
    }

    /// Detach the first appender that is the same instance as `appender`
    pub fn del_appender(&self, appender: &Arc<dyn Appender>) {
        let mut appenders = self.appenders.write();
        if let Some(pos) = appenders.iter().position(|a| Arc::ptr_eq(a, appender)) {
            appenders.remove(pos);
        }
    }

    pub fn clear_appenders(&self) {
        self.appenders.write().clear();
    }

    /// Snapshot of the attached appenders in attachment order
    pub fn appenders(&self) -> Vec<Arc<dyn Appender>> {
        self.appenders.read().clone()
    }

    /// Forward `event` to every appender if `level` passes this logger's gate.
    ///
    /// Events below the gate are dropped without trace.
    pub fn log(&self, level: LogLevel, event: &LogEvent) {
        if level < self.level() {
            return;
        }

        // Appenders run outside the lock so they may log through this logger.
        let appenders = self.appenders();
        for appender in &appenders {
            appender.log(self, level, event);
        }
    }

    #[inline]
    pub fn debug(&self, event: &LogEvent) {
        self.log(LogLevel::Debug, event);
    }

    #[inline]
    pub fn info(&self, event: &LogEvent) {
        self.log(LogLevel::Info, event);
    }

    #[inline]
    pub fn warn(&self, event: &LogEvent) {
        self.log(LogLevel::Warn, event);
    }

    #[inline]
    pub fn error(&self, event: &LogEvent) {
        self.log(LogLevel::Error, event);
    }

    #[inline]
    pub fn fatal(&self, event: &LogEvent) {
        self.log(LogLevel::Fatal, event);
    }

    /// Flush every appender, stopping at the first failure
    pub fn flush(&self) -> Result<()> {
        for appender in self.appenders() {
            appender.flush()?;
        }
        Ok(())
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::root()
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("name", &self.name)
            .field("level", &self.level())
            .field("pattern", &self.formatter().pattern())
            .field("appenders", &self.appenders.read().len())
            .finish()
    }
}

/// Builder for configuring a Logger
///
/// # Example
///
/// ```
/// use lch_log::{Logger, LogLevel, StdoutAppender};
///
/// let logger = Logger::builder("app")
///     .min_level(LogLevel::Info)
///     .pattern("[%p] %m%n")
///     .appender(StdoutAppender::new())
///     .build();
/// assert_eq!(logger.name(), "app");
/// ```
pub struct LoggerBuilder {
    name: String,
    min_level: LogLevel,
    pattern: Option<String>,
    appenders: Vec<Arc<dyn Appender>>,
}

impl LoggerBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            min_level: LogLevel::Debug,
            pattern: None,
            appenders: Vec::new(),
        }
    }

    /// Set the minimum log level
    #[must_use]
    pub fn min_level(mut self, level: LogLevel) -> Self {
        self.min_level = level;
        self
    }

    /// Set the default pattern. Malformed patterns degrade as in [`LogFormatter::new`].
    #[must_use]
    pub fn pattern(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = Some(pattern.into());
        self
    }

    /// Add an appender
    #[must_use]
    pub fn appender<A: Appender + 'static>(mut self, appender: A) -> Self {
        self.appenders.push(Arc::new(appender));
        self
    }

    /// Add an appender that the caller keeps a handle to
    #[must_use]
    pub fn shared_appender(mut self, appender: Arc<dyn Appender>) -> Self {
        self.appenders.push(appender);
        self
    }

    /// Build the logger
    pub fn build(self) -> Arc<Logger> {
        let logger = Logger::new(self.name);
        logger.set_level(self.min_level);
        if let Some(pattern) = self.pattern {
            logger.set_formatter(Arc::new(LogFormatter::new(pattern)));
        }
        // Attach after the formatter is set so appenders inherit it.
        for appender in self.appenders {
            logger.add_appender(appender);
        }
        Arc::new(logger)
    }
}
