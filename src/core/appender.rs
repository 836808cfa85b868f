//! Appender trait for log output destinations

use super::{
    error::Result, formatter::LogFormatter, log_event::LogEvent, log_level::LogLevel,
    logger::Logger,
};
use parking_lot::RwLock;
use std::sync::Arc;

/// A sink with its own minimum level and formatter.
///
/// `log` receives every event the owning logger accepted; the appender
/// applies its own level gate before rendering. Appenders are shared as
/// `Arc<dyn Appender>` and compared by identity on removal.
pub trait Appender: Send + Sync {
    fn log(&self, logger: &Logger, level: LogLevel, event: &LogEvent);
    fn level(&self) -> LogLevel;
    fn set_level(&self, level: LogLevel);
    fn formatter(&self) -> Option<Arc<LogFormatter>>;
    fn set_formatter(&self, formatter: Arc<LogFormatter>);
    fn flush(&self) -> Result<()>;
    fn name(&self) -> &str;
}

/// Level and formatter state shared by the built-in appenders
#[derive(Debug, Default)]
pub struct AppenderState {
    level: RwLock<LogLevel>,
    formatter: RwLock<Option<Arc<LogFormatter>>>,
}

impl AppenderState {
    pub fn new(level: LogLevel, formatter: Option<Arc<LogFormatter>>) -> Self {
        Self {
            level: RwLock::new(level),
            formatter: RwLock::new(formatter),
        }
    }

    #[inline]
    pub fn level(&self) -> LogLevel {
        *self.level.read()
    }

    pub fn set_level(&self, level: LogLevel) {
        *self.level.write() = level;
    }

    pub fn formatter(&self) -> Option<Arc<LogFormatter>> {
        self.formatter.read().clone()
    }

    pub fn set_formatter(&self, formatter: Arc<LogFormatter>) {
        *self.formatter.write() = Some(formatter);
    }

    /// Apply the level gate and render.
    ///
    /// `None` means the event is below this appender's level. An appender
    /// that was never attached falls back to the default pattern.
    pub fn render(&self, logger: &Logger, level: LogLevel, event: &LogEvent) -> Option<String> {
        if level < self.level() {
            return None;
        }

        let formatter = self.formatter().unwrap_or_else(|| logger.formatter());
        Some(formatter.format(logger, level, event))
    }
}
