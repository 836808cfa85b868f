//! In-memory appender

use crate::core::{Appender, AppenderState, LogEvent, LogFormatter, LogLevel, Logger, Result};
use parking_lot::Mutex;
use std::sync::Arc;

/// Keeps every rendered event in memory, one entry per accepted event.
///
/// Handy for tests and for embedding log output in another surface.
///
/// # Examples
///
/// ```
/// use lch_log::prelude::*;
/// use std::sync::Arc;
///
/// let logger = Arc::new(Logger::new("demo"));
/// let buffer = Arc::new(BufferAppender::with_pattern("[%c] %m"));
/// logger.add_appender(buffer.clone());
///
/// lch_log::info!(logger, "started {}", "ok");
/// assert_eq!(buffer.lines(), vec!["[demo] started ok".to_string()]);
/// ```
#[derive(Default)]
pub struct BufferAppender {
    state: AppenderState,
    lines: Mutex<Vec<String>>,
}

impl BufferAppender {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_pattern(pattern: &str) -> Self {
        let appender = Self::new();
        appender
            .state
            .set_formatter(Arc::new(LogFormatter::new(pattern)));
        appender
    }

    /// Set the minimum level this appender keeps
    #[must_use]
    pub fn with_level(self, level: LogLevel) -> Self {
        self.state.set_level(level);
        self
    }

    /// Rendered output collected so far
    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().clone()
    }

    /// Concatenation of every rendered event
    pub fn contents(&self) -> String {
        self.lines.lock().concat()
    }

    pub fn len(&self) -> usize {
        self.lines.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.lock().is_empty()
    }

    /// Remove and return everything collected so far
    pub fn take(&self) -> Vec<String> {
        std::mem::take(&mut *self.lines.lock())
    }
}

impl Appender for BufferAppender {
    fn log(&self, logger: &Logger, level: LogLevel, event: &LogEvent) {
        if let Some(output) = self.state.render(logger, level, event) {
            self.lines.lock().push(output);
        }
    }

    fn level(&self) -> LogLevel {
        self.state.level()
    }

    fn set_level(&self, level: LogLevel) {
        self.state.set_level(level);
    }

    fn formatter(&self) -> Option<Arc<LogFormatter>> {
        self.state.formatter()
    }

    fn set_formatter(&self, formatter: Arc<LogFormatter>) {
        self.state.set_formatter(formatter);
    }

    fn flush(&self) -> Result<()> {
        Ok(())
    }

    fn name(&self) -> &str {
        "buffer"
    }
}
