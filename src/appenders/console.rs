//! Stdout appender implementation

use crate::core::{
    Appender, AppenderState, LogEvent, LogFormatter, LogLevel, Logger, Result, SinkMetrics,
};
#[cfg(feature = "console")]
use colored::Colorize;
use std::io::Write;
use std::sync::Arc;

/// Writes rendered events to standard output
pub struct StdoutAppender {
    state: AppenderState,
    use_colors: bool,
    metrics: SinkMetrics,
}

impl StdoutAppender {
    pub fn new() -> Self {
        Self {
            state: AppenderState::default(),
            use_colors: false,
            metrics: SinkMetrics::new(),
        }
    }

    /// Colour each rendered line by level
    ///
    /// # Example
    ///
    /// ```
    /// use lch_log::appenders::StdoutAppender;
    ///
    /// let appender = StdoutAppender::with_colors(true);
    /// ```
    #[cfg(feature = "console")]
    pub fn with_colors(use_colors: bool) -> Self {
        Self {
            use_colors,
            ..Self::new()
        }
    }

    /// Use `pattern` instead of inheriting the logger's formatter
    #[must_use]
    pub fn with_pattern(self, pattern: &str) -> Self {
        self.state.set_formatter(Arc::new(LogFormatter::new(pattern)));
        self
    }

    /// Set the minimum level this appender writes
    #[must_use]
    pub fn with_level(self, level: LogLevel) -> Self {
        self.state.set_level(level);
        self
    }

    pub fn metrics(&self) -> &SinkMetrics {
        &self.metrics
    }

    #[cfg(feature = "console")]
    fn paint(&self, level: LogLevel, output: String) -> String {
        if !self.use_colors {
            return output;
        }
        // Colour the text but keep the trailing newline outside the escape codes.
        let body = output.trim_end_matches('\n');
        let tail = &output[body.len()..];
        format!("{}{}", body.color(level.color_code()), tail)
    }

    #[cfg(not(feature = "console"))]
    fn paint(&self, _level: LogLevel, output: String) -> String {
        output
    }
}

impl Default for StdoutAppender {
    fn default() -> Self {
        Self::new()
    }
}

impl Appender for StdoutAppender {
    fn log(&self, logger: &Logger, level: LogLevel, event: &LogEvent) {
        let Some(output) = self.state.render(logger, level, event) else {
            return;
        };
        let output = self.paint(level, output);

        let mut stdout = std::io::stdout().lock();
        match stdout.write_all(output.as_bytes()) {
            Ok(()) => self.metrics.record_written(),
            Err(e) => {
                if self.metrics.record_first_failure() {
                    eprintln!("[LOGGER ERROR] stdout appender write failed: {}", e);
                }
            }
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
        std::io::stdout().flush()?;
        Ok(())
    }

    fn name(&self) -> &str {
        "stdout"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_options() {
        let appender = StdoutAppender::new()
            .with_pattern("%p %m%n")
            .with_level(LogLevel::Warn);
        assert_eq!(appender.level(), LogLevel::Warn);
        assert_eq!(appender.formatter().unwrap().pattern(), "%p %m%n");
        assert_eq!(appender.name(), "stdout");
    }

    #[test]
    fn test_writes_are_counted() {
        let logger = Arc::new(Logger::new("stdout-test"));
        let appender = StdoutAppender::new().with_pattern("%m%n");
        let event = LogEvent::capture(Arc::clone(&logger), LogLevel::Info, file!(), line!())
            .with_message("visible in --nocapture output");

        appender.log(&logger, LogLevel::Info, &event);
        appender.set_level(LogLevel::Error);
        appender.log(&logger, LogLevel::Info, &event);

        assert_eq!(appender.metrics().written_count(), 1);
        assert_eq!(appender.metrics().failed_count(), 0);
    }

    #[cfg(feature = "console")]
    #[test]
    fn test_paint_keeps_trailing_newline() {
        colored::control::set_override(true);
        let appender = StdoutAppender::with_colors(true);
        let painted = appender.paint(LogLevel::Error, "boom\n".to_string());
        assert!(painted.ends_with("\x1b[0m\n"));
        assert!(painted.contains("boom"));
    }
}
