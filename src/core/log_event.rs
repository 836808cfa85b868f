//! Log event and its scope-bound delivery guard

use super::log_level::LogLevel;
use super::logger::Logger;
use super::util;
use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

/// One log occurrence.
///
/// Metadata and the owning logger are fixed at construction; only the
/// message buffer grows, and only until the event is delivered.
pub struct LogEvent {
    logger: Arc<Logger>,
    level: LogLevel,
    file: Cow<'static, str>,
    line: u32,
    /// Milliseconds since the logging clock was anchored
    elapse: u64,
    thread_id: u32,
    fiber_id: u32,
    /// Unix seconds
    time: i64,
    message: String,
}

impl LogEvent {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        logger: Arc<Logger>,
        level: LogLevel,
        file: impl Into<Cow<'static, str>>,
        line: u32,
        elapse: u64,
        thread_id: u32,
        fiber_id: u32,
        time: i64,
    ) -> Self {
        Self {
            logger,
            level,
            file: file.into(),
            line,
            elapse,
            thread_id,
            fiber_id,
            time,
            message: String::new(),
        }
    }

    /// Create an event stamped with the calling thread's ids and the current time
    pub fn capture(
        logger: Arc<Logger>,
        level: LogLevel,
        file: impl Into<Cow<'static, str>>,
        line: u32,
    ) -> Self {
        Self::new(
            logger,
            level,
            file,
            line,
            util::elapsed_ms(),
            util::current_thread_id(),
            util::current_fiber_id(),
            util::unix_time(),
        )
    }

    /// Builder-style message setter
    #[must_use]
    pub fn with_message(mut self, message: impl AsRef<str>) -> Self {
        self.message.push_str(message.as_ref());
        self
    }

    pub fn logger(&self) -> &Arc<Logger> {
        &self.logger
    }

    pub fn level(&self) -> LogLevel {
        self.level
    }

    pub fn file(&self) -> &str {
        &self.file
    }

    pub fn line(&self) -> u32 {
        self.line
    }

    pub fn elapse(&self) -> u64 {
        self.elapse
    }

    pub fn thread_id(&self) -> u32 {
        self.thread_id
    }

    pub fn fiber_id(&self) -> u32 {
        self.fiber_id
    }

    pub fn time(&self) -> i64 {
        self.time
    }

    pub fn content(&self) -> &str {
        &self.message
    }

    /// Message buffer for stream-style accumulation
    pub fn stream(&mut self) -> &mut String {
        &mut self.message
    }

    /// Append formatted text to the message.
    ///
    /// A failing `Display` impl in the arguments only truncates the message.
    pub fn format(&mut self, args: fmt::Arguments<'_>) {
        let _ = fmt::Write::write_fmt(&mut self.message, args);
    }
}

impl fmt::Write for LogEvent {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.message.push_str(s);
        Ok(())
    }
}

impl fmt::Debug for LogEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LogEvent")
            .field("logger", &self.logger.name())
            .field("level", &self.level)
            .field("file", &self.file)
            .field("line", &self.line)
            .field("elapse", &self.elapse)
            .field("thread_id", &self.thread_id)
            .field("fiber_id", &self.fiber_id)
            .field("time", &self.time)
            .field("message", &self.message)
            .finish()
    }
}

/// Owns one [`LogEvent`] and delivers it to its logger exactly once when dropped.
///
/// Dropping happens on every exit path, including unwinding, so a
/// `write!(log_event!(logger, level), ...)` statement delivers at its end.
/// The guard is deliberately neither `Clone` nor `Copy`.
///
/// # Examples
///
/// ```
/// use lch_log::prelude::*;
/// use std::fmt::Write;
/// use std::sync::Arc;
///
/// let logger = Arc::new(Logger::new("demo"));
/// let buffer = Arc::new(BufferAppender::with_pattern("%p %m"));
/// logger.add_appender(buffer.clone());
///
/// {
///     let mut wrap = LogEventWrap::new(LogEvent::capture(
///         Arc::clone(&logger),
///         LogLevel::Info,
///         file!(),
///         line!(),
///     ));
///     write!(wrap, "answer={}", 42).unwrap();
/// }
///
/// assert_eq!(buffer.lines(), vec!["INFO answer=42".to_string()]);
/// ```
pub struct LogEventWrap {
    event: Option<LogEvent>,
}

impl LogEventWrap {
    pub fn new(event: LogEvent) -> Self {
        Self { event: Some(event) }
    }

    pub fn event(&self) -> &LogEvent {
        self.event
            .as_ref()
            .unwrap_or_else(|| unreachable!("event is only taken on drop"))
    }

    pub fn event_mut(&mut self) -> &mut LogEvent {
        self.event
            .as_mut()
            .unwrap_or_else(|| unreachable!("event is only taken on drop"))
    }

    /// Message buffer of the wrapped event
    pub fn stream(&mut self) -> &mut String {
        self.event_mut().stream()
    }
}

impl fmt::Write for LogEventWrap {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.event_mut().write_str(s)
    }
}

impl Drop for LogEventWrap {
    fn drop(&mut self) {
        if let Some(event) = self.event.take() {
            let logger = Arc::clone(event.logger());
            logger.log(event.level(), &event);
        }
    }
}
