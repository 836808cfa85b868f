//! File appender implementation

use crate::core::{
    Appender, AppenderState, LogEvent, LogFormatter, LogLevel, Logger, LoggerError, Result,
    SinkMetrics,
};
use parking_lot::Mutex;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Writes rendered events to a file opened in truncate mode.
///
/// The appender never reopens on its own: after the file is removed or
/// rotated by someone else, call [`FileAppender::reopen`].
pub struct FileAppender {
    path: PathBuf,
    writer: Mutex<Option<BufWriter<File>>>,
    state: AppenderState,
    metrics: SinkMetrics,
}

impl FileAppender {
    /// Open `path`, truncating it.
    ///
    /// An open failure is reported on stderr and leaves the appender without
    /// a stream; events are then counted as failed until a successful
    /// [`reopen`](Self::reopen). Use [`FileAppender::open`] to get the error.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let appender = Self::unopened(path.into());
        if let Err(e) = appender.try_reopen() {
            eprintln!("[LOGGER ERROR] {}", e);
        }
        appender
    }

    /// Open `path`, truncating it, and fail if it cannot be opened
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use lch_log::appenders::FileAppender;
    ///
    /// let appender = FileAppender::open("/var/log/app.log").unwrap();
    /// ```
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let appender = Self::unopened(path.into());
        appender.try_reopen()?;
        Ok(appender)
    }

    fn unopened(path: PathBuf) -> Self {
        Self {
            path,
            writer: Mutex::new(None),
            state: AppenderState::default(),
            metrics: SinkMetrics::new(),
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

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_open(&self) -> bool {
        self.writer.lock().is_some()
    }

    pub fn metrics(&self) -> &SinkMetrics {
        &self.metrics
    }

    /// Close the current stream and open the file again, truncating it
    pub fn reopen(&self) -> bool {
        self.try_reopen().is_ok()
    }

    /// Like [`reopen`](Self::reopen), returning the open error
    pub fn try_reopen(&self) -> Result<()> {
        let mut writer = self.writer.lock();
        if let Some(mut old) = writer.take() {
            // The old stream is being discarded; a failed flush is not actionable.
            let _ = old.flush();
        }

        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&self.path)
            .map_err(|e| LoggerError::file_appender(self.path.display().to_string(), e))?;
        *writer = Some(BufWriter::new(file));
        Ok(())
    }

    fn write(&self, output: &str) -> Result<()> {
        let mut slot = self.writer.lock();
        let writer = slot
            .as_mut()
            .ok_or_else(|| LoggerError::writer("File writer not initialized"))?;

        if let Err(e) = writer.write_all(output.as_bytes()).and_then(|()| writer.flush()) {
            // Drop the unwritten tail so it cannot prefix the next event.
            if let Some(failed) = slot.take() {
                let (file, _unwritten) = failed.into_parts();
                *slot = Some(BufWriter::new(file));
            }
            return Err(e.into());
        }
        Ok(())
    }
}

impl Appender for FileAppender {
    fn log(&self, logger: &Logger, level: LogLevel, event: &LogEvent) {
        let Some(output) = self.state.render(logger, level, event) else {
            return;
        };

        match self.write(&output) {
            Ok(()) => self.metrics.record_written(),
            Err(e) => {
                if self.metrics.record_first_failure() {
                    eprintln!(
                        "[LOGGER ERROR] file appender '{}' write failed: {}",
                        self.path.display(),
                        e
                    );
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
        if let Some(ref mut writer) = *self.writer.lock() {
            writer.flush()?;
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "file"
    }
}

impl Drop for FileAppender {
    fn drop(&mut self) {
        // Ensure all buffered data is flushed to disk
        let _ = Appender::flush(self);
    }
}
