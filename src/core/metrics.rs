//! Sink metrics for observability
//!
//! `Appender::log` has no failure channel, so every built-in appender counts
//! its successful and failed writes here instead.

use std::sync::atomic::{AtomicU64, Ordering};

/// Write counters for one sink
///
/// # Example
///
/// ```
/// use lch_log::SinkMetrics;
///
/// let metrics = SinkMetrics::new();
///
/// metrics.record_written();
/// metrics.record_failed();
///
/// assert_eq!(metrics.written_count(), 1);
/// assert_eq!(metrics.failed_count(), 1);
/// assert_eq!(metrics.failure_rate(), 50.0);
/// ```
#[derive(Debug)]
pub struct SinkMetrics {
    /// Rendered events written to the sink
    written: AtomicU64,

    /// Rendered events the sink failed to write
    failed: AtomicU64,
}

impl SinkMetrics {
    /// Create a new metrics instance with all counters at zero
    pub const fn new() -> Self {
        Self {
            written: AtomicU64::new(0),
            failed: AtomicU64::new(0),
        }
    }

    #[inline]
    pub fn written_count(&self) -> u64 {
        self.written.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn failed_count(&self) -> u64 {
        self.failed.load(Ordering::Relaxed)
    }

    /// Record a successful write
    #[inline]
    pub fn record_written(&self) {
        self.written.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a failed write, returning the previous failure count
    #[inline]
    pub fn record_failed(&self) -> u64 {
        self.failed.fetch_add(1, Ordering::Relaxed)
    }

    /// Record a failed write; true only for the first failure since the last reset
    #[inline]
    pub fn record_first_failure(&self) -> bool {
        self.record_failed() == 0
    }

    /// Percentage of attempted writes that failed (0.0 - 100.0)
    pub fn failure_rate(&self) -> f64 {
        let failed = self.failed_count();
        let total = failed + self.written_count();
        if total == 0 {
            0.0
        } else {
            (failed as f64 / total as f64) * 100.0
        }
    }

    /// Reset all counters to zero
    pub fn reset(&self) {
        self.written.store(0, Ordering::Relaxed);
        self.failed.store(0, Ordering::Relaxed);
    }
}

impl Default for SinkMetrics {
    fn default() -> Self {
        Self::new()
    }
}
