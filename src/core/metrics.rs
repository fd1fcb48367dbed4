//! Logger metrics for observability
//!
//! Counters for entries written and dropped and for flush cycles. Everything
//! is relaxed atomics; the numbers are for monitoring, not synchronization.

use std::sync::atomic::{AtomicU64, Ordering};

/// Metrics for logger observability
///
/// # Example
///
/// ```
/// use flog::LoggerMetrics;
///
/// let metrics = LoggerMetrics::new();
/// metrics.record_written();
/// metrics.record_dropped();
///
/// assert_eq!(metrics.written_count(), 1);
/// assert_eq!(metrics.dropped_count(), 1);
/// ```
#[derive(Debug)]
pub struct LoggerMetrics {
    /// Entries appended to a sink buffer
    written: AtomicU64,

    /// Entries lost to write errors
    dropped: AtomicU64,

    /// Completed flush cycles (periodic, explicit and final)
    flushes: AtomicU64,

    /// Flush cycles where at least one sink failed
    flush_failures: AtomicU64,
}

impl LoggerMetrics {
    pub const fn new() -> Self {
        Self {
            written: AtomicU64::new(0),
            dropped: AtomicU64::new(0),
            flushes: AtomicU64::new(0),
            flush_failures: AtomicU64::new(0),
        }
    }

    #[inline]
    pub fn written_count(&self) -> u64 {
        self.written.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn dropped_count(&self) -> u64 {
        self.dropped.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn flush_count(&self) -> u64 {
        self.flushes.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn flush_failure_count(&self) -> u64 {
        self.flush_failures.load(Ordering::Relaxed)
    }

    /// Returns the previous value
    #[inline]
    pub fn record_written(&self) -> u64 {
        self.written.fetch_add(1, Ordering::Relaxed)
    }

    /// Returns the previous value
    #[inline]
    pub fn record_dropped(&self) -> u64 {
        self.dropped.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_flush(&self, failed: bool) {
        self.flushes.fetch_add(1, Ordering::Relaxed);
        if failed {
            self.flush_failures.fetch_add(1, Ordering::Relaxed);
        }
    }

    /// Get drop rate as a percentage (0.0 - 100.0)
    pub fn drop_rate(&self) -> f64 {
        let dropped = self.dropped_count() as f64;
        let total = self.written_count() as f64 + dropped;
        if total == 0.0 {
            0.0
        } else {
            (dropped / total) * 100.0
        }
    }
}

impl Default for LoggerMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for LoggerMetrics {
    /// Create a snapshot of the current metrics values
    fn clone(&self) -> Self {
        Self {
            written: AtomicU64::new(self.written_count()),
            dropped: AtomicU64::new(self.dropped_count()),
            flushes: AtomicU64::new(self.flush_count()),
            flush_failures: AtomicU64::new(self.flush_failure_count()),
        }
    }
}
