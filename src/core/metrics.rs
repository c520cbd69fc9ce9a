//! Logger metrics for observability
//!
//! Counters for admitted, dropped and written records, write failures and
//! rotations. Dropped records are never reported to the producer; these
//! counters are the only place they show up.

use std::sync::atomic::{AtomicU64, Ordering};

/// Metrics for logger observability
///
/// # Example
///
/// ```
/// use rust_rotating_logger::LoggerMetrics;
///
/// let metrics = LoggerMetrics::new();
///
/// metrics.record_dropped();
/// metrics.record_logged();
///
/// assert_eq!(metrics.dropped_count(), 1);
/// assert_eq!(metrics.total_logged(), 1);
/// ```
#[derive(Debug)]
pub struct LoggerMetrics {
    /// Records accepted into the dispatch queue
    enqueued: AtomicU64,

    /// Records discarded because the queue was full or closed
    dropped_count: AtomicU64,

    /// Lines written to the primary stream (or the console)
    total_logged: AtomicU64,

    /// Lines written to the error stream
    error_stream_logged: AtomicU64,

    /// Per-stream write attempts that failed (including failed rotations)
    write_failures: AtomicU64,

    /// Completed rotations across both streams
    rotations: AtomicU64,
}

impl LoggerMetrics {
    /// Create a new metrics instance with all counters at zero
    pub const fn new() -> Self {
        Self {
            enqueued: AtomicU64::new(0),
            dropped_count: AtomicU64::new(0),
            total_logged: AtomicU64::new(0),
            error_stream_logged: AtomicU64::new(0),
            write_failures: AtomicU64::new(0),
            rotations: AtomicU64::new(0),
        }
    }

    #[inline]
    pub fn enqueued_count(&self) -> u64 {
        self.enqueued.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn dropped_count(&self) -> u64 {
        self.dropped_count.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn total_logged(&self) -> u64 {
        self.total_logged.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn error_stream_logged(&self) -> u64 {
        self.error_stream_logged.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn write_failures(&self) -> u64 {
        self.write_failures.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn rotation_count(&self) -> u64 {
        self.rotations.load(Ordering::Relaxed)
    }

    /// Record an accepted record; returns the previous count
    #[inline]
    pub fn record_enqueued(&self) -> u64 {
        self.enqueued.fetch_add(1, Ordering::Relaxed)
    }

    /// Record a dropped record; returns the previous count
    #[inline]
    pub fn record_dropped(&self) -> u64 {
        self.dropped_count.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_logged(&self) -> u64 {
        self.total_logged.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_error_stream_logged(&self) -> u64 {
        self.error_stream_logged.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_write_failure(&self) -> u64 {
        self.write_failures.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_rotation(&self) -> u64 {
        self.rotations.fetch_add(1, Ordering::Relaxed)
    }

    /// Get drop rate as a percentage (0.0 - 100.0)
    ///
    /// Returns 0.0 if nothing has been offered to the queue.
    pub fn drop_rate(&self) -> f64 {
        let dropped = self.dropped_count() as f64;
        let total = self.enqueued_count() as f64 + dropped;
        if total == 0.0 {
            0.0
        } else {
            (dropped / total) * 100.0
        }
    }

    /// Reset all metrics to zero
    pub fn reset(&self) {
        self.enqueued.store(0, Ordering::Relaxed);
        self.dropped_count.store(0, Ordering::Relaxed);
        self.total_logged.store(0, Ordering::Relaxed);
        self.error_stream_logged.store(0, Ordering::Relaxed);
        self.write_failures.store(0, Ordering::Relaxed);
        self.rotations.store(0, Ordering::Relaxed);
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
            enqueued: AtomicU64::new(self.enqueued_count()),
            dropped_count: AtomicU64::new(self.dropped_count()),
            total_logged: AtomicU64::new(self.total_logged()),
            error_stream_logged: AtomicU64::new(self.error_stream_logged()),
            write_failures: AtomicU64::new(self.write_failures()),
            rotations: AtomicU64::new(self.rotation_count()),
        }
    }
}
