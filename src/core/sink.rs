//! Sink trait for log output destinations

use super::{error::Result, log_level::LogLevel, log_record::LogRecord, metrics::LoggerMetrics};
use std::time::Duration;

/// A destination that records events at or above its threshold.
///
/// `emit` must not block on I/O for long and must never panic the caller;
/// failures are counted in [`Sink::metrics`] rather than returned.
pub trait Sink: Send + Sync {
    fn name(&self) -> &str;

    /// Minimum severity this sink admits
    fn threshold(&self) -> LogLevel;

    fn emit(&self, record: LogRecord);

    fn flush(&self) -> Result<()>;

    /// Stop admission, drain pending records for at most `timeout` and
    /// release resources. Returns `true` if everything was delivered in time.
    fn shutdown(&self, timeout: Duration) -> bool {
        let _ = timeout;
        self.flush().is_ok()
    }

    fn metrics(&self) -> &LoggerMetrics;
}
