//! Main logger implementation

use super::{
    call_site::CallSite,
    config::{LoggerConfig, SinkKind},
    error::{LoggerError, Result},
    log_level::LogLevel,
    log_record::LogRecord,
    metrics::LoggerMetrics,
    sink::Sink,
};
use crate::appenders::{ConsoleSink, FileSink};
use std::fmt;
use std::path::Path;
use std::time::Duration;

/// Default shutdown timeout for logger cleanup (5 seconds)
///
/// This timeout is used when the logger is dropped without explicit shutdown.
/// For custom timeout control, use the `shutdown()` method instead.
pub const DEFAULT_SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(5);

/// A leveled logger bound to one sink.
///
/// Loggers are plain values: construct one, pass it (or an `Arc` of it) to
/// whatever needs to log, and shut it down or drop it when done.
pub struct Logger {
    sink: Box<dyn Sink>,
    shutdown_timeout: Duration,
    stopped: bool,
}

impl Logger {
    pub fn new<S: Sink + 'static>(sink: S) -> Self {
        Self {
            sink: Box::new(sink),
            shutdown_timeout: DEFAULT_SHUTDOWN_TIMEOUT,
            stopped: false,
        }
    }

    /// Logger writing to standard output
    ///
    /// # Example
    ///
    /// ```
    /// use rust_rotating_logger::Logger;
    ///
    /// let logger = Logger::console("debug").unwrap();
    /// logger.info("service started");
    ///
    /// assert!(Logger::console("chatty").is_err());
    /// ```
    pub fn console(level_name: &str) -> Result<Self> {
        Ok(Self::new(ConsoleSink::from_level_name(level_name)?))
    }

    /// Logger writing `<directory>/<file_name>` through the worker pool,
    /// with ERROR and FATAL records duplicated to `<file_name>.err`
    ///
    /// # Example
    ///
    /// ```no_run
    /// use rust_rotating_logger::{info, Logger};
    ///
    /// let mut logger = Logger::file("info", "logs", "app.log", 10 * 1024 * 1024).unwrap();
    /// info!(logger, "listening on port {}", 8080);
    /// logger.shutdown(std::time::Duration::from_secs(2));
    /// ```
    pub fn file(
        level_name: &str,
        directory: impl AsRef<Path>,
        file_name: &str,
        max_size_bytes: u64,
    ) -> Result<Self> {
        Ok(Self::new(FileSink::new(
            level_name,
            directory,
            file_name,
            max_size_bytes,
        )?))
    }

    /// Build the sink a [`LoggerConfig`] describes
    pub fn from_config(config: &LoggerConfig) -> Result<Self> {
        let level = config.validate()?;

        let logger = match config.sink {
            SinkKind::Console => Self::new(
                ConsoleSink::new(level)?.with_timestamp_format(config.timestamp_format.clone())?,
            ),
            SinkKind::File => {
                let mut builder = FileSink::builder(&config.directory, config.file_name.as_str())
                    .level(level)
                    .max_size(config.max_size_bytes)
                    .queue_capacity(config.queue_capacity)
                    .workers(config.workers)
                    .timestamp_format(config.timestamp_format.clone());
                if let Some(bytes) = config.error_max_size_bytes {
                    builder = builder.error_max_size(bytes);
                }
                Self::new(builder.build()?)
            }
        };

        Ok(logger.with_shutdown_timeout(config.shutdown_timeout()))
    }

    /// Timeout used when the logger is dropped
    #[must_use]
    pub fn with_shutdown_timeout(mut self, timeout: Duration) -> Self {
        self.shutdown_timeout = timeout;
        self
    }

    pub fn threshold(&self) -> LogLevel {
        self.sink.threshold()
    }

    #[inline]
    pub fn is_enabled(&self, level: LogLevel) -> bool {
        level.is_enabled(self.sink.threshold())
    }

    /// Build a record for `site` and hand it to the sink.
    ///
    /// Records below the threshold are discarded before the message is
    /// rendered. Never blocks on file I/O and never fails: a full queue
    /// drops the record and only [`Logger::metrics`] shows it.
    pub fn log(&self, level: LogLevel, site: CallSite, message: impl fmt::Display) {
        if !self.is_enabled(level) {
            return;
        }
        self.sink.emit(LogRecord::new(level, site, message));
    }

    /// Reports the function as `???`; the [`debug!`](crate::debug) macro records it.
    #[inline]
    #[track_caller]
    pub fn debug(&self, message: impl fmt::Display) {
        self.log(LogLevel::Debug, CallSite::caller(), message);
    }

    /// Reports the function as `???`; the [`trace!`](crate::trace) macro records it.
    #[inline]
    #[track_caller]
    pub fn trace(&self, message: impl fmt::Display) {
        self.log(LogLevel::Trace, CallSite::caller(), message);
    }

    /// Reports the function as `???`; the [`info!`](crate::info) macro records it.
    #[inline]
    #[track_caller]
    pub fn info(&self, message: impl fmt::Display) {
        self.log(LogLevel::Info, CallSite::caller(), message);
    }

    /// Reports the function as `???`; the [`warning!`](crate::warning) macro records it.
    #[inline]
    #[track_caller]
    pub fn warning(&self, message: impl fmt::Display) {
        self.log(LogLevel::Warning, CallSite::caller(), message);
    }

    /// Reports the function as `???`; the [`error!`](crate::error) macro records it.
    #[inline]
    #[track_caller]
    pub fn error(&self, message: impl fmt::Display) {
        self.log(LogLevel::Error, CallSite::caller(), message);
    }

    /// Reports the function as `???`; the [`fatal!`](crate::fatal) macro records it.
    #[inline]
    #[track_caller]
    pub fn fatal(&self, message: impl fmt::Display) {
        self.log(LogLevel::Fatal, CallSite::caller(), message);
    }

    /// Get the logger metrics for detailed observability
    ///
    /// # Example
    ///
    /// ```
    /// use rust_rotating_logger::Logger;
    ///
    /// let logger = Logger::console("info").unwrap();
    /// logger.info("hello");
    ///
    /// let metrics = logger.metrics();
    /// println!("Dropped: {}", metrics.dropped_count());
    /// println!("Total logged: {}", metrics.total_logged());
    /// println!("Drop rate: {:.2}%", metrics.drop_rate());
    /// ```
    pub fn metrics(&self) -> &LoggerMetrics {
        self.sink.metrics()
    }

    /// Records dropped because the queue was full or already closed
    pub fn dropped_count(&self) -> u64 {
        self.sink.metrics().dropped_count()
    }

    pub fn flush(&self) -> Result<()> {
        if self.stopped {
            return Err(LoggerError::LoggerStopped);
        }
        self.sink.flush()
    }

    /// Gracefully shutdown the logger with a custom timeout
    ///
    /// Stops admission, waits up to `timeout` for queued records to be
    /// written, then closes the files. Records logged afterwards are
    /// dropped.
    ///
    /// # Returns
    ///
    /// `true` if shutdown completed successfully within timeout, `false` otherwise
    pub fn shutdown(&mut self, timeout: Duration) -> bool {
        if self.stopped {
            return true;
        }
        self.stopped = true;
        self.sink.shutdown(timeout)
    }
}

impl Drop for Logger {
    fn drop(&mut self) {
        if !self.shutdown(self.shutdown_timeout) {
            eprintln!("[LOGGER WARNING] Logger did not shut down cleanly");
        }

        let dropped = self.sink.metrics().dropped_count();
        if dropped > 0 {
            eprintln!(
                "[LOGGER WARNING] Logger shutting down with {} dropped logs (drop rate: {:.2}%)",
                dropped,
                self.sink.metrics().drop_rate()
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::TimestampFormat;
    use parking_lot::Mutex;
    use std::sync::Arc;

    #[derive(Default)]
    struct CaptureSink {
        records: Arc<Mutex<Vec<LogRecord>>>,
        metrics: LoggerMetrics,
        shutdowns: Arc<Mutex<u32>>,
    }

    impl Sink for CaptureSink {
        fn name(&self) -> &str {
            "capture"
        }

        fn threshold(&self) -> LogLevel {
            LogLevel::Trace
        }

        fn emit(&self, record: LogRecord) {
            self.records.lock().push(record);
        }

        fn flush(&self) -> Result<()> {
            Ok(())
        }

        fn shutdown(&self, _timeout: Duration) -> bool {
            *self.shutdowns.lock() += 1;
            true
        }

        fn metrics(&self) -> &LoggerMetrics {
            &self.metrics
        }
    }

    fn capture_logger() -> (Logger, Arc<Mutex<Vec<LogRecord>>>, Arc<Mutex<u32>>) {
        let sink = CaptureSink::default();
        let records = Arc::clone(&sink.records);
        let shutdowns = Arc::clone(&sink.shutdowns);
        (Logger::new(sink), records, shutdowns)
    }

    #[test]
    fn test_gate_is_applied_before_emit() {
        let (logger, records, _) = capture_logger();
        assert_eq!(logger.threshold(), LogLevel::Trace);

        logger.debug("below");
        logger.trace("at");
        logger.fatal("above");

        let levels: Vec<LogLevel> = records.lock().iter().map(|r| r.level).collect();
        assert_eq!(levels, vec![LogLevel::Trace, LogLevel::Fatal]);
    }

    #[test]
    fn test_leveled_methods_capture_file_and_line() {
        let (logger, records, _) = capture_logger();

        let line = line!() + 1;
        logger.warning(format_args!("disk at {}%", 91));

        let records = records.lock();
        assert_eq!(records[0].file, "logger.rs");
        assert_eq!(records[0].line, line);
        assert_eq!(records[0].function, crate::core::call_site::UNKNOWN_FUNCTION);
        assert_eq!(records[0].message, "disk at 91%");
    }

    #[test]
    fn test_log_with_explicit_call_site() {
        let (logger, records, _) = capture_logger();
        logger.log(LogLevel::Info, crate::call_site!(), "explicit");

        let records = records.lock();
        assert_eq!(records[0].function, "test_log_with_explicit_call_site");
        assert_eq!(records[0].file, "logger.rs");
    }

    #[test]
    fn test_shutdown_runs_once() {
        let (mut logger, _, shutdowns) = capture_logger();
        assert!(logger.shutdown(Duration::from_secs(1)));
        assert!(logger.shutdown(Duration::from_secs(1)));
        assert!(matches!(logger.flush(), Err(LoggerError::LoggerStopped)));
        drop(logger);
        assert_eq!(*shutdowns.lock(), 1);
    }

    #[test]
    fn test_drop_shuts_down_sink() {
        let (logger, _, shutdowns) = capture_logger();
        drop(logger);
        assert_eq!(*shutdowns.lock(), 1);
    }

    #[test]
    fn test_constructors_reject_invalid_level() {
        assert!(matches!(
            Logger::console("verbose"),
            Err(LoggerError::InvalidLevel { .. })
        ));
        assert!(matches!(
            Logger::from_config(&LoggerConfig::console("UNKNOWN")),
            Err(LoggerError::InvalidLevel { .. })
        ));
    }

    #[test]
    fn test_from_config_rejects_unrenderable_timestamp_pattern() {
        let mut config = LoggerConfig::console("info");
        config.timestamp_format = TimestampFormat::Custom("%Q".to_string());
        assert!(matches!(
            Logger::from_config(&config),
            Err(LoggerError::InvalidConfiguration { .. })
        ));
    }

    #[test]
    fn test_from_config_console() {
        let logger = Logger::from_config(&LoggerConfig::console("warning")).unwrap();
        assert_eq!(logger.threshold(), LogLevel::Warning);
        assert!(logger.is_enabled(LogLevel::Error));
        assert!(!logger.is_enabled(LogLevel::Info));
    }
}
