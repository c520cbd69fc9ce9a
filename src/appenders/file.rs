//! Asynchronous file sink
//!
//! Producers format nothing and touch no file: a record passes the gate,
//! gets offered to the [`DispatchQueue`] and the call returns. A
//! [`WorkerPool`] drains the queue into a [`DualStreamWriter`].

use super::dual_stream::{DualStreamWriter, Stream};
use super::rotating_file::{RotatingFile, DEFAULT_MAX_SIZE};
use crate::core::{
    logger::DEFAULT_SHUTDOWN_TIMEOUT,
    queue::{DispatchQueue, OverflowCallback, DEFAULT_QUEUE_CAPACITY},
    worker::{WorkerPool, DEFAULT_WORKER_COUNT},
    LogLevel, LogRecord, LoggerError, LoggerMetrics, Result, Sink, TimestampFormat,
};
use parking_lot::Mutex;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

pub struct FileSink {
    threshold: LogLevel,
    queue: DispatchQueue,
    writer: Arc<DualStreamWriter>,
    workers: Mutex<Option<WorkerPool>>,
    // Set once shutdown gives up on the workers; they stop writing
    abandoned: Arc<AtomicBool>,
    metrics: Arc<LoggerMetrics>,
}

impl FileSink {
    /// File sink writing `<directory>/<file_name>` and
    /// `<directory>/<file_name>.err`, rotating both at `max_size_bytes`.
    ///
    /// # Errors
    ///
    /// Fails if the level name is invalid, `max_size_bytes` is zero, or
    /// either file cannot be opened.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use rust_rotating_logger::appenders::FileSink;
    ///
    /// let sink = FileSink::new("debug", "logs", "app.log", 10 * 1024 * 1024).unwrap();
    /// ```
    pub fn new(
        level_name: &str,
        directory: impl AsRef<Path>,
        file_name: &str,
        max_size_bytes: u64,
    ) -> Result<Self> {
        Self::builder(directory, file_name)
            .level(LogLevel::parse(level_name)?)
            .max_size(max_size_bytes)
            .build()
    }

    pub fn builder(directory: impl AsRef<Path>, file_name: impl Into<String>) -> FileSinkBuilder {
        FileSinkBuilder::new(directory, file_name)
    }

    pub fn primary_path(&self) -> PathBuf {
        self.writer.path(Stream::Primary)
    }

    pub fn error_path(&self) -> PathBuf {
        self.writer.path(Stream::Error)
    }

    /// Records queued but not yet taken by a worker
    pub fn pending(&self) -> usize {
        self.queue.len()
    }
}

impl Sink for FileSink {
    fn name(&self) -> &str {
        "file"
    }

    fn threshold(&self) -> LogLevel {
        self.threshold
    }

    fn emit(&self, record: LogRecord) {
        if record.level.is_enabled(self.threshold) {
            self.queue.enqueue(record);
        }
    }

    fn flush(&self) -> Result<()> {
        self.writer.flush()
    }

    /// Drain and close.
    ///
    /// Admission stops first; records enqueued after this call are counted
    /// as dropped. Workers then drain what is already queued, and both
    /// handles are released once they have exited. Calling it again is a
    /// no-op that returns `true`.
    ///
    /// If the workers miss `timeout`, whatever is still queued is counted
    /// as dropped and the workers stop writing before the handles close.
    fn shutdown(&self, timeout: Duration) -> bool {
        self.queue.close();

        let Some(pool) = self.workers.lock().take() else {
            return true;
        };

        let drained = pool.join(timeout);
        if !drained {
            self.abandoned.store(true, Ordering::Release);
            let mut discarded = 0u64;
            for _ in self.queue.receiver().try_iter() {
                self.metrics.record_dropped();
                discarded += 1;
            }
            eprintln!(
                "[LOGGER WARNING] Shutdown timed out; {} queued records dropped",
                discarded
            );
        }

        if let Err(e) = self.writer.close() {
            eprintln!("[LOGGER ERROR] Failed to close log files during shutdown: {}", e);
            return false;
        }

        drained
    }

    fn metrics(&self) -> &LoggerMetrics {
        &self.metrics
    }
}

impl Drop for FileSink {
    fn drop(&mut self) {
        self.shutdown(DEFAULT_SHUTDOWN_TIMEOUT);
    }
}

/// Builder for [`FileSink`]
///
/// # Example
///
/// ```no_run
/// use rust_rotating_logger::appenders::FileSink;
/// use rust_rotating_logger::LogLevel;
/// use std::sync::Arc;
///
/// let sink = FileSink::builder("logs", "server.log")
///     .level(LogLevel::Info)
///     .max_size(64 * 1024 * 1024)
///     .error_max_size(8 * 1024 * 1024)
///     .queue_capacity(10_000)
///     .workers(2)
///     .on_overflow(Arc::new(|dropped| {
///         eprintln!("{} log records dropped", dropped);
///     }))
///     .build()
///     .unwrap();
/// ```
pub struct FileSinkBuilder {
    directory: PathBuf,
    file_name: String,
    level: LogLevel,
    max_size: u64,
    error_max_size: Option<u64>,
    queue_capacity: usize,
    workers: usize,
    timestamp_format: TimestampFormat,
    on_overflow: Option<OverflowCallback>,
}

impl FileSinkBuilder {
    pub fn new(directory: impl AsRef<Path>, file_name: impl Into<String>) -> Self {
        Self {
            directory: directory.as_ref().to_path_buf(),
            file_name: file_name.into(),
            level: LogLevel::Info,
            max_size: DEFAULT_MAX_SIZE,
            error_max_size: None,
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
            workers: DEFAULT_WORKER_COUNT,
            timestamp_format: TimestampFormat::default(),
            on_overflow: None,
        }
    }

    #[must_use = "builder methods return a new value"]
    pub fn level(mut self, level: LogLevel) -> Self {
        self.level = level;
        self
    }

    /// Rotation threshold of the primary stream, in bytes
    #[must_use = "builder methods return a new value"]
    pub fn max_size(mut self, bytes: u64) -> Self {
        self.max_size = bytes;
        self
    }

    /// Rotation threshold of the error stream. Defaults to [`Self::max_size`].
    #[must_use = "builder methods return a new value"]
    pub fn error_max_size(mut self, bytes: u64) -> Self {
        self.error_max_size = Some(bytes);
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn queue_capacity(mut self, capacity: usize) -> Self {
        self.queue_capacity = capacity;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn workers(mut self, count: usize) -> Self {
        self.workers = count;
        self
    }

    /// Checked by [`Self::build`]; an unrenderable `Custom` pattern fails there
    #[must_use = "builder methods return a new value"]
    pub fn timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.timestamp_format = format;
        self
    }

    /// Called with the running drop count on the first dropped record and
    /// on every 1000th after that
    #[must_use = "builder methods return a new value"]
    pub fn on_overflow(mut self, callback: OverflowCallback) -> Self {
        self.on_overflow = Some(callback);
        self
    }

    /// Open both streams and start the workers.
    ///
    /// The directory is created if it does not exist.
    pub fn build(self) -> Result<FileSink> {
        let threshold = self.level.as_threshold()?;
        if self.file_name.trim().is_empty() {
            return Err(LoggerError::config("FileSink", "file name must not be empty"));
        }
        if self.queue_capacity == 0 {
            return Err(LoggerError::config(
                "FileSink",
                "queue capacity must be greater than zero",
            ));
        }
        if self.workers == 0 {
            return Err(LoggerError::config(
                "FileSink",
                "worker count must be greater than zero",
            ));
        }
        self.timestamp_format.validate()?;

        fs::create_dir_all(&self.directory).map_err(|e| {
            LoggerError::io_operation(
                "creating log directory",
                self.directory.display().to_string(),
                e,
            )
        })?;

        let primary_path = self.directory.join(&self.file_name);
        let error_path = DualStreamWriter::error_path_for(&primary_path);
        let primary = RotatingFile::open(&primary_path, self.max_size)?;
        let errors = RotatingFile::open(&error_path, self.error_max_size.unwrap_or(self.max_size))?;

        let metrics = Arc::new(LoggerMetrics::new());
        let writer = Arc::new(DualStreamWriter::new(
            primary,
            errors,
            self.timestamp_format,
            Arc::clone(&metrics),
        ));

        let mut queue = DispatchQueue::new(self.queue_capacity, Arc::clone(&metrics));
        if let Some(callback) = self.on_overflow {
            queue = queue.with_overflow_callback(callback);
        }

        let abandoned = Arc::new(AtomicBool::new(false));
        let worker_writer = Arc::clone(&writer);
        let worker_abandoned = Arc::clone(&abandoned);
        let worker_metrics = Arc::clone(&metrics);
        let pool = WorkerPool::spawn(self.workers, "file-sink", queue.receiver(), move |record| {
            if worker_abandoned.load(Ordering::Acquire) {
                worker_metrics.record_dropped();
                return;
            }
            worker_writer.write(record);
        })?;

        Ok(FileSink {
            threshold,
            queue,
            writer,
            workers: Mutex::new(Some(pool)),
            abandoned,
            metrics,
        })
    }
}
