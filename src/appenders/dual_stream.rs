//! Primary + error stream writer shared by the file sink's workers
//!
//! Each stream sits behind its own mutex, held for the full
//! check-rotate-write sequence. Two workers can never both decide to rotate
//! the same file, and no worker writes through a handle another one is
//! swapping. The streams rotate independently of each other.

use super::rotating_file::RotatingFile;
use crate::core::error::Result;
use crate::core::log_record::LogRecord;
use crate::core::metrics::LoggerMetrics;
use crate::core::timestamp::TimestampFormat;
use parking_lot::Mutex;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Extension appended to the primary file name for the error stream
pub const ERROR_STREAM_SUFFIX: &str = ".err";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stream {
    Primary,
    Error,
}

impl Stream {
    fn label(self) -> &'static str {
        match self {
            Stream::Primary => "primary",
            Stream::Error => "error",
        }
    }
}

pub struct DualStreamWriter {
    primary: Mutex<RotatingFile>,
    errors: Mutex<RotatingFile>,
    timestamp_format: TimestampFormat,
    metrics: Arc<LoggerMetrics>,
}

impl DualStreamWriter {
    pub fn new(
        primary: RotatingFile,
        errors: RotatingFile,
        timestamp_format: TimestampFormat,
        metrics: Arc<LoggerMetrics>,
    ) -> Self {
        Self {
            primary: Mutex::new(primary),
            errors: Mutex::new(errors),
            timestamp_format,
            metrics,
        }
    }

    /// `<dir>/<name>` -> `<dir>/<name>.err`
    pub fn error_path_for(primary: &Path) -> PathBuf {
        let mut name = primary.as_os_str().to_owned();
        name.push(ERROR_STREAM_SUFFIX);
        PathBuf::from(name)
    }

    /// Write one record: always to the primary stream, and to the error
    /// stream as well when its level is ERROR or above. Both streams get
    /// the same bytes.
    ///
    /// A failure on one stream is reported and counted, and does not stop the
    /// other stream from being written. Returns `true` if every attempted
    /// write succeeded.
    pub fn write(&self, record: &LogRecord) -> bool {
        let line = record.format_line(&self.timestamp_format);

        let mut all_written = self.write_stream(Stream::Primary, &line);
        if record.level.is_error_stream() {
            all_written &= self.write_stream(Stream::Error, &line);
        }
        all_written
    }

    fn stream(&self, stream: Stream) -> &Mutex<RotatingFile> {
        match stream {
            Stream::Primary => &self.primary,
            Stream::Error => &self.errors,
        }
    }

    fn write_stream(&self, stream: Stream, line: &str) -> bool {
        let mut file = self.stream(stream).lock();
        match file.write_line(line) {
            Ok(rotated) => {
                if rotated {
                    self.metrics.record_rotation();
                }
                match stream {
                    Stream::Primary => self.metrics.record_logged(),
                    Stream::Error => self.metrics.record_error_stream_logged(),
                };
                true
            }
            Err(e) => {
                self.metrics.record_write_failure();
                eprintln!(
                    "[LOGGER ERROR] Skipped record on {} stream '{}': {}",
                    stream.label(),
                    file.path().display(),
                    e
                );
                false
            }
        }
    }

    pub fn path(&self, stream: Stream) -> PathBuf {
        self.stream(stream).lock().path().to_path_buf()
    }

    pub fn flush(&self) -> Result<()> {
        self.primary.lock().flush()?;
        self.errors.lock().flush()
    }

    #[cfg(test)]
    pub(crate) fn primary_lock_for_test(&self) -> parking_lot::MutexGuard<'_, RotatingFile> {
        self.primary.lock()
    }

    /// Release both handles
    pub fn close(&self) -> Result<()> {
        let primary = self.primary.lock().close();
        let errors = self.errors.lock().close();
        primary.and(errors)
    }
}
