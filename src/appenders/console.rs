//! Console sink: synchronous, unbuffered output to stdout

use crate::core::{
    LogLevel, LogRecord, LoggerError, LoggerMetrics, Result, Sink, TimestampFormat,
};
#[cfg(feature = "console")]
use colored::Colorize;
use parking_lot::Mutex;
use std::io::{self, Write};

pub struct ConsoleSink {
    threshold: LogLevel,
    #[cfg(feature = "console")]
    use_colors: bool,
    timestamp_format: TimestampFormat,
    writer: Mutex<Box<dyn Write + Send>>,
    metrics: LoggerMetrics,
}

impl ConsoleSink {
    /// Console sink writing to standard output
    ///
    /// # Errors
    ///
    /// Returns [`LoggerError::InvalidLevel`] if `threshold` is `Unknown`.
    pub fn new(threshold: LogLevel) -> Result<Self> {
        Self::with_writer(threshold, io::stdout())
    }

    /// Console sink configured from a level name such as `"debug"`
    pub fn from_level_name(level_name: &str) -> Result<Self> {
        Self::new(LogLevel::parse(level_name)?)
    }

    /// Write to `writer` instead of standard output
    pub fn with_writer<W: Write + Send + 'static>(threshold: LogLevel, writer: W) -> Result<Self> {
        Ok(Self {
            threshold: threshold.as_threshold()?,
            #[cfg(feature = "console")]
            use_colors: false,
            timestamp_format: TimestampFormat::default(),
            writer: Mutex::new(Box::new(writer)),
            metrics: LoggerMetrics::new(),
        })
    }

    /// Colour the level token with ANSI escapes.
    ///
    /// Off by default: coloured lines no longer match the plain line format
    /// byte for byte.
    ///
    /// # Example
    ///
    /// ```
    /// use rust_rotating_logger::appenders::ConsoleSink;
    /// use rust_rotating_logger::LogLevel;
    ///
    /// let sink = ConsoleSink::new(LogLevel::Debug).unwrap().with_colors(true);
    /// ```
    #[cfg(feature = "console")]
    #[must_use]
    pub fn with_colors(mut self, use_colors: bool) -> Self {
        self.use_colors = use_colors;
        self
    }

    /// # Errors
    ///
    /// Returns [`LoggerError::InvalidConfiguration`] for a `Custom` pattern
    /// chrono cannot render.
    pub fn with_timestamp_format(mut self, format: TimestampFormat) -> Result<Self> {
        format.validate()?;
        self.timestamp_format = format;
        Ok(self)
    }

    fn format_text(&self, record: &LogRecord) -> String {
        #[cfg(feature = "console")]
        if self.use_colors {
            let level = record
                .level
                .to_str()
                .color(record.level.color_code())
                .to_string();
            return crate::core::log_record::render_line(
                &self.timestamp_format.format(&record.timestamp),
                &level,
                record.file,
                record.function,
                record.line,
                &record.message,
            );
        }

        record.format_line(&self.timestamp_format)
    }
}

impl Sink for ConsoleSink {
    fn name(&self) -> &str {
        "console"
    }

    fn threshold(&self) -> LogLevel {
        self.threshold
    }

    fn emit(&self, record: LogRecord) {
        if !record.level.is_enabled(self.threshold) {
            return;
        }

        let line = self.format_text(&record);
        let mut writer = self.writer.lock();
        match writer
            .write_all(line.as_bytes())
            .and_then(|()| writer.flush())
        {
            Ok(()) => {
                self.metrics.record_logged();
            }
            Err(_) => {
                self.metrics.record_write_failure();
            }
        }
    }

    fn flush(&self) -> Result<()> {
        self.writer.lock().flush().map_err(LoggerError::from)
    }

    fn metrics(&self) -> &LoggerMetrics {
        &self.metrics
    }
}
