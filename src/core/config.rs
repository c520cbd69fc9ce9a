//! Logger configuration and its loaders
//!
//! The engine never reads configuration itself. A [`LoggerConfig`] is parsed
//! from JSON or a small INI dialect and handed to
//! [`Logger::from_config`](super::Logger::from_config).
//!
//! INI files carry a `[logger]` section; every other section is skipped:
//!
//! ```ini
//! ; comments start with ';' or '#'
//! [logger]
//! sink = file
//! level = debug
//! directory = /var/log/app
//! file_name = app.log
//! max_size_bytes = 10485760
//! ; standard, iso8601, rfc3339, unix_millis or a strftime pattern
//! timestamp_format = %Y/%m/%d %H:%M:%S
//! ```

use super::error::{LoggerError, Result};
use super::log_level::LogLevel;
use super::queue::DEFAULT_QUEUE_CAPACITY;
use super::timestamp::TimestampFormat;
use super::worker::DEFAULT_WORKER_COUNT;
use crate::appenders::rotating_file::DEFAULT_MAX_SIZE;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

/// Name of the INI section holding logger settings
pub const INI_SECTION: &str = "logger";

const DEFAULT_SHUTDOWN_TIMEOUT_MS: u64 = 5_000;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SinkKind {
    #[default]
    Console,
    File,
}

impl fmt::Display for SinkKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SinkKind::Console => write!(f, "console"),
            SinkKind::File => write!(f, "file"),
        }
    }
}

impl FromStr for SinkKind {
    type Err = LoggerError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "console" => Ok(SinkKind::Console),
            "file" => Ok(SinkKind::File),
            other => Err(LoggerError::config(
                "sink",
                format!("unknown sink '{}', expected 'console' or 'file'", other),
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggerConfig {
    pub sink: SinkKind,
    pub level: String,
    pub directory: PathBuf,
    pub file_name: String,
    pub max_size_bytes: u64,
    /// Rotation threshold of the error stream; `None` uses `max_size_bytes`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_max_size_bytes: Option<u64>,
    pub queue_capacity: usize,
    pub workers: usize,
    pub shutdown_timeout_ms: u64,
    pub timestamp_format: TimestampFormat,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            sink: SinkKind::Console,
            level: LogLevel::Info.to_str().to_ascii_lowercase(),
            directory: PathBuf::from("."),
            file_name: "app.log".to_string(),
            max_size_bytes: DEFAULT_MAX_SIZE,
            error_max_size_bytes: None,
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
            workers: DEFAULT_WORKER_COUNT,
            shutdown_timeout_ms: DEFAULT_SHUTDOWN_TIMEOUT_MS,
            timestamp_format: TimestampFormat::default(),
        }
    }
}

impl LoggerConfig {
    /// Console sink at `level`
    pub fn console(level: &str) -> Self {
        Self {
            sink: SinkKind::Console,
            level: level.to_string(),
            ..Self::default()
        }
    }

    /// File sink at `level` writing `<directory>/<file_name>`
    pub fn file(
        level: &str,
        directory: impl AsRef<Path>,
        file_name: &str,
        max_size_bytes: u64,
    ) -> Self {
        Self {
            sink: SinkKind::File,
            level: level.to_string(),
            directory: directory.as_ref().to_path_buf(),
            file_name: file_name.to_string(),
            max_size_bytes,
            ..Self::default()
        }
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse the INI dialect described in the module docs.
    ///
    /// Keys missing from the `[logger]` section keep their defaults and
    /// unknown keys are ignored.
    ///
    /// # Errors
    ///
    /// [`LoggerError::ConfigSyntax`] with the 1-based line number for a
    /// malformed section header, a line without `=`, an empty key, a pair
    /// outside any section, or a numeric value that does not parse.
    pub fn from_ini_str(ini: &str) -> Result<Self> {
        let mut config = Self::default();
        let mut section: Option<String> = None;

        for (idx, raw) in ini.lines().enumerate() {
            let line_no = idx + 1;
            let line = raw.trim();
            if line.is_empty() || line.starts_with(';') || line.starts_with('#') {
                continue;
            }

            if let Some(rest) = line.strip_prefix('[') {
                let name = rest
                    .strip_suffix(']')
                    .map(str::trim)
                    .filter(|name| !name.is_empty())
                    .ok_or_else(|| {
                        LoggerError::syntax(line_no, format!("incorrect section header \"{}\"", line))
                    })?;
                section = Some(name.to_string());
                continue;
            }

            let (key, value) = match line.split_once('=') {
                Some((key, value)) if !key.trim().is_empty() => (key.trim(), value.trim()),
                _ => {
                    return Err(LoggerError::syntax(
                        line_no,
                        format!("incorrect value \"{}\"", line),
                    ))
                }
            };

            match section.as_deref() {
                None => {
                    return Err(LoggerError::syntax(
                        line_no,
                        format!("key \"{}\" outside of any section", key),
                    ))
                }
                Some(INI_SECTION) => config.apply_ini_pair(line_no, key, value)?,
                Some(_) => {}
            }
        }

        Ok(config)
    }

    fn apply_ini_pair(&mut self, line_no: usize, key: &str, value: &str) -> Result<()> {
        match key {
            "sink" => {
                self.sink = value
                    .parse()
                    .map_err(|_| LoggerError::syntax(line_no, format!("unknown sink \"{}\"", value)))?
            }
            "level" => self.level = value.to_string(),
            "directory" => self.directory = PathBuf::from(value),
            "file_name" => self.file_name = value.to_string(),
            "max_size_bytes" => self.max_size_bytes = parse_number(line_no, key, value)?,
            "error_max_size_bytes" => {
                self.error_max_size_bytes = Some(parse_number(line_no, key, value)?)
            }
            "queue_capacity" => self.queue_capacity = parse_number(line_no, key, value)?,
            "workers" => self.workers = parse_number(line_no, key, value)?,
            "shutdown_timeout_ms" => self.shutdown_timeout_ms = parse_number(line_no, key, value)?,
            "timestamp_format" => self.timestamp_format = parse_timestamp_format(value),
            _ => {}
        }
        Ok(())
    }

    /// Read `path`: JSON if the extension is `.json`, INI otherwise
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|e| {
            LoggerError::io_operation("reading logger config", path.display().to_string(), e)
        })?;

        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        if is_json {
            Self::from_json_str(&contents)
        } else {
            Self::from_ini_str(&contents)
        }
    }

    /// Check the values a logger would be built from and return the parsed
    /// threshold.
    pub fn validate(&self) -> Result<LogLevel> {
        let level = LogLevel::parse(&self.level)?;

        if self.max_size_bytes == 0 || self.error_max_size_bytes == Some(0) {
            return Err(LoggerError::config(
                "LoggerConfig",
                "max size in bytes must be greater than zero",
            ));
        }
        if self.queue_capacity == 0 {
            return Err(LoggerError::config(
                "LoggerConfig",
                "queue capacity must be greater than zero",
            ));
        }
        if self.workers == 0 {
            return Err(LoggerError::config(
                "LoggerConfig",
                "worker count must be greater than zero",
            ));
        }
        if self.sink == SinkKind::File && self.file_name.trim().is_empty() {
            return Err(LoggerError::config(
                "LoggerConfig",
                "file sink requires a file name",
            ));
        }
        self.timestamp_format.validate()?;

        Ok(level)
    }

    pub fn shutdown_timeout(&self) -> Duration {
        Duration::from_millis(self.shutdown_timeout_ms)
    }
}

fn parse_number<T: FromStr>(line_no: usize, key: &str, value: &str) -> Result<T> {
    value.parse().map_err(|_| {
        LoggerError::syntax(
            line_no,
            format!("incorrect value \"{}\" for \"{}\"", value, key),
        )
    })
}

fn parse_timestamp_format(value: &str) -> TimestampFormat {
    match value.to_ascii_lowercase().as_str() {
        "standard" => TimestampFormat::Standard,
        "iso8601" => TimestampFormat::Iso8601,
        "rfc3339" => TimestampFormat::Rfc3339,
        "unix_millis" => TimestampFormat::UnixMillis,
        _ => TimestampFormat::Custom(value.to_string()),
    }
}
