//! Log level definitions and the severity gate

use super::error::{LoggerError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Ordered severity scale.
///
/// `Unknown` is a sentinel that sorts below every named level. It is never a
/// valid threshold and is never produced by parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Unknown = 0,
    Debug = 1,
    Trace = 2,
    Info = 3,
    Warning = 4,
    Error = 5,
    Fatal = 6,
}

impl LogLevel {
    /// The six levels a threshold may be set to, in ascending order
    pub const NAMED: [LogLevel; 6] = [
        LogLevel::Debug,
        LogLevel::Trace,
        LogLevel::Info,
        LogLevel::Warning,
        LogLevel::Error,
        LogLevel::Fatal,
    ];

    pub fn to_str(&self) -> &'static str {
        match self {
            LogLevel::Unknown => "UNKNOWN",
            LogLevel::Debug => "DEBUG",
            LogLevel::Trace => "TRACE",
            LogLevel::Info => "INFO",
            LogLevel::Warning => "WARNING",
            LogLevel::Error => "ERROR",
            LogLevel::Fatal => "FATAL",
        }
    }

    /// Parse a level name, case-insensitively
    ///
    /// # Errors
    ///
    /// Returns [`LoggerError::InvalidLevel`] for anything other than the six
    /// named levels, including `"unknown"`.
    pub fn parse(name: &str) -> Result<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "debug" => Ok(LogLevel::Debug),
            "trace" => Ok(LogLevel::Trace),
            "info" => Ok(LogLevel::Info),
            "warning" => Ok(LogLevel::Warning),
            "error" => Ok(LogLevel::Error),
            "fatal" => Ok(LogLevel::Fatal),
            _ => Err(LoggerError::invalid_level(name)),
        }
    }

    /// Returns `self` if it may be used as a sink threshold
    pub fn as_threshold(self) -> Result<Self> {
        match self {
            LogLevel::Unknown => Err(LoggerError::invalid_level(self.to_str())),
            level => Ok(level),
        }
    }

    /// Severity gate: an event at `self` passes a sink configured at `threshold`
    #[inline]
    pub fn is_enabled(self, threshold: LogLevel) -> bool {
        self >= threshold
    }

    /// Records at or above this level are duplicated into the error stream
    #[inline]
    pub fn is_error_stream(self) -> bool {
        self >= LogLevel::Error
    }

    #[cfg(feature = "console")]
    pub fn color_code(&self) -> colored::Color {
        use colored::Color::*;
        match self {
            LogLevel::Unknown => White,
            LogLevel::Debug => Blue,
            LogLevel::Trace => BrightBlack,
            LogLevel::Info => Green,
            LogLevel::Warning => Yellow,
            LogLevel::Error => Red,
            LogLevel::Fatal => BrightRed,
        }
    }
}

/// Free-standing form of the gate, `level >= threshold`
#[inline]
pub fn is_enabled(threshold: LogLevel, level: LogLevel) -> bool {
    level.is_enabled(threshold)
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_str())
    }
}

impl FromStr for LogLevel {
    type Err = LoggerError;

    fn from_str(s: &str) -> Result<Self> {
        LogLevel::parse(s)
    }
}
