//! Timestamp formatting utilities
//!
//! Line timestamps default to a fixed-width local `YYYY-MM-DD HH:MM:SS`
//! rendering. Rotated backups use a separate compact suffix format.

use super::error::{LoggerError, Result};
use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, TimeZone};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Write as _};

/// strftime pattern of [`TimestampFormat::Standard`]
pub const STANDARD_PATTERN: &str = "%Y-%m-%d %H:%M:%S";

/// strftime pattern used for the `.back<timestamp>` suffix of rotated files
pub const BACKUP_SUFFIX_PATTERN: &str = "%Y%m%d%H%M%S%3f";

/// Timestamp format options for the `[<timestamp>]` field of a log line
///
/// # Examples
///
/// ```
/// use rust_rotating_logger::TimestampFormat;
/// use chrono::Local;
///
/// let stamp = TimestampFormat::default().format(&Local::now());
/// assert_eq!(stamp.len(), "2025-01-08 10:30:45".len());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimestampFormat {
    /// `2025-01-08 10:30:45`
    #[default]
    Standard,

    /// ISO 8601 with milliseconds: `2025-01-08T10:30:45.123+08:00`
    Iso8601,

    /// RFC 3339: `2025-01-08T10:30:45.123456+08:00`
    Rfc3339,

    /// Unix timestamp in milliseconds: `1736332245123`
    UnixMillis,

    /// Custom strftime format
    Custom(String),
}

impl TimestampFormat {
    /// Reject a `Custom` pattern chrono cannot render
    ///
    /// # Errors
    ///
    /// Returns [`LoggerError::InvalidConfiguration`] naming the pattern.
    pub fn validate(&self) -> Result<()> {
        if let TimestampFormat::Custom(pattern) = self {
            if StrftimeItems::new(pattern).any(|item| matches!(item, Item::Error)) {
                return Err(LoggerError::config(
                    "TimestampFormat",
                    format!("invalid strftime pattern \"{}\"", pattern),
                ));
            }
        }
        Ok(())
    }

    /// Render `datetime`. Never panics: a pattern that fails to render
    /// falls back to [`STANDARD_PATTERN`].
    #[must_use]
    pub fn format<Tz>(&self, datetime: &DateTime<Tz>) -> String
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        match self {
            TimestampFormat::Standard => render(datetime, STANDARD_PATTERN),
            TimestampFormat::Iso8601 => render(datetime, "%Y-%m-%dT%H:%M:%S%.3f%:z"),
            TimestampFormat::Rfc3339 => datetime.to_rfc3339(),
            TimestampFormat::UnixMillis => datetime.timestamp_millis().to_string(),
            TimestampFormat::Custom(format_str) => render(datetime, format_str),
        }
    }
}

fn render<Tz>(datetime: &DateTime<Tz>, pattern: &str) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let mut out = String::new();
    if write!(out, "{}", datetime.format(pattern)).is_err() {
        out.clear();
        let _ = write!(out, "{}", datetime.format(STANDARD_PATTERN));
    }
    out
}

/// Render the suffix appended after `.back` when a file is rotated
pub fn backup_suffix<Tz>(datetime: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    render(datetime, BACKUP_SUFFIX_PATTERN)
}
