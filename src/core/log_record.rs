//! Log record structure and the line template

use super::call_site::CallSite;
use super::log_level::LogLevel;
use super::timestamp::TimestampFormat;
use chrono::{DateTime, Local};
use std::fmt::{self, Write as _};

/// Placeholder appended when a `Display` implementation reports an error
/// part-way through rendering a message.
pub const FORMAT_ERROR_MARKER: &str = "<format error>";

/// A single admitted log event. Never mutated after construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogRecord {
    pub level: LogLevel,
    pub message: String,
    pub function: &'static str,
    pub file: &'static str,
    pub line: u32,
    pub timestamp: DateTime<Local>,
}

impl LogRecord {
    /// Replace line breaks and tabs with escape sequences so that every
    /// record occupies exactly one line on disk.
    fn sanitize_message(message: &str) -> String {
        message
            .replace('\n', "\\n")
            .replace('\r', "\\r")
            .replace('\t', "\\t")
    }

    /// Build a record stamped with the current local time
    pub fn new(level: LogLevel, site: CallSite, message: impl fmt::Display) -> Self {
        Self {
            level,
            message: Self::sanitize_message(&render_message(message)),
            function: site.function,
            file: site.file,
            line: site.line,
            timestamp: Local::now(),
        }
    }

    #[must_use]
    pub fn with_timestamp(mut self, timestamp: DateTime<Local>) -> Self {
        self.timestamp = timestamp;
        self
    }

    /// Render the record as one terminated log line
    pub fn format_line(&self, timestamp_format: &TimestampFormat) -> String {
        render_line(
            &timestamp_format.format(&self.timestamp),
            self.level.to_str(),
            self.file,
            self.function,
            self.line,
            &self.message,
        )
    }
}

/// Best-effort rendering of a message.
///
/// A `Display` implementation that returns `Err` does not panic the caller:
/// whatever was written before the failure is kept and
/// [`FORMAT_ERROR_MARKER`] is appended.
pub fn render_message(message: impl fmt::Display) -> String {
    let mut out = String::new();
    if write!(out, "{}", message).is_err() {
        out.push_str(FORMAT_ERROR_MARKER);
    }
    out
}

/// `[<timestamp>] [<LEVEL>] [File:<file>, Func:<func>, Line:<line>] <message>\n`
pub fn render_line(
    timestamp: &str,
    level: &str,
    file: &str,
    function: &str,
    line: u32,
    message: &str,
) -> String {
    format!(
        "[{}] [{}] [File:{}, Func:{}, Line:{}] {}\n",
        timestamp, level, file, function, line, message
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn site() -> CallSite {
        CallSite {
            function: "main",
            file: "x.go",
            line: 42,
        }
    }

    #[test]
    fn test_line_format_is_stable() {
        let line = render_line("T", "INFO", "x.go", "main", 42, "hello");
        assert_eq!(line, "[T] [INFO] [File:x.go, Func:main, Line:42] hello\n");
    }

    #[test]
    fn test_record_format_line() {
        let timestamp = Local
            .with_ymd_and_hms(2024, 3, 22, 23, 13, 50)
            .single()
            .expect("valid local time");
        let record = LogRecord::new(LogLevel::Warning, site(), format_args!("id: {}, name: {}", 2, "George"))
            .with_timestamp(timestamp);

        assert_eq!(
            record.format_line(&TimestampFormat::Standard),
            "[2024-03-22 23:13:50] [WARNING] [File:x.go, Func:main, Line:42] id: 2, name: George\n"
        );
    }

    #[test]
    fn test_message_is_single_line() {
        let record = LogRecord::new(LogLevel::Error, site(), "login\nERROR fake\r\tentry");
        assert_eq!(record.message, "login\\nERROR fake\\r\\tentry");
        assert_eq!(record.format_line(&TimestampFormat::Standard).lines().count(), 1);
    }

    #[test]
    fn test_failing_display_does_not_panic() {
        struct Broken;

        impl fmt::Display for Broken {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("partial")?;
                Err(fmt::Error)
            }
        }

        let record = LogRecord::new(LogLevel::Info, site(), Broken);
        assert_eq!(record.message, format!("partial{}", FORMAT_ERROR_MARKER));
    }
}
