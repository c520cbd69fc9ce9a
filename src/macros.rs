//! Logging macros for ergonomic log message formatting.
//!
//! These macros provide a convenient interface for logging with automatic
//! string formatting, similar to `println!` and `format!`. Unlike the
//! leveled methods on [`Logger`](crate::Logger), they also record the name
//! of the enclosing function.
//!
//! The message is only rendered if the level passes the logger's threshold.
//!
//! # Examples
//!
//! ```
//! use rust_rotating_logger::prelude::*;
//! use rust_rotating_logger::info;
//!
//! let logger = Logger::console("info").unwrap();
//!
//! // Basic logging
//! info!(logger, "Server started");
//!
//! // With format arguments
//! let port = 8080;
//! info!(logger, "Server listening on port {}", port);
//!
//! // Complex formatting
//! let user_id = 42;
//! let action = "login";
//! info!(logger, "User {} performed action: {}", user_id, action);
//! ```

/// Log a message with automatic formatting.
///
/// # Examples
///
/// ```
/// # use rust_rotating_logger::prelude::*;
/// # let logger = Logger::console("debug").unwrap();
/// use rust_rotating_logger::log;
/// log!(logger, LogLevel::Info, "Simple message");
/// log!(logger, LogLevel::Error, "Error code: {}", 500);
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, $($arg:tt)+) => {
        $logger.log($level, $crate::call_site!(), format_args!($($arg)+))
    };
}

/// Log a debug-level message.
///
/// # Examples
///
/// ```
/// # use rust_rotating_logger::prelude::*;
/// # let logger = Logger::console("debug").unwrap();
/// use rust_rotating_logger::debug;
/// debug!(logger, "Debug information");
/// debug!(logger, "Counter value: {}", 10);
/// ```
#[macro_export]
macro_rules! debug {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Debug, $($arg)+)
    };
}

/// Log a trace-level message.
///
/// TRACE ranks above DEBUG, so a `trace` threshold hides debug output.
///
/// # Examples
///
/// ```
/// # use rust_rotating_logger::prelude::*;
/// # let logger = Logger::console("trace").unwrap();
/// use rust_rotating_logger::trace;
/// trace!(logger, "Entering function: calculate()");
/// trace!(logger, "Variable value: {}", 42);
/// ```
#[macro_export]
macro_rules! trace {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Trace, $($arg)+)
    };
}

/// Log an info-level message.
///
/// # Examples
///
/// ```
/// # use rust_rotating_logger::prelude::*;
/// # let logger = Logger::console("info").unwrap();
/// use rust_rotating_logger::info;
/// info!(logger, "Server listening on port {}", 8080);
/// ```
#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Info, $($arg)+)
    };
}

/// Log a warning-level message.
///
/// # Examples
///
/// ```
/// # use rust_rotating_logger::prelude::*;
/// # let logger = Logger::console("info").unwrap();
/// use rust_rotating_logger::warning;
/// warning!(logger, "Retrying request {} of {}", 2, 3);
/// ```
#[macro_export]
macro_rules! warning {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Warning, $($arg)+)
    };
}

/// Log an error-level message.
///
/// File loggers also copy ERROR and FATAL records to the `.err` stream.
#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Error, $($arg)+)
    };
}

/// Log a fatal-level message.
///
/// Logging at FATAL does not stop the process; that is left to the caller.
#[macro_export]
macro_rules! fatal {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Fatal, $($arg)+)
    };
}
