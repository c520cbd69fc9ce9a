//! # Rust Rotating Logger
//!
//! A leveled logging engine with an asynchronous, size-rotating file sink.
//!
//! ## Features
//!
//! - **Severity gate**: `DEBUG < TRACE < INFO < WARNING < ERROR < FATAL`
//! - **Console sink**: synchronous, unbuffered lines on stdout
//! - **File sink**: bounded drop-on-full queue drained by a worker pool
//! - **Rotation**: files past the size limit are renamed to
//!   `<name>.back<timestamp>` and reopened
//! - **Error stream**: ERROR and FATAL records are copied to `<name>.err`
//!
//! Every record is one line:
//!
//! ```text
//! [2025-01-08 10:30:45] [INFO] [File:main.rs, Func:main, Line:42] hello
//! ```
//!
//! ## Example
//!
//! ```no_run
//! use rust_rotating_logger::prelude::*;
//! use rust_rotating_logger::{error, info};
//! use std::time::Duration;
//!
//! let mut logger = Logger::file("info", "logs", "app.log", 10 * 1024 * 1024)?;
//! info!(logger, "listening on {}", "0.0.0.0:8080");
//! error!(logger, "upstream {} unreachable", "db-1");
//!
//! logger.shutdown(Duration::from_secs(5));
//! # Ok::<(), LoggerError>(())
//! ```

pub mod appenders;
pub mod core;
pub mod macros;

pub mod prelude {
    pub use crate::appenders::{ConsoleSink, FileSink, FileSinkBuilder};
    pub use crate::core::{
        CallSite, LogLevel, LogRecord, Logger, LoggerConfig, LoggerError, LoggerMetrics,
        OverflowCallback, Result, Sink, SinkKind, TimestampFormat, DEFAULT_SHUTDOWN_TIMEOUT,
    };
}

pub use appenders::{ConsoleSink, FileSink, FileSinkBuilder};
pub use self::core::{
    CallSite, LogLevel, LogRecord, Logger, LoggerConfig, LoggerError, LoggerMetrics,
    OverflowCallback, Result, Sink, SinkKind, TimestampFormat, DEFAULT_SHUTDOWN_TIMEOUT,
};
