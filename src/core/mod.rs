//! Core logger types and traits

pub mod call_site;
pub mod config;
pub mod error;
pub mod log_level;
pub mod log_record;
pub mod logger;
pub mod metrics;
pub mod queue;
pub mod sink;
pub mod timestamp;
pub mod worker;

pub use call_site::CallSite;
pub use config::{LoggerConfig, SinkKind};
pub use error::{LoggerError, Result};
pub use log_level::{is_enabled, LogLevel};
pub use log_record::LogRecord;
pub use logger::{Logger, DEFAULT_SHUTDOWN_TIMEOUT};
pub use metrics::LoggerMetrics;
pub use queue::{DispatchQueue, OverflowCallback};
pub use sink::Sink;
pub use timestamp::TimestampFormat;
pub use worker::WorkerPool;
