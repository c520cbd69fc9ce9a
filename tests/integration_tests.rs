//! Integration tests for the rotating logger
//!
//! These tests verify:
//! - Log injection prevention
//! - File logging through the worker pool
//! - Error stream duplication
//! - Rotation driven by the logger
//! - Drop-on-full accounting
//! - Drain-and-close shutdown
//! - Configuration-driven construction

use rust_rotating_logger::prelude::*;
use rust_rotating_logger::{error, fatal, info, warning};
use std::fs;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;

fn read_lines(path: &Path) -> Vec<String> {
    fs::read_to_string(path)
        .unwrap_or_default()
        .lines()
        .map(str::to_string)
        .collect()
}

fn files_with_prefix(dir: &Path, prefix: &str) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .expect("Failed to read dir")
        .filter_map(|e| e.ok())
        .filter_map(|e| e.file_name().into_string().ok())
        .filter(|name| name.starts_with(prefix))
        .collect();
    names.sort();
    names
}

#[test]
fn test_log_injection_prevention() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let mut logger = Logger::file("info", temp_dir.path(), "injection.log", 1024 * 1024)
        .expect("Failed to create logger");

    let malicious_message = "User login\nERROR [2024-10-17] Fake error injected\nINFO Continuation";
    logger.info(malicious_message);
    assert!(logger.shutdown(Duration::from_secs(5)));

    let lines = read_lines(&temp_dir.path().join("injection.log"));
    assert_eq!(lines.len(), 1, "Log should be a single line, not multiple");
    assert!(lines[0].contains("User login\\nERROR [2024-10-17] Fake error injected\\nINFO"));
}

#[test]
fn test_file_logging_end_to_end() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let mut logger = Logger::file("debug", temp_dir.path(), "app.log", 1024 * 1024)
        .expect("Failed to create logger");

    for i in 0..50 {
        info!(logger, "Message {}", i);
    }
    assert!(logger.shutdown(Duration::from_secs(5)));

    let lines = read_lines(&temp_dir.path().join("app.log"));
    assert_eq!(lines.len(), 50, "Should have 50 log entries");
    for line in &lines {
        assert!(line.contains("[INFO] [File:integration_tests.rs, Func:test_file_logging_end_to_end, Line:"));
    }

    let mut numbers: Vec<u32> = lines
        .iter()
        .map(|line| line.rsplit(' ').next().unwrap().parse().unwrap())
        .collect();
    numbers.sort_unstable();
    assert_eq!(numbers, (0..50).collect::<Vec<_>>());

    assert_eq!(logger.metrics().total_logged(), 50);
    assert_eq!(logger.dropped_count(), 0);
}

#[test]
fn test_threshold_filters_file_output() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let mut logger = Logger::file("WARNING", temp_dir.path(), "app.log", 1024 * 1024)
        .expect("Failed to create logger");

    logger.debug("debug");
    logger.trace("trace");
    logger.info("info");
    logger.warning("warning");
    logger.error("error");
    logger.fatal("fatal");
    assert!(logger.shutdown(Duration::from_secs(5)));

    let lines = read_lines(&temp_dir.path().join("app.log"));
    let mut messages: Vec<&str> = lines.iter().map(|l| l.rsplit(' ').next().unwrap()).collect();
    messages.sort_unstable();
    assert_eq!(messages, vec!["error", "fatal", "warning"]);
}

#[test]
fn test_error_stream_duplication() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let mut logger = Logger::file("debug", temp_dir.path(), "svc.log", 1024 * 1024)
        .expect("Failed to create logger");

    info!(logger, "request served");
    warning!(logger, "slow request");
    error!(logger, "request failed: {}", 503);
    fatal!(logger, "out of memory");
    assert!(logger.shutdown(Duration::from_secs(5)));

    let primary = read_lines(&temp_dir.path().join("svc.log"));
    let errors = read_lines(&temp_dir.path().join("svc.log.err"));
    assert_eq!(primary.len(), 4);
    assert_eq!(errors.len(), 2);

    for line in &errors {
        assert!(line.contains("[ERROR]") || line.contains("[FATAL]"));
        assert_eq!(
            primary.iter().filter(|p| *p == line).count(),
            1,
            "error line must appear byte-identical in the primary stream"
        );
    }
    assert_eq!(logger.metrics().error_stream_logged(), 2);
}

#[test]
fn test_rotation_through_logger() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let mut logger = Logger::file("info", temp_dir.path(), "rot.log", 512)
        .expect("Failed to create logger");

    for i in 0..40 {
        info!(logger, "rotation payload line number {:04}", i);
    }
    assert!(logger.shutdown(Duration::from_secs(5)));

    let backups = files_with_prefix(temp_dir.path(), "rot.log.back");
    assert!(!backups.is_empty(), "expected at least one rotated file");
    assert_eq!(logger.metrics().rotation_count(), backups.len() as u64);

    let mut total = read_lines(&temp_dir.path().join("rot.log")).len();
    for backup in &backups {
        let path = temp_dir.path().join(backup);
        let size = fs::metadata(&path).unwrap().len();
        assert!(size >= 512, "rotated file {} is only {} bytes", backup, size);
        total += read_lines(&path).len();
    }
    assert_eq!(total, 40);
}

#[test]
fn test_queue_full_accounts_for_every_record() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let dropped_alerts = Arc::new(AtomicU64::new(0));
    let alerts = Arc::clone(&dropped_alerts);

    let sink = FileSink::builder(temp_dir.path(), "burst.log")
        .level(LogLevel::Debug)
        .queue_capacity(8)
        .workers(1)
        .on_overflow(Arc::new(move |_| {
            alerts.fetch_add(1, Ordering::SeqCst);
        }))
        .build()
        .expect("Failed to create sink");
    let mut logger = Logger::new(sink);

    const SUBMITTED: u64 = 5_000;
    for i in 0..SUBMITTED {
        info!(logger, "burst {}", i);
    }
    assert!(logger.shutdown(Duration::from_secs(10)));

    let written = read_lines(&temp_dir.path().join("burst.log")).len() as u64;
    let metrics = logger.metrics();
    assert_eq!(written, metrics.total_logged());
    assert_eq!(written + metrics.dropped_count(), SUBMITTED);
    assert_eq!(metrics.enqueued_count(), written);
    if metrics.dropped_count() > 0 {
        assert!(dropped_alerts.load(Ordering::SeqCst) >= 1);
    }
}

#[test]
fn test_shutdown_drains_queue() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let sink = FileSink::builder(temp_dir.path(), "drain.log")
        .queue_capacity(10_000)
        .workers(2)
        .build()
        .expect("Failed to create sink");
    let mut logger = Logger::new(sink);

    for i in 0..2_000 {
        info!(logger, "pending {}", i);
    }
    assert!(logger.shutdown(Duration::from_secs(10)));
    assert_eq!(read_lines(&temp_dir.path().join("drain.log")).len(), 2_000);

    // Admission is closed after shutdown
    info!(logger, "too late");
    assert_eq!(logger.dropped_count(), 1);
    assert_eq!(read_lines(&temp_dir.path().join("drain.log")).len(), 2_000);
}

#[test]
fn test_drop_flushes_pending_records() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    {
        let logger = Logger::file("info", temp_dir.path(), "drop.log", 1024 * 1024)
            .expect("Failed to create logger");
        for i in 0..100 {
            logger.info(format_args!("dropping {}", i));
        }
    }
    assert_eq!(read_lines(&temp_dir.path().join("drop.log")).len(), 100);
}

#[test]
fn test_construction_errors() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");

    assert!(matches!(
        Logger::file("loud", temp_dir.path(), "app.log", 1024),
        Err(LoggerError::InvalidLevel { .. })
    ));
    assert!(Logger::console("").is_err());

    // A regular file where the directory should be
    let blocker = temp_dir.path().join("not-a-dir");
    fs::write(&blocker, b"x").unwrap();
    assert!(Logger::file("info", &blocker, "app.log", 1024).is_err());
}

#[test]
fn test_logger_from_ini_config() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log_dir = temp_dir.path().join("logs");
    let config_path = temp_dir.path().join("logger.ini");
    fs::write(
        &config_path,
        format!(
            "[logger]\nsink = file\nlevel = error\ndirectory = {}\nfile_name = cfg.log\nworkers = 1\n",
            log_dir.display()
        ),
    )
    .unwrap();

    let config = LoggerConfig::load(&config_path).expect("Failed to load config");
    let mut logger = Logger::from_config(&config).expect("Failed to build logger");
    assert_eq!(logger.threshold(), LogLevel::Error);

    logger.info("filtered");
    logger.error("kept");
    assert!(logger.shutdown(Duration::from_secs(5)));

    assert_eq!(read_lines(&log_dir.join("cfg.log")).len(), 1);
    assert_eq!(read_lines(&log_dir.join("cfg.log.err")).len(), 1);
}

#[test]
fn test_custom_timestamp_format() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let sink = FileSink::builder(temp_dir.path(), "ts.log")
        .timestamp_format(TimestampFormat::Custom("%Y/%m/%d".to_string()))
        .build()
        .expect("Failed to create sink");
    let mut logger = Logger::new(sink);

    logger.info("dated");
    assert!(logger.shutdown(Duration::from_secs(5)));

    let lines = read_lines(&temp_dir.path().join("ts.log"));
    let timestamp = &lines[0][1..11];
    assert_eq!(timestamp.matches('/').count(), 2);
    assert!(lines[0][11..].starts_with("] [INFO] "));
}
