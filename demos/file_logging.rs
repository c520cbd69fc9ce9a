//! File logging example
//!
//! Writes a burst of records to `./demo_logs/app.log` with a small size limit
//! so that rotation kicks in. ERROR and FATAL records also land in
//! `app.log.err`.
//!
//! Run with: cargo run --example file_logging

use rust_rotating_logger::prelude::*;
use rust_rotating_logger::{debug, error, fatal, info, trace, warning};
use std::fs;
use std::time::Duration;

fn main() -> Result<()> {
    println!("=== Rust Rotating Logger - File Logging Example ===\n");

    let directory = "demo_logs";
    let mut logger = Logger::file("debug", directory, "app.log", 16 * 1024)?;

    let (id, name) = (10, "George");
    for round in 0..50 {
        debug!(logger, "round {} debug record, id: {}, name: {}", round, id, name);
        trace!(logger, "round {} trace record", round);
        info!(logger, "round {} info record", round);
        warning!(logger, "round {} warning record", round);
        error!(logger, "round {} error record, id: {}, name: {}", round, id, name);
        fatal!(logger, "round {} fatal record", round);
    }

    if !logger.shutdown(Duration::from_secs(5)) {
        eprintln!("Warning: logger shutdown timed out");
    }

    let metrics = logger.metrics();
    println!("Lines written:        {}", metrics.total_logged());
    println!("Error-stream lines:   {}", metrics.error_stream_logged());
    println!("Rotations:            {}", metrics.rotation_count());
    println!("Dropped:              {}", metrics.dropped_count());

    println!("\nFiles in {}/:", directory);
    let mut names: Vec<String> = fs::read_dir(directory)?
        .filter_map(|e| e.ok())
        .filter_map(|e| e.file_name().into_string().ok())
        .collect();
    names.sort();
    for name in names {
        println!("  {}", name);
    }

    println!("\n=== Example completed successfully! ===");
    Ok(())
}
