//! Concurrent producers example
//!
//! Several threads log through one file logger while a deliberately small
//! queue forces drops. Drops never block or fail the producers; they only
//! show up in the metrics and the overflow callback.
//!
//! Run with: cargo run --example async_logging

use rust_rotating_logger::prelude::*;
use rust_rotating_logger::info;
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

fn main() -> Result<()> {
    println!("=== Rust Rotating Logger - Concurrent Producers Example ===\n");

    let config = LoggerConfig::from_ini_str(
        "[logger]\nsink = file\nlevel = info\ndirectory = demo_logs\nfile_name = async.log\n\
         max_size_bytes = 1048576\nqueue_capacity = 256\nworkers = 2\n",
    )?;
    config.validate()?;

    let sink = FileSink::builder(&config.directory, config.file_name.as_str())
        .level(LogLevel::parse(&config.level)?)
        .max_size(config.max_size_bytes)
        .queue_capacity(config.queue_capacity)
        .workers(config.workers)
        .on_overflow(Arc::new(|dropped| {
            eprintln!("[overflow] {} records dropped so far", dropped);
        }))
        .build()?;
    let mut logger = Logger::new(sink);

    let start = Instant::now();
    thread::scope(|scope| {
        for producer in 0..4 {
            let logger = &logger;
            scope.spawn(move || {
                for seq in 0..10_000 {
                    info!(logger, "producer {} record {}", producer, seq);
                }
            });
        }
    });
    println!("Producers finished in {:?}", start.elapsed());

    logger.shutdown(Duration::from_secs(10));

    let metrics = logger.metrics();
    println!("Enqueued: {}", metrics.enqueued_count());
    println!("Written:  {}", metrics.total_logged());
    println!("Dropped:  {} ({:.2}%)", metrics.dropped_count(), metrics.drop_rate());

    println!("\n=== Example completed successfully! ===");
    Ok(())
}
