//! Basic logger usage example
//!
//! Demonstrates console logging and how the threshold hides lower levels.
//!
//! Run with: cargo run --example basic_usage

use rust_rotating_logger::prelude::*;
use rust_rotating_logger::{debug, error, fatal, info, trace, warning};

fn main() -> Result<()> {
    println!("=== Rust Rotating Logger - Basic Usage Example ===\n");

    let (id, name) = (10, "George");

    println!("1. Logging at every level (threshold DEBUG):");
    let logger = Logger::console("debug")?;
    debug!(logger, "debug record, id: {}, name: {}", id, name);
    trace!(logger, "trace record");
    info!(logger, "info record");
    warning!(logger, "warning record");
    error!(logger, "error record, id: {}, name: {}", id, name);
    fatal!(logger, "fatal record");

    println!("\n2. Threshold WARNING - debug, trace and info are hidden:");
    let logger = Logger::console("warning")?;
    logger.debug("debug record (hidden)");
    logger.info("info record (hidden)");
    logger.warning("warning record (visible)");
    logger.error("error record (visible)");

    println!("\n3. Invalid level names are rejected at construction:");
    match Logger::console("verbose") {
        Ok(_) => println!("   unexpected success"),
        Err(e) => println!("   {}", e),
    }

    #[cfg(feature = "console")]
    {
        println!("\n4. Coloured level tokens:");
        let logger = Logger::new(ConsoleSink::new(LogLevel::Debug)?.with_colors(true));
        info!(logger, "green info");
        error!(logger, "red error");
    }

    println!("\n=== Example completed successfully! ===");

    Ok(())
}
