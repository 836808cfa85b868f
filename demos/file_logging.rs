//! File logging example
//!
//! Demonstrates logging to console and file appenders simultaneously,
//! configuration from JSON, and reopening a file after rotation.
//!
//! Run with: cargo run --example file_logging

use lch_log::prelude::*;
use lch_log::{debug, error, info, warn};
use std::sync::Arc;

const CONFIG: &str = r#"[
    {
        "name": "system",
        "level": "INFO",
        "pattern": "%d{%Y-%m-%d %H:%M:%S}%T[%p]%T[%c]%T%m%n",
        "appenders": [
            { "type": "stdout" },
            { "type": "file", "path": "system.log", "level": "WARN" }
        ]
    }
]"#;

fn main() -> Result<()> {
    println!("=== lch_log - File Logging Example ===\n");

    // Build a logger with both console and file appenders
    let file = Arc::new(FileAppender::open("application.log")?);
    let logger = Logger::builder("app")
        .pattern("%d{%Y-%m-%d %H:%M:%S}%T[%p]%T%f:%l%T%m%n")
        .appender(StdoutAppender::new())
        .shared_appender(file.clone())
        .build();

    println!("1. Logging to both console and file:");
    info!(logger, "Application started");
    debug!(logger, "Loading configuration...");
    info!(logger, "Configuration loaded successfully");
    warn!(logger, "Using default settings for some options");
    error!(logger, "Failed to load optional plugin");

    println!("\n2. Performing some operations:");
    for i in 1..=5 {
        info!(logger, "Processing item {}/5", i);
        if i == 3 {
            warn!(logger, "Item 3 took longer than expected");
        }
    }

    println!("\n3. Reopening the file (e.g. after external rotation):");
    file.try_reopen()?;
    info!(logger, "Written to a fresh application.log");
    println!(
        "   written={} failed={}",
        file.metrics().written_count(),
        file.metrics().failed_count()
    );

    println!("\n4. Loggers from JSON configuration:");
    let configs: Vec<LoggerConfig> = serde_json::from_str(CONFIG)
        .map_err(|e| LoggerError::config("json", e.to_string()))?;
    let manager = LoggerManager::global();
    manager.apply(&configs)?;

    let system = manager.get_logger("system");
    info!(system, "console only");
    warn!(system, "console and system.log");

    logger.flush()?;
    system.flush()?;

    println!("\n=== Example completed successfully! ===");
    println!("Check 'application.log' and 'system.log' for the file output");

    Ok(())
}
