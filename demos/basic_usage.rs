//! Basic logger usage example
//!
//! Demonstrates a logger with a console appender, level gates and the
//! stream-style event wrap.
//!
//! Run with: cargo run --example basic_usage

use lch_log::prelude::*;
use lch_log::{debug, error, fatal, info, log_event, warn};
use std::fmt::Write;
use std::sync::Arc;

fn main() -> Result<()> {
    println!("=== lch_log - Basic Usage Example ===\n");

    // Create a logger with a console appender
    let logger = Arc::new(Logger::new("basic"));
    logger.add_appender(Arc::new(StdoutAppender::new()));

    println!("1. Logging at different levels (default pattern):");
    debug!(logger, "This is a debug message");
    info!(logger, "This is an info message");
    warn!(logger, "This is a warning message");
    error!(logger, "This is an error message");
    fatal!(logger, "This is a fatal message");

    println!("\n2. Custom pattern:");
    logger.set_pattern("%d{%H:%M:%S}%T[%p]%T[%c]%T%m%n")?;
    info!(logger, "Pattern changed to {}", logger.formatter().pattern());

    println!("\n3. Logging with different minimum levels:");
    logger.set_level(LogLevel::Info);
    println!("   Minimum level set to INFO - debug won't show:");
    debug!(logger, "Debug message (hidden)");
    info!(logger, "Info message (visible)");

    println!("\n4. Stream-style logging:");
    let mut wrap = log_event!(logger, LogLevel::Warn);
    write!(wrap, "disk usage at {}%", 91).ok();
    write!(wrap, ", cleanup scheduled").ok();
    // Delivered here
    drop(wrap);

    println!("\n5. Malformed patterns render markers instead of failing:");
    let broken = Arc::new(Logger::new("broken"));
    broken.add_appender(Arc::new(StdoutAppender::new().with_pattern("%z %m %d{%Y%n")));
    info!(broken, "message before the unterminated brace");
    println!();

    println!("\n6. Registry lookups fall back to root:");
    let manager = LoggerManager::global();
    manager.add_logger(Arc::clone(&logger));
    info!(manager.get_logger("basic"), "found by name");
    info!(manager.get_logger("nobody"), "unknown names log through root");

    println!("\n=== Example completed successfully! ===");

    Ok(())
}
