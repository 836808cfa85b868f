//! Named thread example
//!
//! Starts five named threads that log their own identity, then joins them.
//!
//! Run with: cargo run --example threads

use lch_log::prelude::*;
use lch_log::info;
use std::time::Duration;

fn main() -> Result<()> {
    let logger = LoggerManager::global().root();
    info!(logger, "thread test begin");

    let mut threads = Vec::new();
    for i in 0..5 {
        let logger = LoggerManager::global().root();
        let thread = Thread::spawn(format!("name_{}", i), move || {
            let this = Thread::this();
            info!(
                logger,
                "name: {} this.name: {} id: {} this.id: {}",
                Thread::current_name(),
                this.as_ref().map(|t| t.name()).unwrap_or_default(),
                lch_log::core::util::current_thread_id(),
                this.as_ref().map(|t| t.id()).unwrap_or_default()
            );
            std::thread::sleep(Duration::from_millis(100));
        })?;
        threads.push(thread);
    }

    for thread in &mut threads {
        thread.join()?;
    }

    info!(logger, "thread test end");
    Ok(())
}
