//! Stress tests for concurrent logging
//!
//! These tests verify:
//! - No event is lost or torn when many threads share one logger
//! - Appenders can be added and removed while other threads log
//! - The registry tolerates concurrent lookups and registrations
//! - Named threads keep distinct identities under load

use lch_log::appenders::{Appender, BufferAppender, FileAppender};
use lch_log::core::{LogLevel, Logger, LoggerManager, Thread};
use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Barrier};
use tempfile::TempDir;

const THREADS: usize = 8;
const EVENTS_PER_THREAD: usize = 500;

/// Every event from every thread lands in the buffer exactly once
#[test]
fn test_concurrent_logging_loses_nothing() {
    let logger = Arc::new(Logger::new("stress"));
    let buffer = Arc::new(BufferAppender::with_pattern("%m"));
    logger.add_appender(buffer.clone());

    let handles: Vec<_> = (0..THREADS)
        .map(|t| {
            let logger = Arc::clone(&logger);
            std::thread::spawn(move || {
                for i in 0..EVENTS_PER_THREAD {
                    lch_log::info!(logger, "{}-{}", t, i);
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().expect("Logging thread panicked");
    }

    let lines = buffer.lines();
    assert_eq!(lines.len(), THREADS * EVENTS_PER_THREAD);

    let unique: HashSet<_> = lines.iter().collect();
    assert_eq!(unique.len(), lines.len(), "duplicate events delivered");
}

/// Lines written to a file by concurrent threads are never interleaved
#[test]
fn test_concurrent_file_lines_are_whole() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log_file = temp_dir.path().join("stress.log");

    let logger = Arc::new(Logger::new("stress"));
    logger.set_pattern("[%p] %m%n").expect("valid pattern");
    let appender = Arc::new(FileAppender::open(&log_file).expect("Failed to create appender"));
    logger.add_appender(appender.clone());

    let handles: Vec<_> = (0..THREADS)
        .map(|t| {
            let logger = Arc::clone(&logger);
            std::thread::spawn(move || {
                for i in 0..EVENTS_PER_THREAD {
                    lch_log::warn!(logger, "thread {} event {}", t, i);
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().expect("Logging thread panicked");
    }

    let content = std::fs::read_to_string(&log_file).expect("Failed to read log file");
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), THREADS * EVENTS_PER_THREAD);
    for line in &lines {
        assert!(
            line.starts_with("[WARN] thread ") && line.contains(" event "),
            "torn line: {:?}",
            line
        );
    }
    assert_eq!(
        appender.metrics().written_count(),
        (THREADS * EVENTS_PER_THREAD) as u64
    );
    assert_eq!(appender.metrics().failed_count(), 0);
}

/// Mutating the appender list while logging neither panics nor deadlocks
#[test]
fn test_appender_churn_while_logging() {
    let logger = Arc::new(Logger::new("churn"));
    let stable = Arc::new(BufferAppender::with_pattern("%m"));
    logger.add_appender(stable.clone());

    let running = Arc::new(AtomicBool::new(true));

    let churner = {
        let logger = Arc::clone(&logger);
        let running = Arc::clone(&running);
        std::thread::spawn(move || {
            while running.load(Ordering::Relaxed) {
                let transient: Arc<dyn Appender> = Arc::new(BufferAppender::new());
                logger.add_appender(Arc::clone(&transient));
                logger.del_appender(&transient);
            }
        })
    };

    let writers: Vec<_> = (0..4)
        .map(|t| {
            let logger = Arc::clone(&logger);
            std::thread::spawn(move || {
                for i in 0..EVENTS_PER_THREAD {
                    lch_log::info!(logger, "{}-{}", t, i);
                }
            })
        })
        .collect();

    for writer in writers {
        writer.join().expect("Logging thread panicked");
    }
    running.store(false, Ordering::Relaxed);
    churner.join().expect("Churn thread panicked");

    assert_eq!(stable.len(), 4 * EVENTS_PER_THREAD);
    assert_eq!(logger.appenders().len(), 1);
}

/// Level changes racing with logging only ever gate whole events
#[test]
fn test_level_changes_while_logging() {
    let logger = Arc::new(Logger::new("levels"));
    let buffer = Arc::new(BufferAppender::with_pattern("%p"));
    logger.add_appender(buffer.clone());

    let toggler = {
        let logger = Arc::clone(&logger);
        std::thread::spawn(move || {
            for i in 0..1000 {
                let level = if i % 2 == 0 {
                    LogLevel::Error
                } else {
                    LogLevel::Debug
                };
                logger.set_level(level);
            }
        })
    };

    for _ in 0..EVENTS_PER_THREAD {
        lch_log::debug!(logger, "maybe");
        lch_log::error!(logger, "always");
    }
    toggler.join().expect("Toggle thread panicked");

    let lines = buffer.lines();
    let errors = lines.iter().filter(|l| l.as_str() == "ERROR").count();
    assert_eq!(errors, EVENTS_PER_THREAD);
    assert!(lines.iter().all(|l| l == "ERROR" || l == "DEBUG"));
}

/// Concurrent registrations and lookups see either the logger or the root
#[test]
fn test_registry_concurrent_access() {
    let manager = Arc::new(LoggerManager::new());

    let handles: Vec<_> = (0..THREADS)
        .map(|t| {
            let manager = Arc::clone(&manager);
            std::thread::spawn(move || {
                let name = format!("worker-{}", t);
                for _ in 0..100 {
                    let found = manager.get_logger(&name);
                    assert!(found.name() == name || found.name() == "root");
                    manager.add_logger(Arc::new(Logger::new(name.clone())));
                }
                assert_eq!(manager.get_logger(&name).name(), name);
            })
        })
        .collect();

    for handle in handles {
        handle.join().expect("Registry thread panicked");
    }

    assert_eq!(manager.logger_names().len(), THREADS);
}

/// Each named thread reports its own name and a distinct id
#[test]
fn test_many_named_threads() {
    let logger = Arc::new(Logger::new("threads"));
    let buffer = Arc::new(BufferAppender::with_pattern("%t %m"));
    logger.add_appender(buffer.clone());
    // Keeps every thread alive until all have started so ids cannot be reused.
    let all_started = Arc::new(Barrier::new(THREADS));

    let mut threads: Vec<Thread> = (0..THREADS)
        .map(|t| {
            let logger = Arc::clone(&logger);
            let all_started = Arc::clone(&all_started);
            Thread::spawn(format!("name_{}", t), move || {
                all_started.wait();
                for _ in 0..10 {
                    lch_log::info!(logger, "{}", Thread::current_name());
                }
            })
            .expect("thread spawns")
        })
        .collect();

    for thread in &mut threads {
        thread.join().expect("thread joins");
    }

    let ids: HashSet<u32> = threads.iter().map(Thread::id).collect();
    assert_eq!(ids.len(), THREADS);

    let lines = buffer.lines();
    assert_eq!(lines.len(), THREADS * 10);
    for thread in &threads {
        let expected = format!("{} {}", thread.id(), thread.name());
        assert_eq!(lines.iter().filter(|l| **l == expected).count(), 10);
    }
}
