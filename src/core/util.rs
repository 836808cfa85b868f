//! Suppliers for the per-event metadata stamped by [`LogEvent::capture`]
//!
//! [`LogEvent::capture`]: super::log_event::LogEvent::capture

use chrono::Utc;
use std::cell::Cell;
use std::sync::OnceLock;
use std::time::Instant;

static PROCESS_START: OnceLock<Instant> = OnceLock::new();

thread_local! {
    static FIBER_ID: Cell<u32> = const { Cell::new(0) };
}

/// Anchor the elapsed-time clock. Called implicitly on first use.
pub fn init_clock() {
    PROCESS_START.get_or_init(Instant::now);
}

/// Milliseconds since the logging clock was anchored
pub fn elapsed_ms() -> u64 {
    let start = PROCESS_START.get_or_init(Instant::now);
    u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX)
}

/// Wall clock time as unix seconds
pub fn unix_time() -> i64 {
    Utc::now().timestamp()
}

/// OS thread id of the calling thread
#[cfg(target_os = "linux")]
pub fn current_thread_id() -> u32 {
    thread_local! {
        static TID: u32 = {
            // SAFETY: gettid takes no arguments and cannot fail.
            let tid = unsafe { libc::syscall(libc::SYS_gettid) };
            u32::try_from(tid).unwrap_or(0)
        };
    }
    TID.with(|tid| *tid)
}

/// Stable per-thread sequence number where no OS thread id is available
#[cfg(not(target_os = "linux"))]
pub fn current_thread_id() -> u32 {
    use std::sync::atomic::{AtomicU32, Ordering};

    static NEXT_ID: AtomicU32 = AtomicU32::new(1);
    thread_local! {
        static TID: u32 = NEXT_ID.fetch_add(1, Ordering::Relaxed);
    }
    TID.with(|tid| *tid)
}

/// Fiber/task id tagged onto events from the calling thread (0 when unset)
pub fn current_fiber_id() -> u32 {
    FIBER_ID.with(Cell::get)
}

/// Set the fiber/task id for the calling thread.
///
/// Cooperative schedulers call this when switching tasks on a thread.
pub fn set_current_fiber_id(id: u32) {
    FIBER_ID.with(|fiber| fiber.set(id));
}
