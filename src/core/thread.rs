//! Named threads with a thread-local identity
//!
//! A [`Thread`] publishes its [`ThreadInfo`] and name into thread-local
//! storage from inside the new thread, before the user callback runs, so
//! [`Thread::this`] and [`Thread::current_name`] are valid from the first
//! line of the callback.

use super::error::{LoggerError, Result};
use super::registry::LoggerManager;
use super::util;
use parking_lot::RwLock;
use std::cell::RefCell;
use std::fmt;
use std::io;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Barrier};
use std::thread::{self, JoinHandle};

/// Name reported for threads that never set one
pub const UNKNOWN_THREAD_NAME: &str = "UNKNOWN";

/// Logger that thread lifecycle failures are reported through
const SYSTEM_LOGGER: &str = "system";

thread_local! {
    static CURRENT_THREAD: RefCell<Option<Arc<ThreadInfo>>> = const { RefCell::new(None) };
    static CURRENT_NAME: RefCell<String> = RefCell::new(UNKNOWN_THREAD_NAME.to_string());
}

/// Identity of a thread started through [`Thread::spawn`]
#[derive(Debug)]
pub struct ThreadInfo {
    name: RwLock<String>,
    id: AtomicU32,
}

impl ThreadInfo {
    fn new(name: String) -> Self {
        Self {
            name: RwLock::new(name),
            id: AtomicU32::new(0),
        }
    }

    pub fn name(&self) -> String {
        self.name.read().clone()
    }

    /// OS thread id; 0 until the thread has started
    pub fn id(&self) -> u32 {
        self.id.load(Ordering::Acquire)
    }
}

/// A native thread with a name and a published identity.
///
/// Dropping a `Thread` without joining detaches it.
///
/// # Examples
///
/// ```
/// use lch_log::Thread;
///
/// let mut worker = Thread::spawn("worker", || {
///     assert_eq!(Thread::current_name(), "worker");
///     assert_eq!(Thread::this().unwrap().name(), "worker");
/// })
/// .unwrap();
///
/// assert!(worker.id() > 0);
/// worker.join().unwrap();
/// ```
pub struct Thread {
    info: Arc<ThreadInfo>,
    handle: Option<JoinHandle<()>>,
}

impl Thread {
    /// Start `cb` on a new thread called `name` ("UNKNOWN" if empty).
    ///
    /// Returns once the new thread has published its identity.
    pub fn spawn<F>(name: impl Into<String>, cb: F) -> Result<Self>
    where
        F: FnOnce() + Send + 'static,
    {
        let mut name = name.into();
        if name.is_empty() {
            name = UNKNOWN_THREAD_NAME.to_string();
        }

        if name.contains('\0') {
            let e = io::Error::new(
                io::ErrorKind::InvalidInput,
                "thread name may not contain interior NUL bytes",
            );
            return Err(Self::spawn_failed(name, e));
        }

        let info = Arc::new(ThreadInfo::new(name.clone()));
        let published = Arc::new(Barrier::new(2));

        let child_info = Arc::clone(&info);
        let child_published = Arc::clone(&published);
        let spawned = thread::Builder::new().name(name.clone()).spawn(move || {
            child_info
                .id
                .store(util::current_thread_id(), Ordering::Release);
            CURRENT_NAME.with(|current| *current.borrow_mut() = child_info.name());
            CURRENT_THREAD.with(|current| *current.borrow_mut() = Some(child_info));
            child_published.wait();

            cb();
        });

        let handle = match spawned {
            Ok(handle) => handle,
            Err(e) => return Err(Self::spawn_failed(name, e)),
        };
        published.wait();

        Ok(Self {
            info,
            handle: Some(handle),
        })
    }

    fn spawn_failed(name: String, e: io::Error) -> LoggerError {
        let logger = LoggerManager::global().get_logger(SYSTEM_LOGGER);
        crate::error!(logger, "thread spawn failed, name={:?} error={}", name, e);
        LoggerError::thread_spawn(name, e)
    }

    /// Block until the thread's callback returns.
    ///
    /// A callback that panicked is reported as [`LoggerError::ThreadJoin`].
    /// Joining twice is a no-op.
    pub fn join(&mut self) -> Result<()> {
        let Some(handle) = self.handle.take() else {
            return Ok(());
        };

        handle.join().map_err(|panic| {
            let message = if let Some(s) = panic.downcast_ref::<&str>() {
                s.to_string()
            } else if let Some(s) = panic.downcast_ref::<String>() {
                s.clone()
            } else {
                "Unknown panic".to_string()
            };

            let name = self.info.name();
            let logger = LoggerManager::global().get_logger(SYSTEM_LOGGER);
            crate::error!(logger, "thread join failed, name={} panic={}", name, message);
            LoggerError::thread_join(name, message)
        })
    }

    pub fn name(&self) -> String {
        self.info.name()
    }

    pub fn id(&self) -> u32 {
        self.info.id()
    }

    pub fn info(&self) -> &Arc<ThreadInfo> {
        &self.info
    }

    /// Identity of the calling thread, if it was started by [`Thread::spawn`]
    pub fn this() -> Option<Arc<ThreadInfo>> {
        CURRENT_THREAD.with(|current| current.borrow().clone())
    }

    /// Name of the calling thread ("UNKNOWN" until set)
    pub fn current_name() -> String {
        CURRENT_NAME.with(|current| current.borrow().clone())
    }

    /// Rename the calling thread's logging identity
    pub fn set_current_name(name: impl Into<String>) {
        let name = name.into();
        CURRENT_THREAD.with(|current| {
            if let Some(ref info) = *current.borrow() {
                *info.name.write() = name.clone();
            }
        });
        CURRENT_NAME.with(|current| *current.borrow_mut() = name);
    }
}

impl fmt::Debug for Thread {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Thread")
            .field("name", &self.info.name())
            .field("id", &self.info.id())
            .field("joined", &self.handle.is_none())
            .finish()
    }
}
