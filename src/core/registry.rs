//! Process-wide logger registry

use super::config::LoggerConfig;
use super::error::Result;
use super::logger::{Logger, ROOT_LOGGER_NAME};
use crate::appenders::StdoutAppender;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::{Arc, OnceLock};

static GLOBAL: OnceLock<LoggerManager> = OnceLock::new();

/// Maps logger names to loggers, with a root logger as the fallback.
///
/// Lookups never fail: an unknown name resolves to the root logger. Use
/// [`LoggerManager::global`] for the process-wide instance, or create a
/// private manager and pass it to the code that needs it.
///
/// # Examples
///
/// ```
/// use lch_log::LoggerManager;
/// use std::sync::Arc;
///
/// let manager = LoggerManager::new();
/// let missing = manager.get_logger("missing");
/// assert!(Arc::ptr_eq(&missing, &manager.root()));
/// ```
#[derive(Debug)]
pub struct LoggerManager {
    root: RwLock<Arc<Logger>>,
    loggers: RwLock<HashMap<String, Arc<Logger>>>,
}

impl LoggerManager {
    /// Create a registry whose root logger writes to stdout
    pub fn new() -> Self {
        let root = Arc::new(Logger::root());
        root.add_appender(Arc::new(StdoutAppender::new()));
        Self {
            root: RwLock::new(root),
            loggers: RwLock::new(HashMap::new()),
        }
    }

    /// The process-wide registry, created on first access and never torn down
    pub fn global() -> &'static LoggerManager {
        GLOBAL.get_or_init(|| {
            super::util::init_clock();
            LoggerManager::new()
        })
    }

    pub fn root(&self) -> Arc<Logger> {
        self.root.read().clone()
    }

    /// Look up `name`, falling back to the root logger
    pub fn get_logger(&self, name: &str) -> Arc<Logger> {
        if name == ROOT_LOGGER_NAME {
            return self.root();
        }
        self.loggers
            .read()
            .get(name)
            .cloned()
            .unwrap_or_else(|| self.root())
    }

    /// Whether `name` resolves to something other than the root fallback.
    ///
    /// The root logger itself is never listed here.
    pub fn contains(&self, name: &str) -> bool {
        name != ROOT_LOGGER_NAME && self.loggers.read().contains_key(name)
    }

    /// Register `logger` under its name, returning the logger it replaced.
    ///
    /// A logger named `root` becomes the new root logger and the previous
    /// root is returned.
    pub fn add_logger(&self, logger: Arc<Logger>) -> Option<Arc<Logger>> {
        if logger.name() == ROOT_LOGGER_NAME {
            return Some(std::mem::replace(&mut *self.root.write(), logger));
        }
        self.loggers
            .write()
            .insert(logger.name().to_string(), logger)
    }

    /// Unregister `name`. The root logger cannot be removed.
    pub fn remove_logger(&self, name: &str) -> Option<Arc<Logger>> {
        if name == ROOT_LOGGER_NAME {
            return None;
        }
        self.loggers.write().remove(name)
    }

    /// Names of the registered loggers, sorted. The root logger is not listed.
    pub fn logger_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.loggers.read().keys().cloned().collect();
        names.sort();
        names
    }

    /// Build and register every logger in `configs`.
    ///
    /// Nothing is registered unless all configs build successfully. A
    /// config named `root` reconfigures the root logger in place.
    pub fn apply(&self, configs: &[LoggerConfig]) -> Result<()> {
        let built = configs
            .iter()
            .map(LoggerConfig::build)
            .collect::<Result<Vec<_>>>()?;

        for logger in built {
            if logger.name() == ROOT_LOGGER_NAME {
                // In place, so handles already taken from root() see the change.
                let root = self.root();
                root.set_level(logger.level());
                root.set_formatter(logger.formatter());
                root.clear_appenders();
                for appender in logger.appenders() {
                    root.add_appender(appender);
                }
            } else {
                self.add_logger(logger);
            }
        }
        Ok(())
    }
}

impl Default for LoggerManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_name_falls_back_to_root() {
        let manager = LoggerManager::new();
        let root = manager.get_logger(ROOT_LOGGER_NAME);
        let missing = manager.get_logger("missing");
        assert!(Arc::ptr_eq(&root, &missing));
        assert!(!manager.contains("missing"));
    }

    #[test]
    fn test_root_has_stdout_appender() {
        let manager = LoggerManager::new();
        let appenders = manager.root().appenders();
        assert_eq!(appenders.len(), 1);
        assert_eq!(appenders[0].name(), "stdout");
    }

    #[test]
    fn test_registered_logger_is_returned() {
        let manager = LoggerManager::new();
        let system = Arc::new(Logger::new("system"));
        assert!(manager.add_logger(Arc::clone(&system)).is_none());

        assert!(Arc::ptr_eq(&manager.get_logger("system"), &system));
        assert_eq!(manager.logger_names(), vec!["system".to_string()]);

        let removed = manager.remove_logger("system").unwrap();
        assert!(Arc::ptr_eq(&removed, &system));
        assert!(Arc::ptr_eq(&manager.get_logger("system"), &manager.root()));
    }

    #[test]
    fn test_adding_root_replaces_root() {
        let manager = LoggerManager::new();
        let original = manager.root();
        let mine = Arc::new(Logger::new(ROOT_LOGGER_NAME));

        let replaced = manager.add_logger(Arc::clone(&mine));
        assert!(Arc::ptr_eq(&replaced.unwrap(), &original));

        assert!(Arc::ptr_eq(&manager.get_logger(ROOT_LOGGER_NAME), &mine));
        assert!(Arc::ptr_eq(&manager.get_logger("missing"), &mine));
        assert!(Arc::ptr_eq(&manager.root(), &mine));
        assert!(!manager.contains(ROOT_LOGGER_NAME));
        assert!(manager.logger_names().is_empty());

        assert!(manager.remove_logger(ROOT_LOGGER_NAME).is_none());
        assert!(Arc::ptr_eq(&manager.root(), &mine));
    }

    #[test]
    fn test_global_is_a_singleton() {
        let a = LoggerManager::global();
        let b = LoggerManager::global();
        assert!(std::ptr::eq(a, b));
        assert!(Arc::ptr_eq(&a.root(), &b.get_logger("never-registered")));
    }
}
