//! Declarative logger configuration
//!
//! The types deserialize with `serde`, so callers can keep logger setup in
//! whatever document format they already load. Building is strict: a
//! pattern with error markers is a configuration error here, even though
//! [`LogFormatter::new`] itself accepts it.

use super::appender::Appender;
use super::error::{LoggerError, Result};
use super::formatter::LogFormatter;
use super::log_level::LogLevel;
use super::logger::Logger;
use crate::appenders::{FileAppender, StdoutAppender};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;

/// One logger and its appenders
///
/// # Examples
///
/// ```
/// use lch_log::{LoggerConfig, LogLevel};
///
/// let config: LoggerConfig = serde_json::from_str(r#"{
///     "name": "system",
///     "level": "WARN",
///     "pattern": "%p %m%n",
///     "appenders": [{ "type": "stdout", "level": "ERROR" }]
/// }"#).unwrap();
///
/// let logger = config.build().unwrap();
/// assert_eq!(logger.level(), LogLevel::Warn);
/// assert_eq!(logger.appenders()[0].level(), LogLevel::Error);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggerConfig {
    pub name: String,
    #[serde(default)]
    pub level: LogLevel,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    #[serde(default)]
    pub appenders: Vec<AppenderConfig>,
}

/// Sink description inside a [`LoggerConfig`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum AppenderConfig {
    Stdout {
        #[serde(default)]
        level: LogLevel,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pattern: Option<String>,
    },
    File {
        path: PathBuf,
        #[serde(default)]
        level: LogLevel,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pattern: Option<String>,
    },
}

fn strict_formatter(component: &str, pattern: &str) -> Result<Arc<LogFormatter>> {
    let formatter = LogFormatter::new(pattern);
    if formatter.has_error() {
        return Err(LoggerError::config(
            component,
            format!("invalid pattern '{}'", pattern),
        ));
    }
    Ok(Arc::new(formatter))
}

impl LoggerConfig {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            level: LogLevel::default(),
            pattern: None,
            appenders: Vec::new(),
        }
    }

    /// Build a fresh logger from this config
    pub fn build(&self) -> Result<Arc<Logger>> {
        let logger = Logger::new(self.name.clone());
        logger.set_level(self.level);
        if let Some(ref pattern) = self.pattern {
            logger.set_formatter(strict_formatter(&format!("logger '{}'", self.name), pattern)?);
        }
        for appender in &self.appenders {
            logger.add_appender(appender.build()?);
        }
        Ok(Arc::new(logger))
    }
}

impl AppenderConfig {
    pub fn build(&self) -> Result<Arc<dyn Appender>> {
        let (appender, level, pattern) = match self {
            AppenderConfig::Stdout { level, pattern } => {
                let appender: Arc<dyn Appender> = Arc::new(StdoutAppender::new());
                (appender, level, pattern)
            }
            AppenderConfig::File {
                path,
                level,
                pattern,
            } => {
                let appender: Arc<dyn Appender> = Arc::new(FileAppender::open(path)?);
                (appender, level, pattern)
            }
        };

        appender.set_level(*level);
        if let Some(pattern) = pattern {
            appender.set_formatter(strict_formatter(appender.name(), pattern)?);
        }
        Ok(appender)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults_from_minimal_json() {
        let config: LoggerConfig = serde_json::from_str(r#"{ "name": "app" }"#).unwrap();
        assert_eq!(config, LoggerConfig::new("app"));

        let logger = config.build().unwrap();
        assert_eq!(logger.level(), LogLevel::Debug);
        assert!(logger.appenders().is_empty());
    }

    #[test]
    fn test_file_appender_config() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("app.log");
        let config = LoggerConfig {
            name: "app".to_string(),
            level: LogLevel::Info,
            pattern: Some("%c %p %m%n".to_string()),
            appenders: vec![AppenderConfig::File {
                path: path.clone(),
                level: LogLevel::Debug,
                pattern: None,
            }],
        };

        let logger = config.build().unwrap();
        let appenders = logger.appenders();
        let appender = &appenders[0];
        assert_eq!(appender.name(), "file");
        assert_eq!(appender.formatter().unwrap().pattern(), "%c %p %m%n");
        assert!(path.exists());
    }

    #[test]
    fn test_invalid_pattern_is_rejected() {
        let mut config = LoggerConfig::new("app");
        config.pattern = Some("%d{%Y".to_string());
        let err = config.build().unwrap_err();
        assert!(matches!(err, LoggerError::InvalidConfiguration { .. }));

        let appender = AppenderConfig::Stdout {
            level: LogLevel::Info,
            pattern: Some("%zz".to_string()),
        };
        assert!(appender.build().is_err());
    }

    #[test]
    fn test_unknown_level_fails_to_deserialize() {
        let result: std::result::Result<LoggerConfig, _> =
            serde_json::from_str(r#"{ "name": "app", "level": "LOUD" }"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_unopenable_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let appender = AppenderConfig::File {
            path: dir.path().join("missing-dir").join("app.log"),
            level: LogLevel::Debug,
            pattern: None,
        };
        assert!(matches!(
            appender.build(),
            Err(LoggerError::FileAppenderError { .. })
        ));
    }
}
