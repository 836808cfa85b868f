//! Error types for the logger system
//!
//! Rendering and delivery never fail: malformed patterns degrade to inline
//! markers and sink write failures are counted. The variants below are only
//! returned from the explicit setup and lifecycle APIs.

pub type Result<T> = std::result::Result<T, LoggerError>;

#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    /// Generic IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Pattern rejected by a strict API
    #[error("Invalid log pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },

    /// Invalid configuration with details
    #[error("Invalid configuration for {component}: {message}")]
    InvalidConfiguration { component: String, message: String },

    /// Log file could not be opened
    #[error("File appender error for '{path}': {source}")]
    FileAppenderError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Native thread could not be created
    #[error("Failed to spawn thread '{name}': {source}")]
    ThreadSpawn {
        name: String,
        #[source]
        source: std::io::Error,
    },

    /// Native thread could not be joined
    #[error("Failed to join thread '{name}': {message}")]
    ThreadJoin { name: String, message: String },

    /// Writer error (generic)
    #[error("Writer error: {0}")]
    WriterError(String),
}

impl LoggerError {
    /// Create an invalid pattern error
    pub fn pattern(pattern: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::InvalidPattern {
            pattern: pattern.into(),
            message: message.into(),
        }
    }

    /// Create an invalid configuration error
    pub fn config(component: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::InvalidConfiguration {
            component: component.into(),
            message: message.into(),
        }
    }

    /// Create a file appender error
    pub fn file_appender(path: impl Into<String>, source: std::io::Error) -> Self {
        LoggerError::FileAppenderError {
            path: path.into(),
            source,
        }
    }

    pub fn thread_spawn(name: impl Into<String>, source: std::io::Error) -> Self {
        LoggerError::ThreadSpawn {
            name: name.into(),
            source,
        }
    }

    pub fn thread_join(name: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::ThreadJoin {
            name: name.into(),
            message: message.into(),
        }
    }

    /// Create a writer error (generic)
    pub fn writer<S: Into<String>>(msg: S) -> Self {
        LoggerError::WriterError(msg.into())
    }
}
