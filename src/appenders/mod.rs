//! Appender implementations

pub mod buffer;
pub mod console;
pub mod file;

pub use buffer::BufferAppender;
pub use console::StdoutAppender;
pub use file::FileAppender;

pub use crate::core::Appender;
