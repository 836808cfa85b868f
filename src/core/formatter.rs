//! Pattern-based log formatter
//!
//! A layout string is compiled once into a list of [`FormatItem`]s and then
//! rendered for every event. The mini-language:
//!
//! | Key | Renders |
//! |-----|---------|
//! | `%m` | message |
//! | `%p` | level name |
//! | `%r` | milliseconds elapsed since the logging clock started |
//! | `%c` | logger name |
//! | `%t` | thread id |
//! | `%n` | newline |
//! | `%d{fmt}` | local date-time in strftime `fmt` (default `%Y:%m:%d %H:%M:%S`) |
//! | `%f` | file name |
//! | `%l` | line number |
//! | `%T` | tab |
//! | `%F` | fiber id |
//! | `%%` | a literal `%` |
//!
//! Malformed patterns never fail: an unknown key renders as
//! `<<error_format %key>>` and an unterminated `{` renders as
//! `<<pattern_error>>`.

use super::log_event::LogEvent;
use super::log_level::LogLevel;
use super::logger::Logger;
use chrono::format::{Item, StrftimeItems};
use chrono::{Local, TimeZone};
use std::fmt::Write;

/// Layout used by loggers that were not given one explicitly
pub const DEFAULT_PATTERN: &str = "%d{%Y-%m-%d %H:%M:%S}%T%t%T%F%T[%p]%T[%c]%T%f:%l%T%m%n";

/// Sub-format used by `%d` when none (or an empty one) is given
pub const DEFAULT_DATE_FORMAT: &str = "%Y:%m:%d %H:%M:%S";

/// Marker rendered in place of an unterminated `{...}` construct
pub const PATTERN_ERROR_MARKER: &str = "<<pattern_error>>";

/// One renderable segment of a compiled pattern
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormatItem {
    Literal(String),
    Message,
    Level,
    Elapse,
    LoggerName,
    ThreadId,
    FiberId,
    DateTime(String),
    FileName,
    Line,
    Tab,
    NewLine,
    /// Unterminated sub-format; holds what was captured before the pattern ended
    Error(String),
}

type ItemFactory = fn(&str) -> FormatItem;

/// Key table for `%<key>` placeholders
static FORMAT_KEYS: &[(&str, ItemFactory)] = &[
    ("m", |_| FormatItem::Message),
    ("p", |_| FormatItem::Level),
    ("r", |_| FormatItem::Elapse),
    ("c", |_| FormatItem::LoggerName),
    ("t", |_| FormatItem::ThreadId),
    ("n", |_| FormatItem::NewLine),
    ("d", FormatItem::date_time),
    ("f", |_| FormatItem::FileName),
    ("l", |_| FormatItem::Line),
    ("T", |_| FormatItem::Tab),
    ("F", |_| FormatItem::FiberId),
];

impl FormatItem {
    /// Look up the item for a placeholder key
    pub fn from_key(key: &str, sub_format: &str) -> Option<Self> {
        FORMAT_KEYS
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, factory)| factory(sub_format))
    }

    /// `%d` item. Sub-formats chrono cannot render degrade to an error marker.
    fn date_time(sub_format: &str) -> Self {
        let sub_format = if sub_format.is_empty() {
            DEFAULT_DATE_FORMAT
        } else {
            sub_format
        };

        if StrftimeItems::new(sub_format).any(|item| matches!(item, Item::Error)) {
            return FormatItem::Literal(format!("<<error_format %d{{{}}}>>", sub_format));
        }
        FormatItem::DateTime(sub_format.to_string())
    }

    /// Append this item's text for `event` to `out`
    pub fn render(&self, out: &mut String, logger: &Logger, level: LogLevel, event: &LogEvent) {
        // Writing into a String cannot fail.
        let _ = match self {
            FormatItem::Literal(text) => {
                out.push_str(text);
                Ok(())
            }
            FormatItem::Message => {
                out.push_str(event.content());
                Ok(())
            }
            FormatItem::Level => {
                out.push_str(level.to_str());
                Ok(())
            }
            FormatItem::Elapse => write!(out, "{}", event.elapse()),
            FormatItem::LoggerName => {
                out.push_str(logger.name());
                Ok(())
            }
            FormatItem::ThreadId => write!(out, "{}", event.thread_id()),
            FormatItem::FiberId => write!(out, "{}", event.fiber_id()),
            FormatItem::DateTime(sub_format) => match Local.timestamp_opt(event.time(), 0).single()
            {
                Some(datetime) => write!(out, "{}", datetime.format(sub_format)),
                None => write!(out, "{}", event.time()),
            },
            FormatItem::FileName => {
                out.push_str(event.file());
                Ok(())
            }
            FormatItem::Line => write!(out, "{}", event.line()),
            FormatItem::Tab => {
                out.push('\t');
                Ok(())
            }
            FormatItem::NewLine => {
                out.push('\n');
                Ok(())
            }
            FormatItem::Error(_) => {
                out.push_str(PATTERN_ERROR_MARKER);
                Ok(())
            }
        };
    }
}

/// Compiled layout, shared by reference among appenders
///
/// # Examples
///
/// ```
/// use lch_log::core::{FormatItem, LogFormatter};
///
/// let formatter = LogFormatter::new("[%p] %m%n");
/// assert_eq!(formatter.items()[0], FormatItem::Literal("[".to_string()));
/// assert_eq!(formatter.items()[1], FormatItem::Level);
/// assert!(!formatter.has_error());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogFormatter {
    pattern: String,
    items: Vec<FormatItem>,
    has_error: bool,
}

/// Placeholder scan state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    /// Reading the key
    Bare,
    /// Inside `{...}`
    SubFormat,
    /// `}` consumed
    Closed,
}

impl LogFormatter {
    /// Compile `pattern`. Never fails; see the module docs for how errors render.
    pub fn new(pattern: impl Into<String>) -> Self {
        let pattern = pattern.into();
        let (items, has_error) = Self::parse(&pattern);
        if has_error {
            eprintln!("[LOGGER WARNING] pattern parse error: {:?}", pattern);
        }

        Self {
            pattern,
            items,
            has_error,
        }
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn items(&self) -> &[FormatItem] {
        &self.items
    }

    /// Whether any segment of the pattern degraded to an error marker
    pub fn has_error(&self) -> bool {
        self.has_error
    }

    /// Render `event` through every item in pattern order
    pub fn format(&self, logger: &Logger, level: LogLevel, event: &LogEvent) -> String {
        let mut out = String::with_capacity(self.pattern.len() + event.content().len() + 32);
        for item in &self.items {
            item.render(&mut out, logger, level, event);
        }
        out
    }

    fn parse(pattern: &str) -> (Vec<FormatItem>, bool) {
        let chars: Vec<char> = pattern.chars().collect();
        let mut items = Vec::new();
        let mut has_error = false;
        let mut literal = String::new();
        let mut i = 0;

        while i < chars.len() {
            if chars[i] != '%' {
                literal.push(chars[i]);
                i += 1;
                continue;
            }

            if chars.get(i + 1) == Some(&'%') {
                literal.push('%');
                i += 2;
                continue;
            }

            let key_start = i + 1;
            let mut n = key_start;
            let mut state = ScanState::Bare;
            let mut key_end = chars.len();
            let mut sub_start = 0;
            let mut sub_end = 0;

            while n < chars.len() {
                let c = chars[n];
                match state {
                    ScanState::Bare => {
                        if c == '{' {
                            key_end = n;
                            state = ScanState::SubFormat;
                            sub_start = n + 1;
                        } else if !c.is_ascii_alphabetic() && c != '}' {
                            key_end = n;
                            break;
                        }
                    }
                    ScanState::SubFormat => {
                        if c == '}' {
                            sub_end = n;
                            state = ScanState::Closed;
                            break;
                        }
                    }
                    ScanState::Closed => break,
                }
                n += 1;
            }

            if !literal.is_empty() {
                items.push(FormatItem::Literal(std::mem::take(&mut literal)));
            }

            let key: String = chars[key_start..key_end.min(n)].iter().collect();
            match state {
                ScanState::Bare => {
                    items.push(Self::resolve(&key, "", &mut has_error));
                    i = n;
                }
                ScanState::SubFormat => {
                    let partial: String = chars[sub_start..].iter().collect();
                    items.push(FormatItem::Error(partial));
                    has_error = true;
                    i = chars.len();
                }
                ScanState::Closed => {
                    let sub_format: String = chars[sub_start..sub_end].iter().collect();
                    items.push(Self::resolve(&key, &sub_format, &mut has_error));
                    i = n + 1;
                }
            }
        }

        if !literal.is_empty() {
            items.push(FormatItem::Literal(literal));
        }
        (items, has_error)
    }

    fn resolve(key: &str, sub_format: &str, has_error: &mut bool) -> FormatItem {
        match FormatItem::from_key(key, sub_format) {
            // A known key only yields a literal when its sub-format was rejected.
            Some(item) => {
                *has_error |= matches!(item, FormatItem::Literal(_));
                item
            }
            None => {
                *has_error = true;
                let shown = if key.is_empty() { "null" } else { key };
                FormatItem::Literal(format!("<<error_format %{}>>", shown))
            }
        }
    }
}

impl Default for LogFormatter {
    fn default() -> Self {
        Self::new(DEFAULT_PATTERN)
    }
}
