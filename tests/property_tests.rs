//! Property-based tests for lch_log using proptest

use lch_log::prelude::*;
use proptest::prelude::*;
use std::sync::Arc;

fn render(pattern: &str, message: &str) -> String {
    let logger = Arc::new(Logger::new("prop"));
    let event = LogEvent::new(Arc::clone(&logger), LogLevel::Info, "prop.rs", 1, 0, 1, 0, 0)
        .with_message(message);
    LogFormatter::new(pattern).format(&logger, LogLevel::Info, &event)
}

fn any_level() -> impl Strategy<Value = LogLevel> {
    prop_oneof![
        Just(LogLevel::Unknown),
        Just(LogLevel::Debug),
        Just(LogLevel::Info),
        Just(LogLevel::Warn),
        Just(LogLevel::Error),
        Just(LogLevel::Fatal),
    ]
}

// ============================================================================
// LogLevel Tests
// ============================================================================

proptest! {
    /// Test that LogLevel string conversions roundtrip correctly
    #[test]
    fn test_log_level_str_roundtrip(level in any_level()) {
        let parsed: LogLevel = level.to_str().parse().unwrap();
        prop_assert_eq!(level, parsed);
    }

    /// Test that LogLevel ordering is consistent with the numeric values
    #[test]
    fn test_log_level_ordering(level1 in any_level(), level2 in any_level()) {
        let val1 = level1 as u8;
        let val2 = level2 as u8;

        prop_assert_eq!(level1 <= level2, val1 <= val2);
        prop_assert_eq!(level1 < level2, val1 < val2);
        prop_assert_eq!(level1 >= level2, val1 >= val2);
    }

    /// Test that the %p field prints the level passed to format
    #[test]
    fn test_level_field_matches_display(level in any_level()) {
        let logger = Arc::new(Logger::new("prop"));
        let event = LogEvent::new(Arc::clone(&logger), level, "prop.rs", 1, 0, 1, 0, 0);
        let out = LogFormatter::new("%p").format(&logger, level, &event);
        prop_assert_eq!(out, level.to_string());
    }
}

// ============================================================================
// Pattern Formatter Tests
// ============================================================================

proptest! {
    /// Patterns without '%' render verbatim
    #[test]
    fn test_literal_patterns_render_verbatim(pattern in "[^%]*", message in ".*") {
        prop_assert_eq!(render(&pattern, &message), pattern);
    }

    /// Doubling every '%' of arbitrary text renders the unescaped text
    #[test]
    fn test_escaped_percent_renders_single(text in ".*") {
        let pattern = text.replace('%', "%%");
        prop_assert_eq!(render(&pattern, "ignored"), text);
    }

    /// The message field never alters the message
    #[test]
    fn test_message_field_is_exact(message in ".*") {
        prop_assert_eq!(render("%m", &message), message);
    }

    /// Single-letter keys outside the table render an error marker
    #[test]
    fn test_unknown_single_letter_keys(key in "[a-zA-Z]") {
        prop_assume!(!["m", "p", "r", "c", "t", "n", "d", "f", "l", "T", "F"].contains(&key.as_str()));
        let formatter = LogFormatter::new(format!("%{}", key));
        prop_assert!(formatter.has_error());
        prop_assert_eq!(render(&format!("%{}", key), "x"), format!("<<error_format %{}>>", key));
    }

    /// Formatting never panics, whatever the pattern
    #[test]
    fn test_arbitrary_patterns_never_panic(pattern in ".*", message in ".*") {
        let _ = render(&pattern, &message);
    }

    /// Unterminated sub-formats always produce the pattern error marker
    #[test]
    fn test_unterminated_brace_marker(prefix in "[^%]*", sub in "[^}]*") {
        let pattern = format!("{}%d{{{}", prefix, sub);
        let formatter = LogFormatter::new(pattern.clone());
        prop_assert!(formatter.has_error());
        prop_assert_eq!(render(&pattern, "x"), format!("{}<<pattern_error>>", prefix));
    }
}

// ============================================================================
// Logger Gate Tests
// ============================================================================

proptest! {
    /// An appender sees an event iff it passes both level gates
    #[test]
    fn test_two_level_gates(
        logger_level in any_level(),
        appender_level in any_level(),
        event_level in any_level(),
    ) {
        let logger = Arc::new(Logger::new("gates"));
        logger.set_level(logger_level);
        let buffer = Arc::new(BufferAppender::with_pattern("%m").with_level(appender_level));
        logger.add_appender(buffer.clone());

        let event = LogEvent::capture(Arc::clone(&logger), event_level, file!(), line!())
            .with_message("m");
        logger.log(event_level, &event);

        let expected = event_level >= logger_level && event_level >= appender_level;
        prop_assert_eq!(buffer.len(), usize::from(expected));
    }
}
