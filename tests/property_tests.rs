//! Property-based tests for rust_logger_facade using proptest

use proptest::prelude::*;
use rust_logger_facade::prelude::*;

fn any_level() -> impl Strategy<Value = LogLevel> {
    prop_oneof![
        Just(LogLevel::Trace),
        Just(LogLevel::Debug),
        Just(LogLevel::Info),
        Just(LogLevel::Warn),
        Just(LogLevel::Error),
        Just(LogLevel::Fatal),
    ]
}

fn json_logger(buffer: &SharedBuffer) -> Logger {
    LoggerConfig::production()
        .with_level(LogLevel::Trace)
        .with_stacktrace_level(None)
        .with_buffer(buffer.clone())
        .build()
        .unwrap()
}

fn console_logger(buffer: &SharedBuffer) -> Logger {
    LoggerConfig::development()
        .with_level(LogLevel::Trace)
        .with_colors(false)
        .with_stacktrace_level(None)
        .with_buffer(buffer.clone())
        .build()
        .unwrap()
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

    /// Test that LogLevel ordering is consistent
    #[test]
    fn test_log_level_ordering(level1 in any_level(), level2 in any_level()) {
        let val1 = level1 as u8;
        let val2 = level2 as u8;

        prop_assert_eq!(level1 <= level2, val1 <= val2);
        prop_assert_eq!(level1 < level2, val1 < val2);
    }

    /// Test that LogLevel JSON serialization is lower-case and roundtrips
    #[test]
    fn test_log_level_json_serialization(level in any_level()) {
        let json = serde_json::to_string(&level).unwrap();
        prop_assert_eq!(json.trim_matches('"'), level.to_lowercase_str());

        let back: LogLevel = serde_json::from_str(&json).unwrap();
        prop_assert_eq!(back, level);
    }
}

// ============================================================================
// Mode Parsing Tests
// ============================================================================

proptest! {
    /// Any string other than the two mode names is rejected
    #[test]
    fn test_unknown_mode_rejected(input in ".*") {
        prop_assume!(input != "development" && input != "production");

        let err = input.parse::<Mode>().unwrap_err();
        prop_assert!(err.is_configuration());
        prop_assert!(err.to_string().contains("invalid mode"));
    }

    /// Case variations of valid names are not modes
    #[test]
    fn test_mode_parse_is_exact(upper in proptest::collection::vec(any::<bool>(), 11)) {
        let name: String = "development"
            .chars()
            .zip(upper.iter())
            .map(|(c, up)| if *up { c.to_ascii_uppercase() } else { c })
            .collect();

        prop_assert_eq!(name.parse::<Mode>().is_ok(), name == "development");
    }
}

// ============================================================================
// Message Sanitization Tests (Security Critical!)
// ============================================================================

proptest! {
    /// Test that control characters never survive into a console line
    #[test]
    fn test_message_sanitization(message in "(?s).*") {
        let buffer = SharedBuffer::new();
        console_logger(&buffer).info(&message);

        let output = buffer.contents();
        let line = output.strip_suffix('\n').unwrap_or(output.as_str());
        prop_assert!(!line.contains('\n'));
        prop_assert!(!line.contains('\r'));
        prop_assert!(!line.contains('\t'));

        if message.contains('\n') {
            prop_assert!(line.contains("\\n"));
        }
    }

    /// JSON records keep the message exactly as logged
    #[test]
    fn test_json_message_roundtrip(message in "(?s).*") {
        let buffer = SharedBuffer::new();
        json_logger(&buffer).info(&message);

        let lines = buffer.lines();
        prop_assert_eq!(lines.len(), 1);
        let record: serde_json::Value = serde_json::from_str(&lines[0]).unwrap();
        prop_assert_eq!(record["msg"].as_str(), Some(message.as_str()));
    }

    /// Test that log injection attacks cannot forge a second record
    #[test]
    fn test_log_injection_prevention(
        legitimate_msg in "[a-zA-Z0-9 ]+",
        injected_level in prop_oneof![Just("ERROR"), Just("WARN"), Just("FATAL")]
    ) {
        let buffer = SharedBuffer::new();
        let logger = json_logger(&buffer);

        logger.info(format!("{}\n{}: Fake admin login", legitimate_msg, injected_level));

        prop_assert_eq!(buffer.lines().len(), 1);
    }
}

// ============================================================================
// Field Encoding Tests
// ============================================================================

proptest! {
    /// A string field appears under its key with the same value
    #[test]
    fn test_string_field_roundtrip(
        key in prop_oneof![
            "[a-z][a-z0-9_]{0,15}",
            Just("level".to_string()),
            Just("ts".to_string()),
            Just("caller".to_string()),
            Just("msg".to_string()),
        ],
        value in ".*"
    ) {
        let buffer = SharedBuffer::new();
        json_logger(&buffer).info_with("record", &[Field::string(key.clone(), value.clone())]);

        let record: serde_json::Value = serde_json::from_str(&buffer.lines()[0]).unwrap();
        let stored_under = if EncoderConfig::production().is_reserved_key(&key) {
            format!("fields.{}", key)
        } else {
            key.clone()
        };
        prop_assert_eq!(record[stored_under.as_str()].as_str(), Some(value.as_str()));
        prop_assert_eq!(record["msg"].as_str(), Some("record"));
        prop_assert_eq!(record["level"].as_str(), Some("info"));
    }

    /// 64-bit integers survive JSON encoding without precision loss
    #[test]
    fn test_int64_fidelity(n in any::<i64>()) {
        let buffer = SharedBuffer::new();
        json_logger(&buffer).info_with("number", &[Field::int64("n", n)]);

        let record: serde_json::Value = serde_json::from_str(&buffer.lines()[0]).unwrap();
        prop_assert_eq!(record["n"].as_i64(), Some(n));
    }

    /// Every production record is a single JSON object line
    #[test]
    fn test_json_record_single_line(
        message in ".*",
        level in any_level(),
        values in proptest::collection::vec(any::<f64>(), 0..5)
    ) {
        let buffer = SharedBuffer::new();
        let fields: Vec<Field> = values
            .iter()
            .enumerate()
            .map(|(i, v)| Field::float64(format!("f{}", i), *v))
            .collect();
        json_logger(&buffer).log_with(level, &message, &fields);

        let lines = buffer.lines();
        prop_assert_eq!(lines.len(), 1);
        let record: serde_json::Value = serde_json::from_str(&lines[0]).unwrap();
        prop_assert_eq!(record["level"].as_str(), Some(level.to_lowercase_str()));
    }
}

// ============================================================================
// Nop Logger Tests
// ============================================================================

proptest! {
    /// A nop logger accepts anything and does nothing
    #[test]
    fn test_nop_logger_is_silent(
        message in ".*",
        level in any_level(),
        field_count in 0usize..20
    ) {
        let logger = new_nop();
        let err = std::io::Error::new(std::io::ErrorKind::Other, "boom");
        let fields: Vec<Field> = (0..field_count)
            .map(|i| Field::named_error(format!("e{}", i), &err))
            .collect();

        logger.log_with(level, &message, &fields);
        logger.sugar().error_with(&message, &fields);

        prop_assert!(!logger.enabled(level));
        prop_assert_eq!(logger.metrics().total_logged(), 0);
        prop_assert!(logger.flush().is_ok());
    }
}
