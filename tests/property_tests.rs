//! Property-based tests for rust_rotating_logger using proptest

use proptest::prelude::*;
use rust_rotating_logger::appenders::RotatingFile;
use rust_rotating_logger::core::log_level::is_enabled;
use rust_rotating_logger::core::log_record::render_line;
use rust_rotating_logger::prelude::*;
use std::fs;
use tempfile::TempDir;

fn any_level() -> impl Strategy<Value = LogLevel> {
    prop_oneof![
        Just(LogLevel::Unknown),
        Just(LogLevel::Debug),
        Just(LogLevel::Trace),
        Just(LogLevel::Info),
        Just(LogLevel::Warning),
        Just(LogLevel::Error),
        Just(LogLevel::Fatal),
    ]
}

fn named_level() -> impl Strategy<Value = LogLevel> {
    proptest::sample::select(LogLevel::NAMED.to_vec())
}

// ============================================================================
// Severity Gate
// ============================================================================

proptest! {
    /// The gate admits exactly the levels at or above the threshold
    #[test]
    fn test_gate_matches_ordinal_comparison(threshold in named_level(), level in any_level()) {
        let admitted = is_enabled(threshold, level);
        prop_assert_eq!(admitted, level as u8 >= threshold as u8);
        prop_assert_eq!(admitted, level.is_enabled(threshold));
    }

    #[test]
    fn test_level_name_roundtrip_any_case(level in named_level(), mask in any::<u32>()) {
        let mixed: String = level
            .to_str()
            .chars()
            .enumerate()
            .map(|(i, c)| if mask & (1 << (i % 32)) != 0 { c.to_ascii_lowercase() } else { c })
            .collect();
        prop_assert_eq!(LogLevel::parse(&mixed).unwrap(), level);
        prop_assert_eq!(mixed.parse::<LogLevel>().unwrap(), level);
    }

    #[test]
    fn test_invalid_level_names_are_rejected(name in "[a-z]{1,12}") {
        let known = ["debug", "trace", "info", "warning", "error", "fatal"];
        prop_assume!(!known.contains(&name.as_str()));
        let is_invalid_level = matches!(LogLevel::parse(&name), Err(LoggerError::InvalidLevel { .. }));
        prop_assert!(is_invalid_level);
    }
}

// ============================================================================
// Record Builder
// ============================================================================

proptest! {
    /// The template is fixed: every field lands in its slot
    #[test]
    fn test_line_template(
        timestamp in "[0-9: -]{1,19}",
        level in named_level(),
        file in "[a-z_]{1,10}\\.rs",
        function in "[a-z_]{1,16}",
        line in 1u32..100_000,
        message in "[a-zA-Z0-9 ,.=]*",
    ) {
        let rendered = render_line(&timestamp, level.to_str(), &file, &function, line, &message);
        let expected = format!(
            "[{}] [{}] [File:{}, Func:{}, Line:{}] {}\n",
            timestamp, level, file, function, line, message
        );
        prop_assert_eq!(rendered, expected);
    }

    /// Whatever the message contains, a record is exactly one line
    #[test]
    fn test_record_is_single_line(message in ".*", level in named_level()) {
        let record = LogRecord::new(level, CallSite::caller(), &message);
        let line = record.format_line(&TimestampFormat::Standard);

        prop_assert!(line.ends_with('\n'));
        prop_assert_eq!(line.matches('\n').count(), 1);
        prop_assert!(!line.contains('\r'));
        prop_assert!(!record.message.contains('\t'));
    }

    #[test]
    fn test_log_injection_prevention(
        legitimate_msg in "[a-zA-Z0-9 ]+",
        fake_level in prop_oneof![Just("ERROR"), Just("FATAL"), Just("INFO")],
    ) {
        let malicious = format!("{}\n[2024-01-01 00:00:00] [{}] [File:x.rs, Func:f, Line:1] forged", legitimate_msg, fake_level);
        let record = LogRecord::new(LogLevel::Info, CallSite::caller(), &malicious);
        let line = record.format_line(&TimestampFormat::Standard);

        prop_assert_eq!(line.lines().count(), 1);
        let starts_with_info = line.contains("] [INFO] [File:");
        prop_assert!(starts_with_info);
    }
}

// ============================================================================
// Rotation
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    /// Rotation never splits a line and never loses bytes
    #[test]
    fn test_rotation_preserves_every_line(
        lengths in proptest::collection::vec(1usize..80, 1..40),
        max_bytes in 16u64..256,
    ) {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("prop.log");
        let mut file = RotatingFile::open(&path, max_bytes).unwrap();

        let mut expected = Vec::new();
        for (i, len) in lengths.iter().enumerate() {
            let line = format!("{:04}{}\n", i, "x".repeat(*len));
            file.write_line(&line).unwrap();
            expected.push(line);
        }
        file.close().unwrap();

        let mut contents = Vec::new();
        for entry in fs::read_dir(temp_dir.path()).unwrap() {
            let content = fs::read_to_string(entry.unwrap().path()).unwrap();
            prop_assert!(content.is_empty() || content.ends_with('\n'));
            contents.extend(content.lines().map(|l| format!("{}\n", l)));
        }
        contents.sort();
        expected.sort();
        prop_assert_eq!(contents, expected);
    }
}
