//! Tests for the pure line formatter.

use chrono::TimeZone;
use modulog::fmt::{DisplayOptions, render};
use modulog::{Level, Record};

fn fixed_record(level: Level, file: Option<&str>, line: Option<u32>) -> Record {
    Record {
        timestamp: chrono::Local
            .with_ymd_and_hms(2025, 1, 15, 14, 30, 5)
            .unwrap(),
        thread_id: "7".to_string(),
        module: "net".to_string(),
        level,
        function: None,
        file: file.map(ToString::to_string),
        line,
        message: "hello".to_string(),
    }
}

#[test]
fn default_line_layout() {
    let record = fixed_record(Level::Info, None, None);
    let line = render(&record, &DisplayOptions::default(), Level::Info);
    assert_eq!(line, "[Info] [net] [15-01-2025 14:30:05.000] [7] hello\n");
}

#[test]
fn source_coordinates_at_debug_threshold() {
    let record = fixed_record(Level::Debug, Some("conn.rs"), Some(42));
    let line = render(&record, &DisplayOptions::default(), Level::Debug);
    assert_eq!(
        line,
        "[Debug] [net] [15-01-2025 14:30:05.000] [7] {conn.rs:42} hello\n"
    );
}

#[test]
fn source_coordinates_hidden_above_debug() {
    let record = fixed_record(Level::Info, Some("conn.rs"), Some(42));
    let line = render(&record, &DisplayOptions::default(), Level::Info);
    assert!(!line.contains("conn.rs"));
    assert!(!line.contains("42"));
}

#[test]
fn file_without_line_flag() {
    let options = DisplayOptions {
        line: false,
        ..DisplayOptions::default()
    };
    let record = fixed_record(Level::Trace, Some("conn.rs"), Some(42));
    let line = render(&record, &options, Level::Trace);
    assert!(line.contains("{conn.rs}"));
    assert!(!line.contains(":42"));
}

#[test]
fn function_rendered_when_enabled() {
    let options = DisplayOptions::full();
    let mut record = fixed_record(Level::Debug, Some("conn.rs"), Some(9));
    record.function = Some("app::connect".to_string());
    let line = render(&record, &options, Level::Trace);
    assert!(line.contains("{app::connect}"));
    assert!(line.contains("{conn.rs:9}"));
}

#[test]
fn message_only_preset() {
    let record = fixed_record(Level::Error, Some("conn.rs"), Some(1));
    let line = render(&record, &DisplayOptions::message_only(), Level::Trace);
    assert_eq!(line, "hello\n");
}

#[test]
fn disabled_fields_leave_no_gaps() {
    let options = DisplayOptions {
        timestamp: false,
        thread_id: false,
        ..DisplayOptions::default()
    };
    let record = fixed_record(Level::Warning, None, None);
    let line = render(&record, &options, Level::Info);
    assert_eq!(line, "[Warning] [net] hello\n");
}

#[test]
fn stamp_strips_file_directories() {
    let record = Record::stamp(
        "db",
        Level::Debug,
        "query",
        None,
        Some("src/storage/db.rs"),
        Some(10),
    );
    assert_eq!(record.file.as_deref(), Some("db.rs"));
}

#[test]
fn stamp_captures_thread_id() {
    let record = Record::stamp("db", Level::Info, "x", None, None, None);
    assert!(!record.thread_id.is_empty());
    assert!(record.thread_id.chars().all(|c| c.is_ascii_digit()));
}
