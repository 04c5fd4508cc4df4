//! Unit tests for log.rs
//!
//! Tests LogSeverity ordering, LogEntry formatting and the DefaultLogger filter.

use crate::log::{DefaultLogger, LogEntry, LogSeverity, Logger};
use std::time::SystemTime;

fn entry(severity: LogSeverity, file: Option<&'static str>, line: Option<u32>) -> LogEntry {
    LogEntry {
        severity,
        timestamp: SystemTime::now(),
        source: "galaxy3d::RenderGraph".to_string(),
        message: "Task list rebuilt".to_string(),
        file,
        line,
    }
}

// ============================================================================
// LOG SEVERITY TESTS
// ============================================================================

#[test]
fn test_log_severity_ordering() {
    assert!(LogSeverity::Trace < LogSeverity::Debug);
    assert!(LogSeverity::Debug < LogSeverity::Info);
    assert!(LogSeverity::Info < LogSeverity::Warn);
    assert!(LogSeverity::Warn < LogSeverity::Error);
}

#[test]
fn test_log_severity_labels_are_fixed_width() {
    for severity in [
        LogSeverity::Trace,
        LogSeverity::Debug,
        LogSeverity::Info,
        LogSeverity::Warn,
        LogSeverity::Error,
    ] {
        assert_eq!(severity.label().len(), 5);
    }
}

// ============================================================================
// DEFAULT LOGGER TESTS
// ============================================================================

#[test]
fn test_default_logger_filters_below_min_severity() {
    let logger = DefaultLogger::new(LogSeverity::Warn);
    assert!(!logger.accepts(LogSeverity::Info));
    assert!(logger.accepts(LogSeverity::Warn));
    assert!(logger.accepts(LogSeverity::Error));
}

#[test]
fn test_default_logger_min_severity_matches_build() {
    let logger = DefaultLogger::default();
    if cfg!(debug_assertions) {
        assert_eq!(logger.min_severity(), LogSeverity::Debug);
    } else {
        assert_eq!(logger.min_severity(), LogSeverity::Info);
    }
}

#[test]
fn test_default_logger_does_not_panic() {
    let logger = DefaultLogger::new(LogSeverity::Trace);
    logger.log(&entry(LogSeverity::Info, None, None));
    logger.log(&entry(LogSeverity::Error, Some("render_graph.rs"), Some(42)));
}

#[test]
fn test_format_plain_without_location() {
    let text = DefaultLogger::format_plain(&entry(LogSeverity::Debug, None, None));
    assert!(text.contains("[DEBUG]"));
    assert!(text.contains("[galaxy3d::RenderGraph]"));
    assert!(text.ends_with("Task list rebuilt"));
}

#[test]
fn test_format_plain_with_location() {
    let text = DefaultLogger::format_plain(&entry(
        LogSeverity::Error,
        Some("render_graph.rs"),
        Some(42),
    ));
    assert!(text.contains("[ERROR]"));
    assert!(text.ends_with("(render_graph.rs:42)"));
}

// ============================================================================
// CUSTOM LOGGER TESTS
// ============================================================================

#[test]
fn test_custom_logger_trait_object() {
    use std::sync::{Arc, Mutex};

    struct Capture(Arc<Mutex<Vec<String>>>);
    impl Logger for Capture {
        fn log(&self, entry: &LogEntry) {
            self.0.lock().unwrap().push(entry.message.clone());
        }
    }

    let store = Arc::new(Mutex::new(Vec::new()));
    let logger: Box<dyn Logger> = Box::new(Capture(store.clone()));
    logger.log(&entry(LogSeverity::Info, None, None));

    assert_eq!(store.lock().unwrap().as_slice(), ["Task list rebuilt".to_string()]);
}
