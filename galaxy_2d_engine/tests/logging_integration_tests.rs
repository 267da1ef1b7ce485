//! Integration tests for Engine logging system
//!
//! These tests verify the logging facade and the entries the renderer emits.
//! No GPU required.
//!
//! Run with: cargo test --test logging_integration_tests

use galaxy_2d_engine::galaxy2d::Engine;
use galaxy_2d_engine::galaxy2d::camera::{Camera, CameraSystem, CameraSystemConfig};
use galaxy_2d_engine::galaxy2d::log::{Logger, LogEntry, LogSeverity};
use galaxy_2d_engine::glam::Vec2;
use std::sync::{Arc, Mutex};
use serial_test::serial;

// ============================================================================
// TEST LOGGER IMPLEMENTATION
// ============================================================================

/// Test logger that captures log entries for verification
struct TestLogger {
    entries: Arc<Mutex<Vec<LogEntry>>>,
}

impl TestLogger {
    fn new() -> (Self, Arc<Mutex<Vec<LogEntry>>>) {
        let entries = Arc::new(Mutex::new(Vec::new()));
        (Self { entries: entries.clone() }, entries)
    }
}

impl Logger for TestLogger {
    fn log(&self, entry: &LogEntry) {
        self.entries.lock().unwrap().push(entry.clone());
    }
}

// ============================================================================
// LOGGING TESTS
// ============================================================================

#[test]
#[serial]
fn test_integration_custom_logger() {
    let (test_logger, entries) = TestLogger::new();
    Engine::set_logger(test_logger);

    Engine::log(LogSeverity::Info, "test::module", "Test info message".to_string());
    Engine::log(LogSeverity::Warn, "test::module", "Test warning message".to_string());
    Engine::log(LogSeverity::Error, "test::module", "Test error message".to_string());

    let captured = entries.lock().unwrap();
    assert_eq!(captured.len(), 3);
    assert_eq!(captured[0].severity, LogSeverity::Info);
    assert_eq!(captured[0].message, "Test info message");
    assert_eq!(captured[1].severity, LogSeverity::Warn);
    assert_eq!(captured[2].severity, LogSeverity::Error);
    assert!(captured.iter().all(|e| e.source == "test::module"));
    drop(captured);

    Engine::reset_logger();
}

#[test]
#[serial]
fn test_integration_error_logging_with_location() {
    let (test_logger, entries) = TestLogger::new();
    Engine::set_logger(test_logger);

    Engine::log_detailed(
        LogSeverity::Error,
        "test::error",
        "Critical error occurred".to_string(),
        "test_file.rs",
        42,
    );

    let captured = entries.lock().unwrap();
    assert_eq!(captured.len(), 1);
    assert_eq!(captured[0].file, Some("test_file.rs"));
    assert_eq!(captured[0].line, Some(42));
    drop(captured);

    Engine::reset_logger();
}

#[test]
#[serial]
fn test_integration_logger_reset() {
    let (test_logger, entries) = TestLogger::new();
    Engine::set_logger(test_logger);

    Engine::log(LogSeverity::Info, "test", "Message 1".to_string());
    assert_eq!(entries.lock().unwrap().len(), 1);

    // Goes to the default logger, not captured
    Engine::reset_logger();
    Engine::log(LogSeverity::Info, "test", "Message 2".to_string());

    assert_eq!(entries.lock().unwrap().len(), 1);
}

#[test]
#[serial]
fn test_integration_min_severity_filters() {
    let (test_logger, entries) = TestLogger::new();
    Engine::set_logger(test_logger);
    Engine::set_min_severity(LogSeverity::Trace);

    Engine::log(LogSeverity::Trace, "test", "Trace message".to_string());
    Engine::log(LogSeverity::Debug, "test", "Debug message".to_string());
    Engine::set_min_severity(LogSeverity::Warn);
    Engine::log(LogSeverity::Info, "test", "Info message".to_string());
    Engine::log(LogSeverity::Warn, "test", "Warn message".to_string());

    let severities: Vec<LogSeverity> = entries.lock().unwrap().iter().map(|e| e.severity).collect();
    assert_eq!(severities, vec![LogSeverity::Trace, LogSeverity::Debug, LogSeverity::Warn]);

    Engine::reset_logger();
    assert_eq!(Engine::min_severity(), LogSeverity::Debug);
}

#[test]
#[serial]
fn test_integration_camera_warnings_are_logged() {
    let (test_logger, entries) = TestLogger::new();
    Engine::set_logger(test_logger);

    let mut camera = Camera::orthographic(Vec2::ZERO);
    camera.set_zoom(0.0);
    assert_eq!(camera.zoom(), 1.0);

    let mut system = CameraSystem::default();
    system.set_viewport_size(0.0, 480.0);
    assert_eq!(system.viewport_size().x, 640.0);

    let captured = entries.lock().unwrap();
    let warnings: Vec<&LogEntry> = captured.iter().filter(|e| e.severity == LogSeverity::Warn).collect();
    assert_eq!(warnings.len(), 2);
    assert!(warnings.iter().any(|e| e.source == "galaxy2d::CameraSystem"));
    drop(captured);

    Engine::reset_logger();
}

#[test]
#[serial]
fn test_integration_invalid_config_logs_error_with_location() {
    let (test_logger, entries) = TestLogger::new();
    Engine::set_logger(test_logger);

    let config = CameraSystemConfig { game_width: 0.0, ..Default::default() };
    assert!(CameraSystem::new(config).is_err());

    let captured = entries.lock().unwrap();
    let error = captured.iter().find(|e| e.severity == LogSeverity::Error).unwrap();
    assert_eq!(error.source, "galaxy2d::CameraSystem");
    assert!(error.file.is_some());
    assert!(error.line.is_some());
    drop(captured);

    Engine::reset_logger();
}

