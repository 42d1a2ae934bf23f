//! Integration tests for the sink chain
//!
//! These tests verify:
//! - Severity filtering and full-chain propagation
//! - Threshold-triggered flushing
//! - Line-count rotation of the file sink
//! - Async chain walks
//! - Chain construction from JSON configuration

use sink_chain_logger::prelude::*;
use std::fs;
use std::io::Write;
use std::path::Path;
use std::sync::Arc;
use tempfile::TempDir;

fn seed(path: &Path, lines: usize) {
    let content: String = (0..lines).map(|i| format!("seed line {}\n", i)).collect();
    fs::write(path, content).expect("Failed to seed log file");
}

fn read_lines(path: &Path) -> Vec<String> {
    fs::read_to_string(path)
        .expect("Failed to read log file")
        .lines()
        .map(String::from)
        .collect()
}

fn file_sink(path: &Path, threshold: usize, max_lines: usize) -> FileSink {
    let config = FileSinkConfig::new()
        .with_save_threshold(threshold)
        .with_max_file_lines(max_lines);
    FileSink::with_config(path, config).expect("Failed to create file sink")
}

#[derive(Clone, Default)]
struct Capture(Arc<parking_lot::Mutex<Vec<u8>>>);

impl Write for Capture {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

impl Capture {
    fn lines(&self) -> Vec<String> {
        String::from_utf8(self.0.lock().clone())
            .expect("console output is utf-8")
            .lines()
            .map(String::from)
            .collect()
    }
}

#[test]
fn test_two_hundred_records_with_default_thresholds() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log_file = temp_dir.path().join("client.log");

    let chain = Chain::builder()
        .sink(FileSink::new(&log_file))
        .build();

    for i in 0..200 {
        chain
            .log_message(format!("Log {}", i), LogType::Information)
            .expect("Failed to log");
        if i == 99 {
            assert!(!log_file.exists(), "No flush before the threshold is exceeded");
        }
    }

    // The 101st record pushes the buffer past 100 and triggers one flush
    let lines = read_lines(&log_file);
    assert_eq!(lines.len(), 101);
    assert!(lines[0].starts_with("Information 0 Log 0 "));
    assert!(lines[100].starts_with("Information 0 Log 100 "));
    assert_eq!(chain.with_sink(0, |s| s.buffered().len()), Some(99));
    assert_eq!(
        chain.with_sink(0, |s| s.buffered()[0].message().to_string()),
        Some("Log 101".to_string())
    );

    chain.save().expect("Failed to save");
    assert_eq!(read_lines(&log_file).len(), 200);
    assert_eq!(chain.with_sink(0, |s| s.buffered().len()), Some(0));
}

#[test]
fn test_rotation_drops_oldest_lines() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log_file = temp_dir.path().join("rotate.log");
    seed(&log_file, 450);

    let mut sink = file_sink(&log_file, 100, 500);
    for i in 0..60 {
        sink.append(&LogRecord::new(LogType::Action, format!("new {}", i)))
            .expect("Failed to append");
    }
    sink.flush().expect("Failed to flush");

    let lines = read_lines(&log_file);
    assert_eq!(lines.len(), 500);
    assert_eq!(lines[0], "seed line 10");
    assert_eq!(lines[439], "seed line 449");
    assert!(lines[440].starts_with("Action 0 new 0 "));
    assert!(lines[499].starts_with("Action 0 new 59 "));
    assert_eq!(sink.rotation_count(), 1);
}

#[test]
fn test_full_file_keeps_tail_of_old_lines() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log_file = temp_dir.path().join("full.log");
    seed(&log_file, 20);

    let mut sink = file_sink(&log_file, 100, 20);
    for i in 0..7 {
        sink.append(&LogRecord::new(LogType::Warning, format!("w{}", i)))
            .expect("Failed to append");
    }
    sink.flush().expect("Failed to flush");

    let lines = read_lines(&log_file);
    assert_eq!(lines.len(), 20);
    let expected_old: Vec<String> = (7..20).map(|i| format!("seed line {}", i)).collect();
    assert_eq!(lines[..13], expected_old[..]);
    for (i, line) in lines[13..].iter().enumerate() {
        assert!(line.starts_with(&format!("Warning 0 w{} ", i)));
    }
}

#[test]
fn test_max_lines_below_threshold_does_not_exceed_cap() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log_file = temp_dir.path().join("small.log");
    seed(&log_file, 30);

    let mut sink = file_sink(&log_file, 100, 50);
    for i in 0..100 {
        sink.append(&LogRecord::new(LogType::Information, format!("r{}", i)))
            .expect("Failed to append");
    }
    sink.flush().expect("Failed to flush");

    let lines = read_lines(&log_file);
    assert_eq!(lines.len(), 50);
    assert!(lines[0].starts_with("Information 0 r50 "));
    assert!(lines[49].starts_with("Information 0 r99 "));
}

#[test]
fn test_repeated_flushes_stay_within_cap() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log_file = temp_dir.path().join("steady.log");

    let chain = Chain::builder().sink(file_sink(&log_file, 10, 25)).build();
    for i in 0..137 {
        chain
            .log_message(format!("m{}", i), LogType::Other)
            .expect("Failed to log");
        assert!(read_lines_if_exists(&log_file).len() <= 25);
    }
    chain.save().expect("Failed to save");

    let lines = read_lines(&log_file);
    assert_eq!(lines.len(), 25);
    assert!(lines[24].starts_with("Other 0 m136 "));
}

fn read_lines_if_exists(path: &Path) -> Vec<String> {
    if path.exists() {
        read_lines(path)
    } else {
        Vec::new()
    }
}

#[test]
fn test_save_with_empty_buffer_is_idempotent() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log_file = temp_dir.path().join("idle.log");
    seed(&log_file, 3);
    let before = fs::read(&log_file).unwrap();

    let chain = Chain::builder().sink(FileSink::new(&log_file)).build();
    chain.save().expect("Failed to save");
    chain.save().expect("Failed to save");

    assert_eq!(fs::read(&log_file).unwrap(), before);
}

#[test]
fn test_console_then_file_chain() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log_file = temp_dir.path().join("chain.log");
    let console = Capture::default();

    let chain = Chain::builder()
        .sink(ConsoleSink::with_writer(console.clone()).with_severity_level(5))
        .sink(FileSink::new(&log_file).with_severity_level(0))
        .build();

    chain
        .log_with_severity("quiet", LogType::Information, 1)
        .expect("Failed to log");
    chain
        .log_with_severity("loud", LogType::Error, 8)
        .expect("Failed to log");
    chain.save().expect("Failed to save");

    let console_lines = console.lines();
    assert_eq!(console_lines.len(), 2);
    assert!(console_lines[0].starts_with("Error 8 loud "));
    assert_eq!(console_lines[1], "Save Logs");

    let file_lines = read_lines(&log_file);
    assert_eq!(file_lines.len(), 2);
    assert!(file_lines[0].starts_with("Information 1 quiet "));
    assert!(file_lines[1].starts_with("Error 8 loud "));

    let metrics = chain.metrics();
    assert_eq!(metrics.records_received(), 2);
    assert_eq!(metrics.records_accepted(), 3);
    assert_eq!(metrics.records_filtered(), 1);
}

#[test]
fn test_file_failure_does_not_silence_console() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let bad_path = temp_dir.path().join("no_such_dir").join("app.log");
    let console = Capture::default();

    let chain = Chain::builder()
        .sink(file_sink(&bad_path, 0, 10))
        .sink(ConsoleSink::with_writer(console.clone()))
        .build();

    let err = chain
        .log_message("still printed", LogType::Error)
        .expect_err("flush into a missing directory fails");
    assert!(matches!(err, LoggerError::IoOperation { .. }));
    assert_eq!(console.lines().len(), 1);
    assert_eq!(chain.metrics().sink_failures(), 1);
}

#[test]
fn test_record_data_is_rendered() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log_file = temp_dir.path().join("data.log");
    let chain = Chain::builder().sink(FileSink::new(&log_file)).build();

    let io_err = std::io::Error::new(std::io::ErrorKind::TimedOut, "upstream timed out");
    chain
        .log(&LogRecord::with_severity(LogType::Error, 4, "request failed").with_data(io_err))
        .expect("Failed to log");
    chain.save().expect("Failed to save");

    let lines = read_lines(&log_file);
    assert!(lines[0].ends_with("| upstream timed out"));
}

#[test]
fn test_chain_from_json_config() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log_file = temp_dir.path().join("configured.log");
    let json = format!(
        r#"{{ "sinks": [ {{ "kind": "file", "path": {:?}, "severity_level": 2, "save_threshold": 1, "max_file_lines": 3 }} ] }}"#,
        log_file.to_str().unwrap()
    );

    let chain = Chain::from_config(&ChainConfig::from_json_str(&json).unwrap()).unwrap();
    for i in 0..6 {
        chain
            .log_with_severity(format!("c{}", i), LogType::Information, i)
            .expect("Failed to log");
    }
    chain.save().expect("Failed to save");

    let lines = read_lines(&log_file);
    assert_eq!(lines.len(), 3);
    assert!(lines[0].starts_with("Information 3 c3 "));
    assert!(lines[2].starts_with("Information 5 c5 "));
}

#[cfg(feature = "async")]
#[tokio::test]
async fn test_async_chain_walk() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log_file = temp_dir.path().join("async.log");
    let console = Capture::default();

    let chain = Chain::builder()
        .sink(ConsoleSink::with_writer(console.clone()))
        .sink(file_sink(&log_file, 2, 100))
        .build();

    for i in 0..3 {
        chain
            .log_chain_async(LogRecord::new(LogType::Action, format!("a{}", i)))
            .await
            .expect("Failed to log");
    }
    assert_eq!(console.lines().len(), 3);
    assert_eq!(read_lines(&log_file).len(), 3);

    let propagation = chain
        .log_async(LogRecord::new(LogType::Action, "a3"))
        .await
        .expect("Failed to log");
    assert_eq!(console.lines().len(), 4);
    propagation.join().await.expect("Downstream failed");

    chain.save_chain_async().await.expect("Failed to save");
    assert_eq!(read_lines(&log_file).len(), 4);
    assert_eq!(console.lines().last().map(String::as_str), Some("Save Logs"));
}
