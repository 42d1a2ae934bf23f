//! Buffered file sink with line-count rotation
//!
//! Records accumulate in memory and are written once the buffer grows past
//! the save threshold, or on an explicit flush. Every flush keeps the file
//! at or below `max_file_lines` lines by dropping its oldest lines.

use crate::core::{FileSinkConfig, LogRecord, LoggerError, Result, Sink, TimestampFormat};
use std::fs::{self, File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

/// Line statistics of a log file's contents
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct LineCount {
    lines: usize,
    /// The last line has content but no terminating newline
    unterminated: bool,
}

impl LineCount {
    fn of(bytes: &[u8]) -> Self {
        let newlines = bytes.iter().filter(|&&b| b == b'\n').count();
        let unterminated = bytes.last().is_some_and(|&b| b != b'\n');
        Self {
            lines: newlines + usize::from(unterminated),
            unterminated,
        }
    }
}

/// Raw lines of `bytes`, without their `\n` terminators
///
/// Splits by the same rule as [`LineCount`], so the result has exactly
/// `LineCount::of(bytes).lines` entries. A `\r` before the newline and any
/// non-UTF-8 bytes stay in the line.
fn split_lines(bytes: &[u8]) -> Vec<&[u8]> {
    if bytes.is_empty() {
        return Vec::new();
    }
    let body = bytes.strip_suffix(b"\n").unwrap_or(bytes);
    body.split(|&b| b == b'\n').collect()
}

/// Current file contents; a missing file reads as empty
fn read_existing(path: &Path) -> io::Result<Vec<u8>> {
    match fs::read(path) {
        Ok(bytes) => Ok(bytes),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Vec::new()),
        Err(e) => Err(e),
    }
}

/// Split a flush into the old lines to keep and the buffered records to write
///
/// Returns `(discard, skip)`: drop the first `discard` existing lines and the
/// first `skip` buffered records. Both are clamped so the result never exceeds
/// `max_lines`, even when the buffer alone is larger than the cap.
fn rotation_plan(existing: usize, buffered: usize, max_lines: usize) -> (usize, usize) {
    let written = buffered.min(max_lines);
    let skip = buffered - written;
    let discard = (existing + written).saturating_sub(max_lines).min(existing);
    (discard, skip)
}

/// # Examples
///
/// ```no_run
/// use sink_chain_logger::sinks::FileSink;
/// use sink_chain_logger::{FileSinkConfig, LogRecord, LogType, Sink};
///
/// let config = FileSinkConfig::new().with_save_threshold(10).with_max_file_lines(1000);
/// let mut sink = FileSink::with_config("/var/log/app.log", config)?.with_severity_level(2);
///
/// sink.append(&LogRecord::with_severity(LogType::Warning, 3, "cache miss storm"))?;
/// sink.flush()?;
/// # Ok::<(), sink_chain_logger::LoggerError>(())
/// ```
pub struct FileSink {
    path: PathBuf,
    severity_level: i32,
    config: FileSinkConfig,
    timestamp_format: TimestampFormat,
    buffer: Vec<LogRecord>,
    flush_count: u64,
    rotation_count: u64,
}

impl FileSink {
    /// File sink with the default thresholds
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            severity_level: 0,
            config: FileSinkConfig::default(),
            timestamp_format: TimestampFormat::default(),
            buffer: Vec::new(),
            flush_count: 0,
            rotation_count: 0,
        }
    }

    /// # Errors
    ///
    /// Returns error if `config` fails [`FileSinkConfig::validate`]
    pub fn with_config(path: impl Into<PathBuf>, config: FileSinkConfig) -> Result<Self> {
        config.validate()?;

        let mut sink = Self::new(path);
        if !config.is_consistent() {
            eprintln!(
                "[LOGGER WARNING] File sink '{}': max_file_lines ({}) is below save_threshold ({}); \
                 flushes will keep only the newest {} records.",
                sink.path.display(),
                config.max_file_lines,
                config.save_threshold,
                config.max_file_lines
            );
        }
        sink.config = config;
        Ok(sink)
    }

    #[must_use]
    pub fn with_severity_level(mut self, level: i32) -> Self {
        self.severity_level = level;
        self
    }

    #[must_use]
    pub fn with_timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.timestamp_format = format;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn config(&self) -> &FileSinkConfig {
        &self.config
    }

    /// Completed flushes that wrote at least one record
    pub fn flush_count(&self) -> u64 {
        self.flush_count
    }

    /// Flushes that had to rewrite the file to stay within `max_file_lines`
    pub fn rotation_count(&self) -> u64 {
        self.rotation_count
    }

    /// Lines currently in the file; a missing file has none
    pub fn line_count(&self) -> Result<usize> {
        let bytes = read_existing(&self.path)?;
        Ok(LineCount::of(&bytes).lines)
    }

    fn write_lines<W: Write>(
        &self,
        writer: &mut W,
        old_lines: &[&[u8]],
        records: &[LogRecord],
    ) -> io::Result<()> {
        for line in old_lines {
            writer.write_all(line)?;
            writer.write_all(b"\n")?;
        }
        for record in records {
            writeln!(writer, "{}", record.render(&self.timestamp_format))?;
        }
        writer.flush()
    }

    fn append_buffer(&self, terminate_last_line: bool) -> io::Result<()> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        let mut writer = BufWriter::new(file);

        if terminate_last_line {
            writer.write_all(b"\n")?;
        }
        self.write_lines(&mut writer, &[], &self.buffer)
    }

    fn rotate(&self, existing: &[u8]) -> io::Result<()> {
        let old_lines = split_lines(existing);
        let (discard, skip) =
            rotation_plan(old_lines.len(), self.buffer.len(), self.config.max_file_lines);

        let mut writer = BufWriter::new(File::create(&self.path)?);
        self.write_lines(&mut writer, &old_lines[discard..], &self.buffer[skip..])
    }

    fn display_path(&self) -> String {
        self.path.display().to_string()
    }
}

impl Sink for FileSink {
    fn severity_level(&self) -> i32 {
        self.severity_level
    }

    fn append(&mut self, record: &LogRecord) -> Result<()> {
        self.buffer.push(record.clone());
        if self.buffer.len() > self.config.save_threshold {
            self.flush()?;
        }
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        if self.buffer.is_empty() {
            return Ok(());
        }

        // Re-read on every flush so external truncation or deletion is seen
        let existing = read_existing(&self.path).map_err(|e| {
            LoggerError::io_operation(
                "reading log file",
                format!("Failed to read '{}'", self.display_path()),
                e,
            )
        })?;
        let count = LineCount::of(&existing);

        if count.lines + self.buffer.len() <= self.config.max_file_lines {
            self.append_buffer(count.unterminated).map_err(|e| {
                LoggerError::io_operation(
                    "appending log records",
                    format!("Failed to write '{}'", self.display_path()),
                    e,
                )
            })?;
        } else {
            self.rotate(&existing)
                .map_err(|e| LoggerError::file_rotation(self.display_path(), e.to_string()))?;
            self.rotation_count += 1;
        }

        self.buffer.clear();
        self.flush_count += 1;
        Ok(())
    }

    fn buffered(&self) -> &[LogRecord] {
        &self.buffer
    }

    fn name(&self) -> &str {
        "file"
    }
}

impl Drop for FileSink {
    fn drop(&mut self) {
        if self.buffer.is_empty() {
            return;
        }
        let pending = self.buffer.len();
        if let Err(e) = self.flush() {
            eprintln!(
                "[LOGGER ERROR] File sink '{}' lost {} buffered records on drop: {}",
                self.display_path(),
                pending,
                e
            );
        }
    }
}
