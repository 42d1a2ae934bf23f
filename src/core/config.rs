//! Sink and chain configuration
//!
//! File sink thresholds are explicit per-sink values; [`FileSinkConfig::default`]
//! is the only place the library-wide defaults live.

use super::error::{LoggerError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default number of buffered records that triggers an automatic flush
pub const DEFAULT_SAVE_THRESHOLD: usize = 100;

/// Default cap on the number of lines kept in a log file
pub const DEFAULT_MAX_FILE_LINES: usize = 500;

/// Buffering and rotation settings for a [`FileSink`](crate::sinks::FileSink)
///
/// # Examples
///
/// ```
/// use sink_chain_logger::FileSinkConfig;
///
/// let config = FileSinkConfig::new()
///     .with_save_threshold(20)
///     .with_max_file_lines(1000);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileSinkConfig {
    /// A flush happens once the buffer holds more than this many records
    pub save_threshold: usize,
    /// Upper bound on the line count of the file after any flush
    pub max_file_lines: usize,
}

impl Default for FileSinkConfig {
    fn default() -> Self {
        Self {
            save_threshold: DEFAULT_SAVE_THRESHOLD,
            max_file_lines: DEFAULT_MAX_FILE_LINES,
        }
    }
}

impl FileSinkConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use = "builder methods return a new value and do not modify the original"]
    pub fn with_save_threshold(mut self, threshold: usize) -> Self {
        self.save_threshold = threshold;
        self
    }

    #[must_use = "builder methods return a new value and do not modify the original"]
    pub fn with_max_file_lines(mut self, lines: usize) -> Self {
        self.max_file_lines = lines;
        self
    }

    /// Reject settings the sink cannot work with.
    ///
    /// A `max_file_lines` below `save_threshold` is accepted: every flush then
    /// rewrites the file and only the newest `max_file_lines` records survive.
    pub fn validate(&self) -> Result<()> {
        if self.max_file_lines == 0 {
            return Err(LoggerError::config(
                "FileSink",
                "max_file_lines must be greater than zero",
            ));
        }
        Ok(())
    }

    /// Whether a full buffer can be flushed without dropping any of its records
    pub fn is_consistent(&self) -> bool {
        self.max_file_lines >= self.save_threshold
    }
}

/// Declarative description of one sink in a chain
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SinkConfig {
    Console {
        #[serde(default)]
        severity_level: i32,
        #[serde(default)]
        colors: bool,
    },
    File {
        path: PathBuf,
        #[serde(default)]
        severity_level: i32,
        #[serde(default = "default_save_threshold")]
        save_threshold: usize,
        #[serde(default = "default_max_file_lines")]
        max_file_lines: usize,
    },
}

fn default_save_threshold() -> usize {
    DEFAULT_SAVE_THRESHOLD
}

fn default_max_file_lines() -> usize {
    DEFAULT_MAX_FILE_LINES
}

/// Ordered sink list; the first entry is the head of the chain
///
/// # Examples
///
/// ```
/// use sink_chain_logger::{ChainConfig, SinkConfig};
///
/// let config = ChainConfig::from_json_str(r#"{
///     "sinks": [
///         { "kind": "console", "severity_level": 2 },
///         { "kind": "file", "path": "app.log", "max_file_lines": 2000 }
///     ]
/// }"#).unwrap();
///
/// assert_eq!(config.sinks.len(), 2);
/// assert!(matches!(config.sinks[1], SinkConfig::File { save_threshold: 100, .. }));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChainConfig {
    #[serde(default)]
    pub sinks: Vec<SinkConfig>,
}

impl ChainConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| {
            LoggerError::io_operation(
                "reading chain configuration",
                format!("Failed to read '{}'", path.display()),
                e,
            )
        })?;
        Self::from_json_str(&json)
    }
}
