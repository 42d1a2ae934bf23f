//! Log record structure

use super::log_data::LogData;
use super::log_type::LogType;
use super::timestamp::TimestampFormat;
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One log event.
///
/// A record is immutable once built: fields are only reachable through
/// accessors, and the consuming `with_*` methods are meant for construction.
/// The message is stored verbatim; line breaks are escaped by [`render`].
///
/// [`render`]: LogRecord::render
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogRecord {
    log_type: LogType,
    severity: i32,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<LogData>,
    timestamp: DateTime<Local>,
}

/// Escape line breaks and tabs so a rendered record always occupies exactly
/// one line of output, however the record was built
fn sanitize(text: &str) -> String {
    text.replace('\n', "\\n")
        .replace('\r', "\\r")
        .replace('\t', "\\t")
}

impl LogRecord {
    /// Create a record with the default severity of 0
    pub fn new(log_type: LogType, message: impl Into<String>) -> Self {
        Self::with_severity(log_type, 0, message)
    }

    pub fn with_severity(log_type: LogType, severity: i32, message: impl Into<String>) -> Self {
        Self {
            log_type,
            severity,
            message: message.into(),
            data: None,
            timestamp: Local::now(),
        }
    }

    /// Attach diagnostic context
    #[must_use]
    pub fn with_data(mut self, data: impl Into<LogData>) -> Self {
        self.data = Some(data.into());
        self
    }

    /// Override the capture time
    #[must_use]
    pub fn with_timestamp(mut self, timestamp: DateTime<Local>) -> Self {
        self.timestamp = timestamp;
        self
    }

    #[inline]
    pub fn log_type(&self) -> LogType {
        self.log_type
    }

    /// Higher is more severe
    #[inline]
    pub fn severity(&self) -> i32 {
        self.severity
    }

    #[inline]
    pub fn message(&self) -> &str {
        &self.message
    }

    #[inline]
    pub fn data(&self) -> Option<&LogData> {
        self.data.as_ref()
    }

    #[inline]
    pub fn timestamp(&self) -> &DateTime<Local> {
        &self.timestamp
    }

    /// Render as `<type> <severity> <message> <timestamp> | <data>`
    ///
    /// The result never contains a line break.
    pub fn render(&self, format: &TimestampFormat) -> String {
        let data = self
            .data
            .as_ref()
            .map(|d| sanitize(&d.to_string()))
            .unwrap_or_default();

        format!(
            "{} {} {} {} | {}",
            self.log_type,
            self.severity,
            sanitize(&self.message),
            sanitize(&format.format(&self.timestamp)),
            data
        )
    }
}

impl fmt::Display for LogRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(&TimestampFormat::Classic))
    }
}
