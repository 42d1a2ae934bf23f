//! Timestamp formatting utilities
//!
//! Record timestamps are captured in local time. The default rendering is the
//! classic `MM/dd/yy_HH:mm:ss:fff` layout shared by console and file output.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// strftime pattern of [`TimestampFormat::Classic`]
pub const CLASSIC_PATTERN: &str = "%m/%d/%y_%H:%M:%S:%3f";

/// Timestamp format options for rendered records
///
/// # Examples
///
/// ```
/// use sink_chain_logger::TimestampFormat;
/// use chrono::{Local, TimeZone};
///
/// let at = Local.with_ymd_and_hms(2024, 3, 9, 7, 5, 1).single().unwrap();
/// assert_eq!(TimestampFormat::Classic.format(&at), "03/09/24_07:05:01:000");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimestampFormat {
    /// `03/09/24_07:05:01:042`
    #[default]
    Classic,

    /// RFC 3339 with the local offset: `2024-03-09T07:05:01.042+01:00`
    Rfc3339,

    /// Unix timestamp in milliseconds: `1709964301042`
    UnixMillis,

    /// Custom strftime format
    Custom(String),
}

impl TimestampFormat {
    #[must_use]
    pub fn format(&self, datetime: &DateTime<Local>) -> String {
        match self {
            TimestampFormat::Classic => datetime.format(CLASSIC_PATTERN).to_string(),
            TimestampFormat::Rfc3339 => datetime.to_rfc3339(),
            TimestampFormat::UnixMillis => datetime.timestamp_millis().to_string(),
            TimestampFormat::Custom(format_str) => datetime.format(format_str).to_string(),
        }
    }
}
