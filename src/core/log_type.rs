//! Log type definitions

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// General category of a log record.
///
/// The discriminants are the stable numeric codes used by the binary record
/// encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[derive(Default)]
pub enum LogType {
    Error = 0,
    Warning = 1,
    /// General informational message
    #[default]
    Information = 2,
    /// Anything not covered by the other categories
    Other = 3,
    /// The application performed an action
    Action = 4,
    FileManagement = 5,
}

impl LogType {
    pub const ALL: [LogType; 6] = [
        LogType::Error,
        LogType::Warning,
        LogType::Information,
        LogType::Other,
        LogType::Action,
        LogType::FileManagement,
    ];

    pub fn to_str(&self) -> &'static str {
        match self {
            LogType::Error => "Error",
            LogType::Warning => "Warning",
            LogType::Information => "Information",
            LogType::Other => "Other",
            LogType::Action => "Action",
            LogType::FileManagement => "FileManagement",
        }
    }

    /// Numeric code of this type
    #[inline]
    pub fn code(&self) -> u8 {
        *self as u8
    }

    #[cfg(feature = "console")]
    pub fn color_code(&self) -> colored::Color {
        use colored::Color::*;
        match self {
            LogType::Error => Red,
            LogType::Warning => Yellow,
            LogType::Information => Green,
            LogType::Other => BrightBlack,
            LogType::Action => Cyan,
            LogType::FileManagement => Blue,
        }
    }
}

impl fmt::Display for LogType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_str())
    }
}

impl FromStr for LogType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "error" => Ok(LogType::Error),
            "warning" | "warn" => Ok(LogType::Warning),
            "information" | "info" => Ok(LogType::Information),
            "other" => Ok(LogType::Other),
            "action" => Ok(LogType::Action),
            "filemanagement" | "file_management" => Ok(LogType::FileManagement),
            _ => Err(format!("Invalid log type: '{}'", s)),
        }
    }
}
