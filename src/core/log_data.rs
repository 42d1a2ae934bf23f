//! Diagnostic payload attached to a log record

use serde::{Deserialize, Serialize};
use std::fmt;

/// Optional context carried by a [`LogRecord`](super::LogRecord).
///
/// # Example
///
/// ```
/// use sink_chain_logger::LogData;
///
/// let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "config.json missing");
/// let data = LogData::from_error(&io_err);
/// assert_eq!(data.to_string(), "config.json missing");
///
/// let data = LogData::from(42i64);
/// assert_eq!(data.to_string(), "42");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum LogData {
    Text(String),
    Integer(i64),
    Float(f64),
    /// An error captured at log time: its message and the message of its
    /// underlying cause (empty when there is none)
    Error { message: String, source: String },
    /// Text rendering of an arbitrary value
    Object(String),
}

impl LogData {
    pub fn from_error(err: &(dyn std::error::Error + 'static)) -> Self {
        LogData::Error {
            message: err.to_string(),
            source: err.source().map(|s| s.to_string()).unwrap_or_default(),
        }
    }

    /// Capture any displayable value as an object payload
    pub fn object(value: &impl fmt::Display) -> Self {
        LogData::Object(value.to_string())
    }
}

impl fmt::Display for LogData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogData::Text(s) | LogData::Object(s) => f.write_str(s),
            LogData::Integer(i) => write!(f, "{}", i),
            LogData::Float(v) => write!(f, "{}", v),
            LogData::Error { message, source } if source.is_empty() => f.write_str(message),
            LogData::Error { message, source } => write!(f, "{} (caused by: {})", message, source),
        }
    }
}

impl From<String> for LogData {
    fn from(value: String) -> Self {
        LogData::Text(value)
    }
}

impl From<&str> for LogData {
    fn from(value: &str) -> Self {
        LogData::Text(value.to_string())
    }
}

impl From<i64> for LogData {
    fn from(value: i64) -> Self {
        LogData::Integer(value)
    }
}

impl From<i32> for LogData {
    fn from(value: i32) -> Self {
        LogData::Integer(i64::from(value))
    }
}

impl From<u8> for LogData {
    fn from(value: u8) -> Self {
        LogData::Integer(i64::from(value))
    }
}

impl From<f64> for LogData {
    fn from(value: f64) -> Self {
        LogData::Float(value)
    }
}

impl From<f32> for LogData {
    fn from(value: f32) -> Self {
        LogData::Float(f64::from(value))
    }
}

impl From<std::io::Error> for LogData {
    fn from(err: std::io::Error) -> Self {
        LogData::from_error(&err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Wrapped(std::io::Error);

    impl fmt::Display for Wrapped {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "failed to load settings")
        }
    }

    impl std::error::Error for Wrapped {
        fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
            Some(&self.0)
        }
    }

    #[test]
    fn test_error_payload_keeps_cause() {
        let err = Wrapped(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "access denied",
        ));
        let data = LogData::from_error(&err);

        assert_eq!(
            data,
            LogData::Error {
                message: "failed to load settings".to_string(),
                source: "access denied".to_string(),
            }
        );
        assert_eq!(
            data.to_string(),
            "failed to load settings (caused by: access denied)"
        );
    }

    #[test]
    fn test_conversions() {
        assert_eq!(LogData::from("disk"), LogData::Text("disk".to_string()));
        assert_eq!(LogData::from(7u8), LogData::Integer(7));
        assert_eq!(LogData::from(2.5f32), LogData::Float(2.5));
        assert_eq!(LogData::object(&'x'), LogData::Object("x".to_string()));
    }
}
