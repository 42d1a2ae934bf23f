//! Core chain types and traits

pub mod binary;
pub mod chain;
pub mod config;
pub mod error;
pub mod log_data;
pub mod log_record;
pub mod log_type;
pub mod metrics;
pub mod sink;
pub mod timestamp;

#[cfg(feature = "async")]
pub use chain::Propagation;
pub use chain::{Chain, ChainBuilder};
pub use config::{
    ChainConfig, FileSinkConfig, SinkConfig, DEFAULT_MAX_FILE_LINES, DEFAULT_SAVE_THRESHOLD,
};
pub use error::{LoggerError, Result};
pub use log_data::LogData;
pub use log_record::LogRecord;
pub use log_type::LogType;
pub use metrics::ChainMetrics;
pub use sink::Sink;
pub use timestamp::TimestampFormat;
