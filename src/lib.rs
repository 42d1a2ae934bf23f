//! # Sink Chain Logger
//!
//! A logging library built as a chain of sinks. Every record is offered to
//! each sink in order; each sink filters by its own severity level and then
//! acts on the record, and the walk always reaches the end of the chain.
//!
//! ## Features
//!
//! - **Console sink**: prints accepted records immediately
//! - **File sink**: buffers records, flushes past a threshold and keeps the
//!   file within a maximum line count by dropping the oldest lines
//! - **Async walks**: run sink work on the blocking pool (`async` feature)
//! - **JSON configuration**: build a chain from a declarative description
//!
//! ```no_run
//! use sink_chain_logger::prelude::*;
//!
//! let chain = Chain::builder()
//!     .sink(ConsoleSink::new())
//!     .sink(FileSink::new("app.log").with_severity_level(2))
//!     .build();
//!
//! chain.log_with_severity("Connection lost", LogType::Warning, 3)?;
//! chain.save()?;
//! # Ok::<(), LoggerError>(())
//! ```

pub mod core;
pub mod macros;
pub mod sinks;

pub mod prelude {
    #[cfg(feature = "async")]
    pub use crate::core::Propagation;
    pub use crate::core::{
        Chain, ChainBuilder, ChainConfig, ChainMetrics, FileSinkConfig, LogData, LogRecord,
        LogType, LoggerError, Result, Sink, SinkConfig, TimestampFormat,
    };
    pub use crate::sinks::{ConsoleSink, FileSink};
}

#[cfg(feature = "async")]
pub use self::core::Propagation;
pub use self::core::{
    Chain, ChainBuilder, ChainConfig, ChainMetrics, FileSinkConfig, LogData, LogRecord, LogType,
    LoggerError, Result, Sink, SinkConfig, TimestampFormat,
};
pub use sinks::{ConsoleSink, FileSink};
