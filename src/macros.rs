//! Logging macros for ergonomic message formatting.
//!
//! Each macro formats its arguments like `format!` and sends the message
//! through a [`Chain`](crate::Chain) with the default severity. They evaluate
//! to the chain's `Result`.
//!
//! # Examples
//!
//! ```
//! use sink_chain_logger::prelude::*;
//! use sink_chain_logger::{action, info};
//!
//! let chain = Chain::builder().build();
//!
//! info!(chain, "Server started")?;
//!
//! let port = 8080;
//! action!(chain, "Listening on port {}", port)?;
//! # Ok::<(), LoggerError>(())
//! ```

/// Log a formatted message with an explicit [`LogType`](crate::LogType).
///
/// # Examples
///
/// ```
/// # use sink_chain_logger::prelude::*;
/// # let chain = Chain::builder().build();
/// use sink_chain_logger::log;
/// log!(chain, LogType::FileManagement, "Archived {} files", 3)?;
/// # Ok::<(), LoggerError>(())
/// ```
#[macro_export]
macro_rules! log {
    ($chain:expr, $log_type:expr, $($arg:tt)+) => {
        $chain.log_message(format!($($arg)+), $log_type)
    };
}

/// Log an error message.
#[macro_export]
macro_rules! error {
    ($chain:expr, $($arg:tt)+) => {
        $crate::log!($chain, $crate::LogType::Error, $($arg)+)
    };
}

/// Log a warning message.
#[macro_export]
macro_rules! warning {
    ($chain:expr, $($arg:tt)+) => {
        $crate::log!($chain, $crate::LogType::Warning, $($arg)+)
    };
}

/// Log an informational message.
#[macro_export]
macro_rules! info {
    ($chain:expr, $($arg:tt)+) => {
        $crate::log!($chain, $crate::LogType::Information, $($arg)+)
    };
}

/// Log that the application performed an action.
#[macro_export]
macro_rules! action {
    ($chain:expr, $($arg:tt)+) => {
        $crate::log!($chain, $crate::LogType::Action, $($arg)+)
    };
}
