//! Sink trait for log chain handlers

use super::{error::Result, log_record::LogRecord};

/// One handler in a [`Chain`](super::Chain).
///
/// The chain evaluates [`accepts`](Sink::accepts) for every record on every
/// sink; only accepted records reach [`append`](Sink::append). A sink's
/// decision never stops the record from reaching the sinks after it.
pub trait Sink: Send {
    /// Records with a severity strictly below this level are ignored
    fn severity_level(&self) -> i32;

    fn accepts(&self, record: &LogRecord) -> bool {
        record.severity() >= self.severity_level()
    }

    /// Act on an accepted record
    fn append(&mut self, record: &LogRecord) -> Result<()>;

    /// Persist buffered records and empty the buffer
    fn flush(&mut self) -> Result<()>;

    /// Records held but not yet persisted, in arrival order
    fn buffered(&self) -> &[LogRecord] {
        &[]
    }

    fn name(&self) -> &str;
}

impl<S: Sink + ?Sized> Sink for Box<S> {
    fn severity_level(&self) -> i32 {
        (**self).severity_level()
    }

    fn accepts(&self, record: &LogRecord) -> bool {
        (**self).accepts(record)
    }

    fn append(&mut self, record: &LogRecord) -> Result<()> {
        (**self).append(record)
    }

    fn flush(&mut self) -> Result<()> {
        (**self).flush()
    }

    fn buffered(&self) -> &[LogRecord] {
        (**self).buffered()
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}
