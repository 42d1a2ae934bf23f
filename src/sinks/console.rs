//! Console sink implementation

use crate::core::{LogRecord, Result, Sink, TimestampFormat};
#[cfg(feature = "console")]
use colored::Colorize;
use std::io::Write;

/// Line printed by [`ConsoleSink`] on save
pub const SAVE_NOTICE: &str = "Save Logs";

/// Prints every accepted record immediately; never buffers.
pub struct ConsoleSink {
    severity_level: i32,
    #[cfg_attr(not(feature = "console"), allow(dead_code))]
    use_colors: bool,
    timestamp_format: TimestampFormat,
    out: Box<dyn Write + Send>,
}

impl ConsoleSink {
    /// Console sink writing to standard output
    pub fn new() -> Self {
        Self::with_writer(std::io::stdout())
    }

    /// Console sink writing to any stream, e.g. a capture buffer in tests
    pub fn with_writer(out: impl Write + Send + 'static) -> Self {
        Self {
            severity_level: 0,
            use_colors: false,
            timestamp_format: TimestampFormat::default(),
            out: Box::new(out),
        }
    }

    #[must_use]
    pub fn with_severity_level(mut self, level: i32) -> Self {
        self.severity_level = level;
        self
    }

    /// Color the type token of each line. Ignored without the `console` feature.
    #[must_use]
    pub fn with_colors(mut self, use_colors: bool) -> Self {
        self.use_colors = use_colors;
        self
    }

    /// Set the timestamp format for this sink
    ///
    /// # Examples
    ///
    /// ```
    /// use sink_chain_logger::sinks::ConsoleSink;
    /// use sink_chain_logger::TimestampFormat;
    ///
    /// let sink = ConsoleSink::new()
    ///     .with_timestamp_format(TimestampFormat::Rfc3339);
    /// ```
    #[must_use]
    pub fn with_timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.timestamp_format = format;
        self
    }

    fn format_line(&self, record: &LogRecord) -> String {
        let line = record.render(&self.timestamp_format);

        #[cfg(feature = "console")]
        if self.use_colors {
            let type_str = record.log_type().to_str();
            return format!(
                "{}{}",
                type_str.color(record.log_type().color_code()),
                &line[type_str.len()..]
            );
        }

        line
    }
}

impl Default for ConsoleSink {
    fn default() -> Self {
        Self::new()
    }
}

impl Sink for ConsoleSink {
    fn severity_level(&self) -> i32 {
        self.severity_level
    }

    fn append(&mut self, record: &LogRecord) -> Result<()> {
        let line = self.format_line(record);
        writeln!(self.out, "{}", line)?;
        self.out.flush()?;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        writeln!(self.out, "{}", SAVE_NOTICE)?;
        self.out.flush()?;
        Ok(())
    }

    fn name(&self) -> &str {
        "console"
    }
}
