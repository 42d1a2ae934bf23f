//! Chain of sinks
//!
//! A [`Chain`] is an ordered, fixed list of sinks. Logging a record walks the
//! whole list: each sink applies its own severity filter, and a rejection or
//! failure at one sink never keeps the record from the sinks after it.

use super::{
    config::{ChainConfig, FileSinkConfig, SinkConfig},
    error::{LoggerError, Result},
    log_record::LogRecord,
    log_type::LogType,
    metrics::ChainMetrics,
    sink::Sink,
};
use crate::sinks::{ConsoleSink, FileSink};
use parking_lot::Mutex;
use std::sync::Arc;

/// A sink slot. The lock is only ever contended when a caller mixes a
/// detached async propagation with further calls on the same chain.
type SharedSink = Arc<Mutex<Box<dyn Sink>>>;

pub struct Chain {
    links: Arc<[SharedSink]>,
    metrics: Arc<ChainMetrics>,
}

/// Work applied to one sink during a walk
#[derive(Clone)]
enum Step {
    Log(Arc<LogRecord>),
    Save,
}

impl Step {
    fn apply(&self, link: &SharedSink, metrics: &ChainMetrics) -> Result<()> {
        let mut sink = link.lock();
        let result = match self {
            Step::Log(record) => {
                if !sink.accepts(record) {
                    metrics.record_filtered();
                    return Ok(());
                }
                metrics.record_accepted();
                sink.append(record)
            }
            Step::Save => sink.flush(),
        };

        if result.is_err() {
            metrics.record_failure();
        }
        result
    }
}

/// Keep the first failure of a walk for the caller and report the rest
fn note_failure(first_error: &mut Option<LoggerError>, idx: usize, err: LoggerError) {
    if first_error.is_none() {
        *first_error = Some(err);
    } else {
        eprintln!("[LOGGER ERROR] Sink #{} failed: {}", idx, err);
    }
}

impl Chain {
    /// Create a builder for Chain
    ///
    /// # Example
    /// ```no_run
    /// use sink_chain_logger::prelude::*;
    ///
    /// let chain = Chain::builder()
    ///     .sink(ConsoleSink::new().with_severity_level(1))
    ///     .sink(FileSink::new("app.log"))
    ///     .build();
    ///
    /// chain.log_message("Application started", LogType::Information)?;
    /// chain.save()?;
    /// # Ok::<(), LoggerError>(())
    /// ```
    #[must_use]
    pub fn builder() -> ChainBuilder {
        ChainBuilder::new()
    }

    /// Build a chain from its declarative description, head first
    pub fn from_config(config: &ChainConfig) -> Result<Self> {
        let mut builder = ChainBuilder::new();
        for sink in &config.sinks {
            builder = match sink {
                SinkConfig::Console {
                    severity_level,
                    colors,
                } => builder.sink(
                    ConsoleSink::new()
                        .with_severity_level(*severity_level)
                        .with_colors(*colors),
                ),
                SinkConfig::File {
                    path,
                    severity_level,
                    save_threshold,
                    max_file_lines,
                } => {
                    let config = FileSinkConfig::new()
                        .with_save_threshold(*save_threshold)
                        .with_max_file_lines(*max_file_lines);
                    builder.sink(
                        FileSink::with_config(path, config)?.with_severity_level(*severity_level),
                    )
                }
            };
        }
        Ok(builder.build())
    }

    /// Number of sinks in the chain
    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    /// Inspect the sink at `index` (0 is the head)
    pub fn with_sink<R>(&self, index: usize, f: impl FnOnce(&dyn Sink) -> R) -> Option<R> {
        self.links.get(index).map(|link| {
            let sink = link.lock();
            f(&**sink)
        })
    }

    pub fn metrics(&self) -> &ChainMetrics {
        &self.metrics
    }

    fn walk(&self, step: &Step) -> Result<()> {
        let mut first_error = None;
        for (idx, link) in self.links.iter().enumerate() {
            if let Err(e) = step.apply(link, &self.metrics) {
                note_failure(&mut first_error, idx, e);
            }
        }
        first_error.map_or(Ok(()), Err)
    }

    /// Offer `record` to every sink, head first.
    ///
    /// Returns the first sink failure after the walk has completed.
    pub fn log(&self, record: &LogRecord) -> Result<()> {
        self.metrics.record_received();
        self.walk(&Step::Log(Arc::new(record.clone())))
    }

    /// Log a message with the default severity of 0
    pub fn log_message(&self, message: impl Into<String>, log_type: LogType) -> Result<()> {
        self.log(&LogRecord::new(log_type, message))
    }

    pub fn log_with_severity(
        &self,
        message: impl Into<String>,
        log_type: LogType,
        severity: i32,
    ) -> Result<()> {
        self.log(&LogRecord::with_severity(log_type, severity, message))
    }

    /// Flush every sink, head first
    pub fn save(&self) -> Result<()> {
        self.metrics.record_save();
        self.walk(&Step::Save)
    }
}

#[cfg(feature = "async")]
mod nonblocking {
    use super::*;
    use tokio::task::JoinHandle;

    /// Run one step on the blocking pool
    async fn run_step(link: SharedSink, step: Step, metrics: Arc<ChainMetrics>) -> Result<()> {
        tokio::task::spawn_blocking(move || step.apply(&link, &metrics))
            .await
            .map_err(|e| LoggerError::task_join(e.to_string()))?
    }

    /// Apply `step` to `links[start..]`, one sink at a time
    async fn walk_from(
        links: Arc<[SharedSink]>,
        start: usize,
        step: Step,
        metrics: Arc<ChainMetrics>,
    ) -> Result<()> {
        let mut first_error = None;
        for (idx, link) in links.iter().enumerate().skip(start) {
            if let Err(e) = run_step(Arc::clone(link), step.clone(), Arc::clone(&metrics)).await {
                note_failure(&mut first_error, idx, e);
            }
        }
        first_error.map_or(Ok(()), Err)
    }

    /// Handle on the downstream part of an async chain walk.
    ///
    /// Dropping it detaches the walk; it still runs to completion.
    #[must_use = "dropping a Propagation detaches the downstream walk"]
    pub struct Propagation {
        handle: Option<JoinHandle<Result<()>>>,
    }

    impl Propagation {
        fn finished() -> Self {
            Self { handle: None }
        }

        fn spawn(links: Arc<[SharedSink]>, step: Step, metrics: Arc<ChainMetrics>) -> Self {
            if links.len() <= 1 {
                return Self::finished();
            }
            Self {
                handle: Some(tokio::spawn(walk_from(links, 1, step, metrics))),
            }
        }

        pub fn is_finished(&self) -> bool {
            self.handle.as_ref().map_or(true, JoinHandle::is_finished)
        }

        /// Wait for every downstream sink and return the first failure
        pub async fn join(self) -> Result<()> {
            match self.handle {
                None => Ok(()),
                Some(handle) => handle
                    .await
                    .map_err(|e| LoggerError::task_join(e.to_string()))?,
            }
        }
    }

    impl Chain {
        async fn start(&self, step: Step) -> Result<Propagation> {
            let Some(head) = self.links.first() else {
                return Ok(Propagation::finished());
            };

            let head_result =
                run_step(Arc::clone(head), step.clone(), Arc::clone(&self.metrics)).await;
            let propagation =
                Propagation::spawn(Arc::clone(&self.links), step, Arc::clone(&self.metrics));
            head_result.map(|()| propagation)
        }

        /// Apply `record` to the head sink off the caller's thread, then
        /// dispatch the rest of the walk.
        ///
        /// When this resolves the head sink's work is complete; the returned
        /// [`Propagation`] covers the sinks after it. If the head sink fails
        /// the downstream walk is still dispatched, detached, and the head's
        /// error is returned.
        pub async fn log_async(&self, record: LogRecord) -> Result<Propagation> {
            self.metrics.record_received();
            self.start(Step::Log(Arc::new(record))).await
        }

        /// Async counterpart of [`Chain::save`] with the same contract as
        /// [`Chain::log_async`]
        pub async fn save_async(&self) -> Result<Propagation> {
            self.metrics.record_save();
            self.start(Step::Save).await
        }

        /// Walk the whole chain off the caller's thread and wait for every sink
        pub async fn log_chain_async(&self, record: LogRecord) -> Result<()> {
            self.metrics.record_received();
            walk_from(
                Arc::clone(&self.links),
                0,
                Step::Log(Arc::new(record)),
                Arc::clone(&self.metrics),
            )
            .await
        }

        pub async fn save_chain_async(&self) -> Result<()> {
            self.metrics.record_save();
            walk_from(
                Arc::clone(&self.links),
                0,
                Step::Save,
                Arc::clone(&self.metrics),
            )
            .await
        }
    }
}

#[cfg(feature = "async")]
pub use nonblocking::Propagation;

/// Builder for constructing a Chain head first
///
/// The topology is fixed once [`build`](ChainBuilder::build) returns.
pub struct ChainBuilder {
    sinks: Vec<Box<dyn Sink>>,
}

impl ChainBuilder {
    pub fn new() -> Self {
        Self { sinks: Vec::new() }
    }

    /// Append a sink after the ones already added
    #[must_use = "builder methods return a new value"]
    pub fn sink<S: Sink + 'static>(mut self, sink: S) -> Self {
        self.sinks.push(Box::new(sink));
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn boxed_sink(mut self, sink: Box<dyn Sink>) -> Self {
        self.sinks.push(sink);
        self
    }

    pub fn build(self) -> Chain {
        Chain {
            links: self
                .sinks
                .into_iter()
                .map(|sink| Arc::new(Mutex::new(sink)))
                .collect(),
            metrics: Arc::new(ChainMetrics::new()),
        }
    }
}

impl Default for ChainBuilder {
    fn default() -> Self {
        Self::new()
    }
}
