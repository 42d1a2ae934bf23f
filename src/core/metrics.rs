//! Chain metrics for observability
//!
//! Counters describing how records moved through a chain. They are atomics
//! because async chain operations update them from worker tasks.

use std::sync::atomic::{AtomicU64, Ordering};

/// Counters for one [`Chain`](super::Chain)
///
/// # Example
///
/// ```
/// use sink_chain_logger::ChainMetrics;
///
/// let metrics = ChainMetrics::new();
/// metrics.record_received();
/// metrics.record_accepted();
/// metrics.record_filtered();
///
/// assert_eq!(metrics.records_received(), 1);
/// assert_eq!(metrics.filter_rate(), 50.0);
/// ```
#[derive(Debug)]
pub struct ChainMetrics {
    /// Records submitted to the head of the chain
    records_received: AtomicU64,

    /// Sink deliveries that passed the severity filter
    records_accepted: AtomicU64,

    /// Sink evaluations rejected by the severity filter
    records_filtered: AtomicU64,

    /// Save walks started on the chain
    saves: AtomicU64,

    /// Sink append or flush calls that returned an error
    sink_failures: AtomicU64,
}

impl ChainMetrics {
    pub const fn new() -> Self {
        Self {
            records_received: AtomicU64::new(0),
            records_accepted: AtomicU64::new(0),
            records_filtered: AtomicU64::new(0),
            saves: AtomicU64::new(0),
            sink_failures: AtomicU64::new(0),
        }
    }

    #[inline]
    pub fn records_received(&self) -> u64 {
        self.records_received.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn records_accepted(&self) -> u64 {
        self.records_accepted.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn records_filtered(&self) -> u64 {
        self.records_filtered.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn saves(&self) -> u64 {
        self.saves.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn sink_failures(&self) -> u64 {
        self.sink_failures.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn record_received(&self) -> u64 {
        self.records_received.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_accepted(&self) -> u64 {
        self.records_accepted.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_filtered(&self) -> u64 {
        self.records_filtered.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_save(&self) -> u64 {
        self.saves.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_failure(&self) -> u64 {
        self.sink_failures.fetch_add(1, Ordering::Relaxed)
    }

    /// Share of sink evaluations that were filtered out, as a percentage
    ///
    /// Returns 0.0 if nothing has been evaluated.
    pub fn filter_rate(&self) -> f64 {
        let accepted = self.records_accepted();
        let filtered = self.records_filtered();
        let total = accepted + filtered;

        if total == 0 {
            0.0
        } else {
            (filtered as f64 / total as f64) * 100.0
        }
    }

    /// Reset all counters to zero
    pub fn reset(&self) {
        self.records_received.store(0, Ordering::Relaxed);
        self.records_accepted.store(0, Ordering::Relaxed);
        self.records_filtered.store(0, Ordering::Relaxed);
        self.saves.store(0, Ordering::Relaxed);
        self.sink_failures.store(0, Ordering::Relaxed);
    }
}

impl Default for ChainMetrics {
    fn default() -> Self {
        Self::new()
    }
}
