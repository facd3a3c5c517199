//! Scan progress reporting.

use serde::{Deserialize, Serialize};

/// Default lower bound on records between progress events.
pub const DEFAULT_MIN_INTERVAL: usize = 500;

/// Default target number of progress events per scan.
pub const DEFAULT_GRANULARITY: usize = 100;

/// Records scanned so far out of the scan's total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressEvent {
    #[serde(rename = "loaded")]
    pub processed: usize,
    pub total: usize,
}

impl ProgressEvent {
    /// Completion percentage (0.0 to 100.0).
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn percent(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            (self.processed as f64 / self.total as f64) * 100.0
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressSettings {
    pub min_interval: usize,
    pub granularity: usize,
}

impl Default for ProgressSettings {
    fn default() -> Self {
        Self {
            min_interval: DEFAULT_MIN_INTERVAL,
            granularity: DEFAULT_GRANULARITY,
        }
    }
}

impl ProgressSettings {
    /// `max(min_interval, total / granularity)`, never below 1.
    #[must_use]
    pub fn interval(&self, total: usize) -> usize {
        self.min_interval
            .max(total / self.granularity.max(1))
            .max(1)
    }
}

/// Counts scanned records and emits an event on every multiple of the interval.
///
/// There is no event at the start of a scan and no guaranteed event at 100%;
/// the caller's terminal message marks completion.
#[derive(Debug, Clone)]
pub struct ProgressReporter {
    total: usize,
    interval: usize,
    processed: usize,
}

impl ProgressReporter {
    #[must_use]
    pub fn new(total: usize, settings: &ProgressSettings) -> Self {
        Self {
            total,
            interval: settings.interval(total),
            processed: 0,
        }
    }

    /// Record one scanned record.
    pub fn advance(&mut self) -> Option<ProgressEvent> {
        self.processed += 1;
        (self.processed % self.interval == 0).then_some(ProgressEvent {
            processed: self.processed,
            total: self.total,
        })
    }

    #[must_use]
    pub fn interval(&self) -> usize {
        self.interval
    }

    #[must_use]
    pub fn processed(&self) -> usize {
        self.processed
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.total
    }
}
