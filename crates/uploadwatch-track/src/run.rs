//! Per-owner processing loop.

use uploadwatch_core::{BaselineStore, Config, ScanResult};

use crate::delta::{Delta, DeltaCalculator, DeltaResult, TrackError};
use crate::notify::{NotificationSink, Notifier};

/// What one run did.
#[derive(Debug, Default)]
pub struct RunSummary {
    /// Deltas for every owner processed successfully, in processing order.
    pub results: Vec<DeltaResult>,
    /// Notifications delivered.
    pub notifications: usize,
    /// Owners whose processing failed.
    pub failures: Vec<TrackError>,
}

impl RunSummary {
    /// Owners that uploaded new files.
    pub fn uploaders(&self) -> impl Iterator<Item = &DeltaResult> {
        self.results
            .iter()
            .filter(|r| matches!(r.delta, Delta::Added(_)))
    }

    /// Check if any owner failed.
    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }
}

/// Drives delta computation and notification for every owner in a scan.
pub struct Tracker<'a, S, K> {
    config: &'a Config,
    calculator: DeltaCalculator<S>,
    notifier: Notifier<K>,
}

impl<'a, S: BaselineStore, K: NotificationSink> Tracker<'a, S, K> {
    /// Create a tracker for one run.
    pub fn new(config: &'a Config, store: S, sink: K) -> Self {
        Self {
            config,
            calculator: DeltaCalculator::new(store),
            notifier: Notifier::new(sink),
        }
    }

    /// The notifier, for inspecting its sink.
    pub fn notifier(&self) -> &Notifier<K> {
        &self.notifier
    }

    /// Process every owner in `scan` exactly once.
    ///
    /// Baselines live in the scanned root. A failure for one owner is logged
    /// and recorded; the remaining owners are still processed.
    pub fn run(&mut self, scan: &ScanResult) -> RunSummary {
        let mut summary = RunSummary::default();

        for (owner, count) in scan.owners_to_process() {
            match self.calculator.compute(owner, count, scan.root()) {
                Ok(result) => {
                    summary.notifications += self.notifier.notify(owner, result.delta, self.config);
                    summary.results.push(result);
                }
                Err(err) => {
                    tracing::error!(owner = %owner, "{err}");
                    summary.failures.push(err);
                }
            }
        }

        tracing::info!(
            owners = summary.results.len() + summary.failures.len(),
            uploaders = summary.uploaders().count(),
            notifications = summary.notifications,
            failures = summary.failures.len(),
            "run complete"
        );
        summary
    }
}
