//! New-file counting against persisted baselines.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use uploadwatch_core::{BaselineError, BaselineStore, OwnerId};

/// Change in an owner's file count since the last run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Delta {
    /// The owner has this many more files than the baseline (always at least 1).
    Added(u64),
    /// The count stayed the same or shrank.
    NoNewFiles,
}

impl Delta {
    /// Compare a current count against a baseline.
    pub fn between(baseline: u64, current: u64) -> Self {
        if current > baseline {
            Self::Added(current - baseline)
        } else {
            Self::NoNewFiles
        }
    }

    /// Number of new files, `None` for [`Delta::NoNewFiles`].
    pub fn added(self) -> Option<u64> {
        match self {
            Self::Added(n) => Some(n),
            Self::NoNewFiles => None,
        }
    }
}

/// Outcome of a delta computation for one owner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeltaResult {
    /// Owner the delta belongs to.
    pub owner: OwnerId,
    /// New files since the last run.
    pub delta: Delta,
}

/// Failures that end one owner's processing.
#[derive(Debug, Error)]
pub enum TrackError {
    /// The stored baseline could not be read or was malformed; it was left untouched.
    #[error("Cannot read baseline for {owner}: {source}")]
    ReadBaseline {
        owner: OwnerId,
        #[source]
        source: BaselineError,
    },

    /// The new baseline could not be stored; the previous one remains.
    #[error("Cannot update baseline for {owner}: {source}")]
    WriteBaseline {
        owner: OwnerId,
        #[source]
        source: BaselineError,
    },
}

impl TrackError {
    /// Owner whose processing failed.
    pub fn owner(&self) -> &OwnerId {
        match self {
            Self::ReadBaseline { owner, .. } | Self::WriteBaseline { owner, .. } => owner,
        }
    }
}

/// Computes deltas and advances baselines.
#[derive(Debug, Clone, Default)]
pub struct DeltaCalculator<S> {
    store: S,
}

impl<S: BaselineStore> DeltaCalculator<S> {
    /// Create a calculator over a baseline store.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// The underlying baseline store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Compute the delta for `owner` and store `current` as the new baseline.
    ///
    /// A missing baseline counts as 0. The baseline is rewritten whether or
    /// not new files were found, so shrinkage is tracked too.
    pub fn compute(
        &self,
        owner: &OwnerId,
        current: u64,
        directory: &Path,
    ) -> Result<DeltaResult, TrackError> {
        let baseline = self
            .store
            .read(directory, owner)
            .map_err(|source| TrackError::ReadBaseline {
                owner: owner.clone(),
                source,
            })?
            .unwrap_or(0);

        let delta = Delta::between(baseline, current);
        if let Delta::Added(n) = delta {
            tracing::info!(owner = %owner, baseline, current, "{n} new files created by {owner}");
        }

        self.store
            .write(directory, owner, current)
            .map_err(|source| TrackError::WriteBaseline {
                owner: owner.clone(),
                source,
            })?;

        Ok(DeltaResult {
            owner: owner.clone(),
            delta,
        })
    }
}
