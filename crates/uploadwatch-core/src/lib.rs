//! Core types for uploadwatch.
//!
//! This crate provides the data structures shared by the scanner and the
//! tracker: owner identities, scan results, configuration, and the baseline
//! store that persists the last known file count per owner.

mod baseline;
mod config;
mod error;
mod owner;
mod record;

pub use baseline::{
    BASELINE_PREFIX, BaselineStore, FileBaselineStore, baseline_path, parse_baseline_file_name,
};
pub use config::{Config, ConfigBuilder, ConfigBuilderError, Recipient};
pub use error::{BaselineError, ConfigError, ScanError};
pub use owner::{InvalidOwnerId, OwnerId};
pub use record::{FileRecord, ScanResult};
