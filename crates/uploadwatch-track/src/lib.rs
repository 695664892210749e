//! Delta tracking and notifications for uploadwatch.
//!
//! Given a [`ScanResult`], this crate works out how many files each owner
//! added since the previous run and tells the other configured users:
//!
//! - **Delta calculation** - compare the current count with the stored
//!   baseline, then store the current count
//! - **Notification** - one message per recipient, never to the uploader
//!
//! ```rust,ignore
//! use uploadwatch_core::{Config, FileBaselineStore};
//! use uploadwatch_scan::{OwnerScanner, SystemOwnerResolver};
//! use uploadwatch_track::{LogSink, Tracker};
//!
//! let config = Config::from_path("config.yaml").unwrap();
//! let scan = OwnerScanner::new(SystemOwnerResolver::new())
//!     .scan(&config.root_path)
//!     .unwrap();
//!
//! let summary = Tracker::new(&config, FileBaselineStore::new(), LogSink).run(&scan);
//! for result in summary.uploaders() {
//!     println!("{}: {:?}", result.owner, result.delta);
//! }
//! ```

mod delta;
mod notify;
mod run;

pub use delta::{Delta, DeltaCalculator, DeltaResult, TrackError};
pub use notify::{
    LogSink, MemorySink, Notification, NotificationSink, Notifier, plan, upload_message,
};
pub use run::{RunSummary, Tracker};

// Re-export core types
pub use uploadwatch_core::{Config, OwnerId, Recipient, ScanResult};
