//! Directory scanning for uploadwatch.
//!
//! This crate walks a directory tree with jwalk and groups every regular file
//! by the user that owns it.
//!
//! # Overview
//!
//! - **Owner resolution** behind the [`OwnerResolver`] trait, with a system
//!   user-database implementation and a fixed-table one
//! - **Self-exclusion** of baseline files, which live inside the scanned tree
//! - **Fail-fast** walking: any unreadable entry aborts the scan
//!
//! # Example
//!
//! ```rust,no_run
//! use uploadwatch_scan::{OwnerScanner, SystemOwnerResolver};
//!
//! let scanner = OwnerScanner::new(SystemOwnerResolver::new());
//! let result = scanner.scan("/srv/photos").unwrap();
//!
//! for (owner, files) in &result.owners {
//!     println!("{owner}: {} files", files.len());
//! }
//! ```

mod resolver;
mod scanner;

pub use resolver::{OwnerResolver, StaticOwnerResolver, SystemOwnerResolver, raw_owner};
pub use scanner::{OwnerScanner, ScanOptions};

// Re-export core types for convenience
pub use uploadwatch_core::{FileRecord, OwnerId, ScanError, ScanResult};
