//! Scan records and the owner grouping.

use std::path::{Path, PathBuf};
use std::time::Duration;

use compact_str::CompactString;
use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};

use crate::owner::OwnerId;

/// One regular file found during a scan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRecord {
    /// Directory containing the file.
    pub directory: PathBuf,
    /// Base name of the file.
    pub name: CompactString,
}

impl FileRecord {
    /// Create a new file record.
    pub fn new(directory: impl Into<PathBuf>, name: impl Into<CompactString>) -> Self {
        Self {
            directory: directory.into(),
            name: name.into(),
        }
    }

    /// Full path of the file.
    pub fn path(&self) -> PathBuf {
        self.directory.join(self.name.as_str())
    }
}

/// Files found under a root, grouped by owner.
///
/// Owners appear in the order the walk first met them; files within an owner
/// keep walk order. Neither order carries meaning.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanResult {
    /// Root path that was scanned.
    pub root: PathBuf,

    /// Files per owner.
    pub owners: IndexMap<OwnerId, Vec<FileRecord>>,

    /// Owners with a baseline file directly in the root.
    pub tracked: IndexSet<OwnerId>,

    /// Duration of the scan.
    pub scan_duration: Duration,
}

impl ScanResult {
    /// Create an empty result for a root.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            owners: IndexMap::new(),
            tracked: IndexSet::new(),
            scan_duration: Duration::ZERO,
        }
    }

    /// Root path that was scanned.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Append a file to its owner's list.
    pub fn push(&mut self, owner: OwnerId, record: FileRecord) {
        self.owners.entry(owner).or_default().push(record);
    }

    /// Note that an owner has a baseline in the root.
    pub fn track(&mut self, owner: OwnerId) {
        self.tracked.insert(owner);
    }

    /// Files owned by `owner`, empty if none were found.
    pub fn files(&self, owner: &OwnerId) -> &[FileRecord] {
        self.owners.get(owner).map(Vec::as_slice).unwrap_or_default()
    }

    /// Number of files owned by `owner`.
    pub fn count(&self, owner: &OwnerId) -> u64 {
        self.files(owner).len() as u64
    }

    /// Total number of files across all owners.
    pub fn total_files(&self) -> u64 {
        self.owners.values().map(|files| files.len() as u64).sum()
    }

    /// Every owner to process exactly once: owners with files in walk order,
    /// followed by owners known only from a baseline file.
    pub fn owners_to_process(&self) -> impl Iterator<Item = (&OwnerId, u64)> {
        let scanned = self
            .owners
            .iter()
            .map(|(owner, files)| (owner, files.len() as u64));
        let baseline_only = self
            .tracked
            .iter()
            .filter(|owner| !self.owners.contains_key(*owner))
            .map(|owner| (owner, 0));
        scanned.chain(baseline_only)
    }

    /// Fold a partial grouping of the same root into this one.
    ///
    /// Per-owner lists are concatenated, so merging partial results in any
    /// completion order yields the same counts.
    pub fn merge(&mut self, other: ScanResult) {
        for (owner, files) in other.owners {
            self.owners.entry(owner).or_default().extend(files);
        }
        self.tracked.extend(other.tracked);
        self.scan_duration = self.scan_duration.max(other.scan_duration);
    }
}
