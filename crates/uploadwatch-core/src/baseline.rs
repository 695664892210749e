//! Persisted per-owner file counts.
//!
//! Each owner's last known count lives in a plain text file inside the
//! scanned tree, at `<directory>/last_num_files_<owner>`. The scanner uses
//! [`parse_baseline_file_name`] to keep these files out of its counts, so the
//! path scheme must only be built through this module.

use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::{Builder, NamedTempFile};

use crate::error::BaselineError;
use crate::owner::OwnerId;

/// File name prefix of every baseline file.
pub const BASELINE_PREFIX: &str = "last_num_files_";

/// Path of the baseline file for `owner` in `directory`.
pub fn baseline_path(directory: &Path, owner: &OwnerId) -> PathBuf {
    directory.join(format!("{BASELINE_PREFIX}{owner}"))
}

/// If `name` is a baseline file name, the owner it belongs to.
pub fn parse_baseline_file_name(name: &str) -> Option<OwnerId> {
    name.strip_prefix(BASELINE_PREFIX)
        .and_then(|owner| OwnerId::new(owner).ok())
}

/// Storage for the last known file count of each (directory, owner) pair.
pub trait BaselineStore {
    /// Read the stored count, `None` if the owner has no baseline yet.
    fn read(&self, directory: &Path, owner: &OwnerId) -> Result<Option<u64>, BaselineError>;

    /// Replace the stored count.
    fn write(&self, directory: &Path, owner: &OwnerId, count: u64) -> Result<(), BaselineError>;
}

/// Baseline store backed by plain text files next to the scanned data.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileBaselineStore;

impl FileBaselineStore {
    /// Create a new file-backed store.
    pub fn new() -> Self {
        Self
    }
}

impl BaselineStore for FileBaselineStore {
    fn read(&self, directory: &Path, owner: &OwnerId) -> Result<Option<u64>, BaselineError> {
        let path = baseline_path(directory, owner);
        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(BaselineError::io(path, err)),
        };

        content
            .trim()
            .parse::<u64>()
            .map(Some)
            .map_err(|_| BaselineError::Parse { path, content })
    }

    fn write(&self, directory: &Path, owner: &OwnerId, count: u64) -> Result<(), BaselineError> {
        let path = baseline_path(directory, owner);

        // Write beside the target and rename over it, so readers see either
        // the old count or the new one.
        let mut file = temp_file_in(directory).map_err(|e| BaselineError::io(&path, e))?;
        file.write_all(count.to_string().as_bytes())
            .map_err(|e| BaselineError::io(&path, e))?;
        file.persist(&path)
            .map_err(|e| BaselineError::io(&path, e.error))?;

        tracing::debug!(owner = %owner, count, path = %path.display(), "baseline updated");
        Ok(())
    }
}

/// Temporary file that will get the same mode as a freshly created file
/// (0666 minus umask) once persisted.
#[cfg(unix)]
fn temp_file_in(directory: &Path) -> std::io::Result<NamedTempFile> {
    use std::os::unix::fs::PermissionsExt;

    Builder::new()
        .permissions(std::fs::Permissions::from_mode(0o666))
        .tempfile_in(directory)
}

#[cfg(not(unix))]
fn temp_file_in(directory: &Path) -> std::io::Result<NamedTempFile> {
    Builder::new().tempfile_in(directory)
}
