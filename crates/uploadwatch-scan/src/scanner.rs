//! JWalk-based owner grouping scanner.

use std::path::Path;
use std::time::Instant;

use compact_str::CompactString;
use jwalk::{Parallelism, WalkDir};

use uploadwatch_core::{
    Config, FileRecord, OwnerId, ScanError, ScanResult, parse_baseline_file_name,
};

use crate::resolver::{OwnerResolver, raw_owner};

/// Traversal options.
#[derive(Debug, Clone, Copy)]
pub struct ScanOptions {
    /// Follow symbolic links.
    pub follow_symlinks: bool,
    /// Include hidden files (starting with .).
    pub include_hidden: bool,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            follow_symlinks: false,
            include_hidden: true,
        }
    }
}

impl From<&Config> for ScanOptions {
    fn from(config: &Config) -> Self {
        Self {
            follow_symlinks: config.follow_symlinks,
            include_hidden: config.include_hidden,
        }
    }
}

/// Scanner that groups regular files by owner.
pub struct OwnerScanner<R> {
    resolver: R,
    options: ScanOptions,
}

impl<R: OwnerResolver> OwnerScanner<R> {
    /// Create a scanner with default options.
    pub fn new(resolver: R) -> Self {
        Self::with_options(resolver, ScanOptions::default())
    }

    /// Create a scanner with explicit options.
    pub fn with_options(resolver: R, options: ScanOptions) -> Self {
        Self { resolver, options }
    }

    /// The resolver used for owner lookups.
    pub fn resolver(&self) -> &R {
        &self.resolver
    }

    /// Scan `root` and group every regular file by owner.
    ///
    /// Baseline files are never counted. Baseline files sitting directly in
    /// the root are reported in [`ScanResult::tracked`]. Any unreadable entry
    /// aborts the scan.
    pub fn scan(&self, root: impl AsRef<Path>) -> Result<ScanResult, ScanError> {
        let start = Instant::now();
        let root = root.as_ref();
        let root_path = root.canonicalize().map_err(|e| ScanError::io(root, e))?;

        // Verify root is a directory
        let root_metadata =
            std::fs::metadata(&root_path).map_err(|e| ScanError::io(&root_path, e))?;
        if !root_metadata.is_dir() {
            return Err(ScanError::NotADirectory { path: root_path });
        }

        let walker = WalkDir::new(&root_path)
            .parallelism(Parallelism::RayonDefaultPool {
                busy_timeout: std::time::Duration::from_millis(100),
            })
            .skip_hidden(!self.options.include_hidden)
            .follow_links(self.options.follow_symlinks)
            .sort(true)
            .min_depth(0);

        let mut result = ScanResult::new(&root_path);

        for entry_result in walker {
            let entry = entry_result.map_err(|err| ScanError::Walk {
                path: err.path().map(Path::to_path_buf).unwrap_or_else(|| root_path.clone()),
                message: err.to_string(),
            })?;

            let file_type = entry.file_type();
            if file_type.is_dir() {
                // jwalk yields unreadable directories as entries and keeps the
                // failure on the entry instead of yielding an error.
                if let Some(err) = &entry.read_children_error {
                    return Err(ScanError::Walk {
                        path: entry.path(),
                        message: err.to_string(),
                    });
                }
                continue;
            }

            let path = entry.path();
            if !file_type.is_file() {
                tracing::debug!(path = %path.display(), "skipping non-regular entry");
                continue;
            }

            let Some(directory) = path.parent() else {
                continue;
            };
            let file_name = entry.file_name().to_string_lossy();

            if let Some(owner) = parse_baseline_file_name(&file_name) {
                tracing::debug!(path = %path.display(), "skipping baseline file");
                if directory == root_path {
                    result.track(owner);
                }
                continue;
            }

            let metadata = entry.metadata().map_err(|err| ScanError::Walk {
                path: path.clone(),
                message: err.to_string(),
            })?;
            let owner = self.owner_of(&path, &metadata)?;

            result.push(
                owner,
                FileRecord::new(directory, CompactString::new(&file_name)),
            );
        }

        result.scan_duration = start.elapsed();
        tracing::info!(
            root = %root_path.display(),
            files = result.total_files(),
            owners = result.owners.len(),
            elapsed_ms = result.scan_duration.as_millis() as u64,
            "scan complete"
        );
        Ok(result)
    }

    fn owner_of(&self, path: &Path, metadata: &std::fs::Metadata) -> Result<OwnerId, ScanError> {
        let uid = raw_owner(path, metadata)?;
        Ok(self.resolver.resolve_uid(uid))
    }
}
