//! Error types for scanning, configuration and baseline storage.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that abort a scan.
///
/// A scan either completes or fails as a whole; partial groupings are never
/// returned alongside one of these.
#[derive(Debug, Error)]
pub enum ScanError {
    /// Permission denied for a path.
    #[error("Permission denied: {path}")]
    PermissionDenied { path: PathBuf },

    /// Path not found.
    #[error("Path not found: {path}")]
    NotFound { path: PathBuf },

    /// Generic I/O error.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Root path is not a directory.
    #[error("Root path is not a directory: {path}")]
    NotADirectory { path: PathBuf },

    /// The tree walker could not read an entry.
    #[error("Walk failed at {path}: {message}")]
    Walk { path: PathBuf, message: String },

    /// The platform does not expose a numeric owner for this file.
    #[error("Owner unavailable for {path}")]
    OwnerUnavailable { path: PathBuf },
}

impl ScanError {
    /// Create an I/O error with path context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        match source.kind() {
            std::io::ErrorKind::PermissionDenied => Self::PermissionDenied { path },
            std::io::ErrorKind::NotFound => Self::NotFound { path },
            _ => Self::Io { path, source },
        }
    }
}

/// Errors reading or writing a persisted baseline.
#[derive(Debug, Error)]
pub enum BaselineError {
    /// The baseline file exists but does not hold a non-negative integer.
    #[error("Malformed baseline in {path}: {content:?}")]
    Parse { path: PathBuf, content: String },

    /// The baseline file could not be read or replaced.
    #[error("Baseline I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl BaselineError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Path of the baseline file involved.
    pub fn path(&self) -> &std::path::Path {
        match self {
            Self::Parse { path, .. } | Self::Io { path, .. } => path,
        }
    }
}

/// Errors loading the configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("Cannot read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The configuration file is not valid YAML for this schema.
    #[error("Cannot parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// The configuration parsed but failed validation.
    #[error("Invalid configuration: {message}")]
    Invalid { message: String },
}
