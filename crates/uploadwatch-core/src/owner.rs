//! Owner identity.

use std::fmt;

use compact_str::{CompactString, ToCompactString};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Identity of a file owner: a resolved username, or the numeric uid when
/// the name could not be resolved.
///
/// An `OwnerId` is never empty and never contains a path separator, so it can
/// always be embedded in a baseline file name without escaping its directory.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct OwnerId(CompactString);

/// Rejected owner identity.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid owner id {value:?}: {reason}")]
pub struct InvalidOwnerId {
    /// The rejected value.
    pub value: String,
    /// Why it was rejected.
    pub reason: &'static str,
}

impl OwnerId {
    /// Validate and wrap an owner identity.
    pub fn new(value: impl AsRef<str>) -> Result<Self, InvalidOwnerId> {
        let value = value.as_ref();
        let reject = |reason| InvalidOwnerId {
            value: value.to_string(),
            reason,
        };

        if value.is_empty() {
            return Err(reject("empty"));
        }
        if value == "." || value == ".." {
            return Err(reject("relative path component"));
        }
        if value.contains(['/', '\\', '\0']) {
            return Err(reject("contains a path separator or NUL"));
        }
        Ok(Self(CompactString::new(value)))
    }

    /// Owner identity for a uid that could not be resolved to a name.
    pub fn from_uid(uid: u32) -> Self {
        Self(uid.to_compact_string())
    }

    /// The identity as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OwnerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for OwnerId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for OwnerId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for OwnerId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

impl TryFrom<String> for OwnerId {
    type Error = InvalidOwnerId;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<OwnerId> for String {
    fn from(owner: OwnerId) -> Self {
        owner.0.into_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_owner() {
        let owner = OwnerId::new("alice").unwrap();
        assert_eq!(owner.as_str(), "alice");
        assert_eq!(owner, "alice");
        assert_eq!(owner.to_string(), "alice");
    }

    #[test]
    fn test_rejects_unsafe_names() {
        assert!(OwnerId::new("").is_err());
        assert!(OwnerId::new(".").is_err());
        assert!(OwnerId::new("..").is_err());
        assert!(OwnerId::new("a/b").is_err());
        assert!(OwnerId::new("a\\b").is_err());
        assert!(OwnerId::new("a\0b").is_err());
    }

    #[test]
    fn test_from_uid() {
        assert_eq!(OwnerId::from_uid(999), "999");
        assert_eq!(OwnerId::from_uid(0), "0");
    }
}
