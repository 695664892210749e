//! Mapping raw file ownership to owner identities.

use std::collections::HashMap;
use std::path::Path;

use dashmap::DashMap;
use uploadwatch_core::{OwnerId, ScanError};

/// Resolves numeric owner ids to owner identities.
///
/// Resolution never fails: an id that cannot be named resolves to its
/// decimal form.
pub trait OwnerResolver: Send + Sync {
    /// Resolve a numeric owner id.
    fn resolve_uid(&self, uid: u32) -> OwnerId;
}

impl<R: OwnerResolver + ?Sized> OwnerResolver for &R {
    fn resolve_uid(&self, uid: u32) -> OwnerId {
        (**self).resolve_uid(uid)
    }
}

/// Extract the numeric owner of a file from its metadata.
#[cfg(unix)]
pub fn raw_owner(_path: &Path, metadata: &std::fs::Metadata) -> Result<u32, ScanError> {
    use std::os::unix::fs::MetadataExt;
    Ok(metadata.uid())
}

#[cfg(not(unix))]
pub fn raw_owner(path: &Path, _metadata: &std::fs::Metadata) -> Result<u32, ScanError> {
    Err(ScanError::OwnerUnavailable {
        path: path.to_path_buf(),
    })
}

fn fallback(uid: u32, reason: &dyn std::fmt::Display) -> OwnerId {
    tracing::info!(uid, %reason, "User lookup failed, returning UID instead: {uid}");
    OwnerId::from_uid(uid)
}

/// Resolver backed by the system user database.
///
/// Each uid is looked up once; later files with the same owner hit the cache.
#[derive(Debug, Default)]
pub struct SystemOwnerResolver {
    cache: DashMap<u32, OwnerId>,
}

impl SystemOwnerResolver {
    /// Create a new resolver with an empty cache.
    pub fn new() -> Self {
        Self {
            cache: DashMap::new(),
        }
    }

    /// Number of uids resolved so far.
    pub fn cached(&self) -> usize {
        self.cache.len()
    }

    #[cfg(unix)]
    fn lookup(uid: u32) -> OwnerId {
        use nix::unistd::{Uid, User};

        match User::from_uid(Uid::from_raw(uid)) {
            Ok(Some(user)) => match OwnerId::new(&user.name) {
                Ok(owner) => owner,
                Err(err) => fallback(uid, &err),
            },
            Ok(None) => fallback(uid, &"unknown user"),
            Err(err) => fallback(uid, &err),
        }
    }

    #[cfg(not(unix))]
    fn lookup(uid: u32) -> OwnerId {
        fallback(uid, &"no user database on this platform")
    }
}

impl OwnerResolver for SystemOwnerResolver {
    fn resolve_uid(&self, uid: u32) -> OwnerId {
        self.cache
            .entry(uid)
            .or_insert_with(|| Self::lookup(uid))
            .clone()
    }
}

/// Resolver with a fixed uid table.
#[derive(Debug, Clone, Default)]
pub struct StaticOwnerResolver {
    names: HashMap<u32, OwnerId>,
}

impl StaticOwnerResolver {
    /// Create an empty table; every uid falls back to its decimal form.
    pub fn new() -> Self {
        Self::default()
    }

    /// Map `uid` to `owner`.
    pub fn with(mut self, uid: u32, owner: OwnerId) -> Self {
        self.names.insert(uid, owner);
        self
    }
}

impl OwnerResolver for StaticOwnerResolver {
    fn resolve_uid(&self, uid: u32) -> OwnerId {
        match self.names.get(&uid) {
            Some(owner) => owner.clone(),
            None => fallback(uid, &"not in table"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_static_resolver() {
        let resolver = StaticOwnerResolver::new().with(1000, OwnerId::new("alice").unwrap());
        assert_eq!(resolver.resolve_uid(1000), "alice");
        assert_eq!(resolver.resolve_uid(999), "999");
    }

    #[cfg(unix)]
    #[test]
    fn test_system_resolver_root() {
        let resolver = SystemOwnerResolver::new();
        let owner = resolver.resolve_uid(0);
        // uid 0 is "root" wherever a user database exists
        assert!(owner == "root" || owner == "0");
        assert_eq!(resolver.cached(), 1);

        resolver.resolve_uid(0);
        assert_eq!(resolver.cached(), 1);
    }

    #[cfg(unix)]
    #[test]
    fn test_system_resolver_unknown_uid_falls_back() {
        let resolver = SystemOwnerResolver::new();
        let uid = 4_000_000_123;
        assert_eq!(resolver.resolve_uid(uid), OwnerId::from_uid(uid));
    }

    #[cfg(unix)]
    #[test]
    fn test_raw_owner_reads_metadata() {
        use std::os::unix::fs::MetadataExt;

        let temp = tempfile::NamedTempFile::new().unwrap();
        let metadata = std::fs::metadata(temp.path()).unwrap();
        assert_eq!(raw_owner(temp.path(), &metadata).unwrap(), metadata.uid());
    }
}
