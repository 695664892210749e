use std::path::PathBuf;

use tempfile::TempDir;
use uploadwatch_core::{
    BaselineError, BaselineStore, Config, ConfigError, FileBaselineStore, FileRecord, OwnerId,
    Recipient, ScanResult, baseline_path, parse_baseline_file_name,
};

#[test]
fn test_config_from_yaml_file() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("config.yaml");
    std::fs::write(
        &path,
        "rootpath: /srv/photos\nusers:\n  - name: alice\n    email: alice@example.com\n  - name: bob\n    email: bob@example.com\n",
    )
    .unwrap();

    let config = Config::from_path(&path).unwrap();
    assert_eq!(config.root_path, PathBuf::from("/srv/photos"));
    assert_eq!(
        config.recipients,
        vec![
            Recipient::new("alice", "alice@example.com"),
            Recipient::new("bob", "bob@example.com"),
        ]
    );
}

#[test]
fn test_config_missing_file() {
    let temp = TempDir::new().unwrap();
    let err = Config::from_path(temp.path().join("nope.yaml")).unwrap_err();
    assert!(matches!(err, ConfigError::Io { .. }));
}

#[test]
fn test_config_bad_yaml() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("config.yaml");
    std::fs::write(&path, "users: [unterminated").unwrap();

    let err = Config::from_path(&path).unwrap_err();
    assert!(matches!(err, ConfigError::Parse { .. }));
}

#[test]
fn test_config_rejects_empty_root() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("config.yaml");
    std::fs::write(&path, "rootpath: \"\"\nusers: []\n").unwrap();

    let err = Config::from_path(&path).unwrap_err();
    assert!(matches!(err, ConfigError::Invalid { .. }));
}

#[test]
fn test_owner_id_deserialize_validates() {
    let ok: OwnerId = serde_yaml::from_str("alice").unwrap();
    assert_eq!(ok, "alice");
    assert!(serde_yaml::from_str::<OwnerId>("\"../etc\"").is_err());
}

#[test]
fn test_baseline_scheme_round_trips_through_file_names() {
    let owner = OwnerId::new("alice").unwrap();
    let path = baseline_path(&PathBuf::from("/photos"), &owner);
    let name = path.file_name().unwrap().to_str().unwrap();
    assert_eq!(parse_baseline_file_name(name), Some(owner));
}

#[test]
fn test_baseline_store_overwrites_malformed_content() {
    let temp = TempDir::new().unwrap();
    let owner = OwnerId::new("alice").unwrap();
    std::fs::write(baseline_path(temp.path(), &owner), "garbage").unwrap();

    let store = FileBaselineStore::new();
    assert!(matches!(
        store.read(temp.path(), &owner),
        Err(BaselineError::Parse { .. })
    ));

    store.write(temp.path(), &owner, 7).unwrap();
    assert_eq!(store.read(temp.path(), &owner).unwrap(), Some(7));
}

#[test]
fn test_scan_result_files() {
    let mut result = ScanResult::new("/photos");
    let alice = OwnerId::new("alice").unwrap();
    result.push(alice.clone(), FileRecord::new("/photos/folder1", "1.jpg"));

    assert_eq!(result.files(&alice)[0].path(), PathBuf::from("/photos/folder1/1.jpg"));
    assert!(result.files(&OwnerId::from_uid(999)).is_empty());
}
