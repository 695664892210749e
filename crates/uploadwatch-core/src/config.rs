//! Run configuration.

use std::path::{Path, PathBuf};

use derive_builder::Builder;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// A user eligible to receive upload notifications.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipient {
    /// Identity matched against file owners.
    pub name: String,
    /// Delivery address.
    #[serde(default)]
    pub email: String,
}

impl Recipient {
    /// Create a new recipient.
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
        }
    }
}

/// Configuration for one uploadwatch run.
#[derive(Debug, Clone, Builder, Serialize, Deserialize)]
#[builder(setter(into), build_fn(validate = "Self::validate"))]
pub struct Config {
    /// Root path to scan. Baselines are kept directly in this directory.
    #[serde(rename = "rootpath", alias = "root_path")]
    pub root_path: PathBuf,

    /// Users to notify, in delivery order.
    #[builder(default)]
    #[serde(default, rename = "users", alias = "recipients")]
    pub recipients: Vec<Recipient>,

    /// Follow symbolic links while walking.
    #[builder(default = "false")]
    #[serde(default)]
    pub follow_symlinks: bool,

    /// Include hidden files (starting with .).
    #[builder(default = "true")]
    #[serde(default = "default_true")]
    pub include_hidden: bool,
}

fn default_true() -> bool {
    true
}

impl ConfigBuilder {
    fn validate(&self) -> Result<(), String> {
        match self.root_path {
            Some(ref root) => check_root(root)?,
            None => return Err("Root path is required".to_string()),
        }
        if let Some(ref recipients) = self.recipients {
            check_recipients(recipients)?;
        }
        Ok(())
    }
}

fn check_root(root: &Path) -> Result<(), String> {
    if root.as_os_str().is_empty() {
        return Err("Root path cannot be empty".to_string());
    }
    Ok(())
}

fn check_recipients(recipients: &[Recipient]) -> Result<(), String> {
    if let Some(position) = recipients.iter().position(|r| r.name.trim().is_empty()) {
        return Err(format!("Recipient #{} has an empty name", position + 1));
    }
    Ok(())
}

impl Config {
    /// Create a new config builder.
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Create a config for a root with the given recipients.
    pub fn new(root_path: impl Into<PathBuf>, recipients: Vec<Recipient>) -> Self {
        Self {
            root_path: root_path.into(),
            recipients,
            follow_symlinks: false,
            include_hidden: true,
        }
    }

    /// Load and validate a YAML configuration file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = serde_yaml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Replace the root path, e.g. from an environment override.
    pub fn with_root_path(mut self, root_path: impl Into<PathBuf>) -> Self {
        self.root_path = root_path.into();
        self
    }

    /// Check the invariants the builder enforces.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_root(&self.root_path)
            .and_then(|()| check_recipients(&self.recipients))
            .map_err(|message| ConfigError::Invalid { message })
    }

    /// Look up a recipient by name.
    pub fn recipient(&self, name: &str) -> Option<&Recipient> {
        self.recipients.iter().find(|r| r.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_builder() {
        let config = Config::builder()
            .root_path("/photos")
            .recipients(vec![Recipient::new("alice", "alice@example.com")])
            .build()
            .unwrap();

        assert_eq!(config.root_path, PathBuf::from("/photos"));
        assert_eq!(config.recipients.len(), 1);
        assert!(config.include_hidden);
        assert!(!config.follow_symlinks);
    }

    #[test]
    fn test_builder_requires_root() {
        assert!(Config::builder().build().is_err());
        assert!(Config::builder().root_path("").build().is_err());
    }

    #[test]
    fn test_builder_rejects_blank_recipient() {
        let result = Config::builder()
            .root_path("/photos")
            .recipients(vec![Recipient::new(" ", "x@example.com")])
            .build();
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_yaml() {
        let yaml = "
rootpath: /srv/photos
users:
  - name: alice
    email: alice@example.com
  - name: bob
    email: bob@example.com
";
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.root_path, PathBuf::from("/srv/photos"));
        assert_eq!(config.recipients[1], Recipient::new("bob", "bob@example.com"));
        assert!(config.include_hidden);
        assert!(config.recipient("alice").is_some());
        assert!(config.recipient("carol").is_none());
    }

    #[test]
    fn test_parse_yaml_aliases() {
        let yaml = "root_path: ./photos\nrecipients: []\nfollow_symlinks: true\n";
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.root_path, PathBuf::from("./photos"));
        assert!(config.recipients.is_empty());
        assert!(config.follow_symlinks);
    }

    #[test]
    fn test_with_root_path() {
        let config = Config::new("/a", Vec::new()).with_root_path("/b");
        assert_eq!(config.root_path, PathBuf::from("/b"));
    }
}
