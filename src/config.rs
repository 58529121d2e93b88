//! Preferences: config file plus environment overrides.
//!
//! Lookup order for the file:
//! 1. `--config` flag
//! 2. WOLFIES_SEND_CONFIG env var
//! 3. `<config dir>/wolfies-send/config.json`
//!
//! A missing file means defaults.
//!
//! CHANGELOG:
//! - 01/14/2026 - Initial implementation (Claude)

use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const DEFAULT_NAMESPACE: &str = "thomaslombart";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ContactsBackend {
    /// Exported contacts JSON file.
    Json,
    /// Live address book via Contacts.app.
    #[default]
    ContactsApp,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ContactsConfig {
    pub source: ContactsBackend,
    pub path: Option<String>,
}

impl ContactsConfig {
    /// `~`-expanded contacts file path, or the default location.
    pub fn resolved_path(&self) -> PathBuf {
        match &self.path {
            Some(path) => PathBuf::from(shellexpand::tilde(path).into_owned()),
            None => app_config_dir().join("contacts.json"),
        }
    }
}

/// Identifies the launcher that quicklinks are built for.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct HostConfig {
    pub version: String,
    pub namespace: String,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            namespace: DEFAULT_NAMESPACE.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Preferences {
    /// Hide the launcher window after a successful send.
    pub close_main_window: bool,
    /// Mirror notifications to macOS notification banners.
    pub system_notifications: bool,
    pub contacts: ContactsConfig,
    pub host: HostConfig,
}

pub fn app_config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("wolfies-send")
}

pub fn default_config_path() -> PathBuf {
    if let Ok(path) = std::env::var("WOLFIES_SEND_CONFIG") {
        return PathBuf::from(shellexpand::tilde(&path).into_owned());
    }
    app_config_dir().join("config.json")
}

impl Preferences {
    /// Load from `path` (or the default path) and apply env overrides.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = path.map(Path::to_path_buf).unwrap_or_else(default_config_path);
        let mut prefs = Self::from_file(&path)?;
        prefs.apply_overrides(|key| std::env::var(key).ok());
        Ok(prefs)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(value) = var("WOLFIES_SEND_CLOSE_WINDOW") {
            self.close_main_window = matches!(value.as_str(), "1" | "true" | "yes");
        }
        if let Some(path) = var("WOLFIES_CONTACTS_PATH") {
            self.contacts.source = ContactsBackend::Json;
            self.contacts.path = Some(path);
        }
        if let Some(version) = var("WOLFIES_HOST_VERSION") {
            self.host.version = version;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let prefs = Preferences::default();
        assert!(!prefs.close_main_window);
        assert_eq!(prefs.contacts.source, ContactsBackend::ContactsApp);
        assert_eq!(prefs.host.namespace, DEFAULT_NAMESPACE);
    }

    #[test]
    fn test_missing_file_is_default() {
        let prefs = Preferences::from_file(Path::new("/nonexistent/wolfies-send.json")).unwrap();
        assert_eq!(prefs, Preferences::default());
    }

    #[test]
    fn test_partial_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"close_main_window": true, "contacts": {{"source": "json", "path": "~/contacts.json"}}}}"#
        )
        .unwrap();

        let prefs = Preferences::from_file(file.path()).unwrap();
        assert!(prefs.close_main_window);
        assert_eq!(prefs.contacts.source, ContactsBackend::Json);
        assert!(!prefs.contacts.resolved_path().starts_with("~"));
        assert_eq!(prefs.host, HostConfig::default());
    }

    #[test]
    fn test_invalid_file_is_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{not json").unwrap();
        assert!(matches!(
            Preferences::from_file(file.path()),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = [
            ("WOLFIES_SEND_CLOSE_WINDOW", "true"),
            ("WOLFIES_CONTACTS_PATH", "/tmp/contacts.json"),
            ("WOLFIES_HOST_VERSION", "1.91.0-alpha"),
        ]
        .into_iter()
        .collect();

        let mut prefs = Preferences::default();
        prefs.apply_overrides(|key| env.get(key).map(|v| v.to_string()));

        assert!(prefs.close_main_window);
        assert_eq!(prefs.contacts.source, ContactsBackend::Json);
        assert_eq!(prefs.contacts.resolved_path(), PathBuf::from("/tmp/contacts.json"));
        assert_eq!(prefs.host.version, "1.91.0-alpha");
    }
}
