//! Persisted user preferences.
//!
//! Preferences are stored as pretty-printed JSON at
//! `{base_dir}/.prefsync/settings.json`. A missing file means the
//! defaults; a partial file merges with the defaults field by field, so
//! records written by older versions keep loading.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::outcome::{err, ok, Outcome};

/// User preferences applied to the target page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Sampling temperature written into the numeric input.
    pub temperature: f64,
    /// Whether the web-search tool switch should be on.
    pub enable_web_search: bool,
    /// Whether the URL-context tool switch should be on.
    pub enable_url_context: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            temperature: 0.7,
            enable_web_search: true,
            enable_url_context: true,
        }
    }
}

/// Failure while reading or writing the settings record.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings from {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse settings at {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("failed to encode settings: {0}")]
    Encode(serde_json::Error),

    #[error("failed to write settings to {}: {source}", path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Disk-backed store for [`Settings`].
///
/// The accessors speak [`Outcome`] like the rest of the crate; plain
/// `Result` stays confined to the IO helpers below.
#[derive(Debug)]
pub struct SettingsStore {
    storage_path: PathBuf,
}

impl SettingsStore {
    /// Create a store rooted at `base_dir`. Nothing is read until
    /// [`SettingsStore::load`] is called.
    pub fn new(base_dir: &Path) -> Self {
        Self {
            storage_path: base_dir.join(".prefsync/settings.json"),
        }
    }

    /// Load the persisted settings.
    ///
    /// A missing file yields the defaults. An unreadable or malformed
    /// file is a failure, never silently replaced with defaults.
    pub async fn load(&self) -> Outcome<Settings, SettingsError> {
        match self.read_from_disk().await {
            Ok(settings) => ok(settings),
            Err(e) => {
                tracing::warn!(
                    "Failed to load settings from {}: {}",
                    self.storage_path.display(),
                    e
                );
                err(e)
            }
        }
    }

    /// Persist `settings`, replacing any previous record.
    pub async fn save(&self, settings: &Settings) -> Outcome<(), SettingsError> {
        match self.write_to_disk(settings).await {
            Ok(()) => {
                tracing::debug!("Saved settings to {}", self.storage_path.display());
                ok(())
            }
            Err(e) => {
                tracing::warn!(
                    "Failed to save settings to {}: {}",
                    self.storage_path.display(),
                    e
                );
                err(e)
            }
        }
    }

    async fn read_from_disk(&self) -> Result<Settings, SettingsError> {
        let contents = match tokio::fs::read_to_string(&self.storage_path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(
                    "No settings file at {}, using defaults",
                    self.storage_path.display()
                );
                return Ok(Settings::default());
            }
            Err(source) => {
                return Err(SettingsError::Read {
                    path: self.storage_path.clone(),
                    source,
                });
            }
        };

        serde_json::from_str(&contents).map_err(|source| SettingsError::Parse {
            path: self.storage_path.clone(),
            source,
        })
    }

    async fn write_to_disk(&self, settings: &Settings) -> Result<(), SettingsError> {
        if let Some(parent) = self.storage_path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|source| SettingsError::Write {
                    path: self.storage_path.clone(),
                    source,
                })?;
        }

        let contents = serde_json::to_string_pretty(settings).map_err(SettingsError::Encode)?;

        tokio::fs::write(&self.storage_path, contents)
            .await
            .map_err(|source| SettingsError::Write {
                path: self.storage_path.clone(),
                source,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_missing_file_yields_defaults() {
        let temp = tempdir().unwrap();
        let store = SettingsStore::new(temp.path());

        let settings = store.load().await.unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[tokio::test]
    async fn test_save_then_load_round_trips() {
        let temp = tempdir().unwrap();
        let store = SettingsStore::new(temp.path());

        let settings = Settings {
            temperature: 0.3,
            enable_web_search: false,
            enable_url_context: true,
        };
        assert!(store.save(&settings).await.is_success());

        let loaded = store.load().await.unwrap();
        assert_eq!(loaded, settings);
    }

    #[tokio::test]
    async fn test_partial_file_merges_with_defaults() {
        let temp = tempdir().unwrap();
        let dir = temp.path().join(".prefsync");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("settings.json"), r#"{"temperature": 0.1}"#).unwrap();

        let store = SettingsStore::new(temp.path());
        let settings = store.load().await.unwrap();
        assert_eq!(settings.temperature, 0.1);
        assert!(settings.enable_web_search);
        assert!(settings.enable_url_context);
    }

    #[tokio::test]
    async fn test_malformed_file_is_a_failure() {
        let temp = tempdir().unwrap();
        let dir = temp.path().join(".prefsync");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("settings.json"), "not json at all").unwrap();

        let store = SettingsStore::new(temp.path());
        let outcome = store.load().await;
        assert!(matches!(
            outcome.failure(),
            Some(SettingsError::Parse { .. })
        ));
    }
}
