//! User settings persistence
//!
//! Stores the last acknowledged changelog version and the presentation
//! config in a JSON file that survives restarts.

use super::{FRESH_INSTALL_VERSION, VersionStore};
use crate::config::Config;
use serde::{Deserialize, Serialize};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Environment variable overriding the settings file location.
pub const SETTINGS_PATH_ENV: &str = "WHATSNEW_SETTINGS_PATH";

/// Persistent user settings
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Settings {
    /// Number of changelog sections the user has acknowledged.
    ///
    /// `None` means the application has never recorded a version.
    #[serde(default)]
    pub last_seen_version: Option<usize>,

    /// Presentation settings for the changelog window
    #[serde(default)]
    pub config: Config,
}

impl Settings {
    /// Get the default settings file path
    #[must_use]
    pub fn default_path() -> PathBuf {
        if let Some(path) = std::env::var_os(SETTINGS_PATH_ENV) {
            return PathBuf::from(path);
        }

        app_data_dir(std::env::var_os)
            .unwrap_or_else(|| PathBuf::from("."))
            .join("settings.json")
    }

    /// Load settings from `path`, returning defaults if the file is missing or unreadable
    #[must_use]
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            debug!("Settings file not found, using defaults");
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(content) => match serde_json::from_str(&content) {
                Ok(settings) => {
                    debug!("Loaded settings from {:?}", path);
                    settings
                }
                Err(e) => {
                    warn!("Failed to parse settings file: {}", e);
                    Self::default()
                }
            },
            Err(e) => {
                warn!("Failed to read settings file: {}", e);
                Self::default()
            }
        }
    }

    /// Save settings to `path`
    ///
    /// # Errors
    ///
    /// Returns an error if the settings file cannot be written.
    pub fn save_to(&self, path: &Path) -> std::io::Result<()> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self).map_err(std::io::Error::other)?;

        std::fs::write(path, content)?;
        debug!("Saved settings to {:?}", path);
        Ok(())
    }
}

/// Per-user data directory for whatsnew, resolved through `env`.
///
/// `%LOCALAPPDATA%` on Windows, `~/Library/Application Support` on macOS,
/// `$XDG_DATA_HOME` or `~/.local/share` elsewhere.
fn app_data_dir(env: impl Fn(&'static str) -> Option<OsString>) -> Option<PathBuf> {
    let base = if cfg!(windows) {
        env("LOCALAPPDATA").or_else(|| env("USERPROFILE")).map(PathBuf::from)
    } else if cfg!(target_os = "macos") {
        env("HOME").map(|home| {
            PathBuf::from(home)
                .join("Library")
                .join("Application Support")
        })
    } else {
        env("XDG_DATA_HOME")
            .filter(|dir| !dir.is_empty())
            .map(PathBuf::from)
            .or_else(|| {
                env("HOME").map(|home| PathBuf::from(home).join(".local").join("share"))
            })
    };
    base.map(|dir| dir.join("whatsnew"))
}

/// [`VersionStore`] that writes through to a settings file.
#[derive(Debug, Clone)]
pub struct SettingsStore {
    path: PathBuf,
    settings: Settings,
}

impl SettingsStore {
    /// Load the store from `path`.
    #[must_use]
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let settings = Settings::load_from(&path);
        Self { path, settings }
    }

    /// Settings file location.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loaded settings.
    #[must_use]
    pub const fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Forget the recorded version so the next launch behaves like a fresh install.
    ///
    /// # Errors
    ///
    /// Returns an error if the settings file cannot be written.
    pub fn reset(&mut self) -> std::io::Result<()> {
        self.settings.last_seen_version = None;
        self.settings.save_to(&self.path)
    }
}

impl VersionStore for SettingsStore {
    fn last_version(&self) -> usize {
        self.settings
            .last_seen_version
            .unwrap_or(FRESH_INSTALL_VERSION)
    }

    fn set_last_version(&mut self, version: usize) {
        self.settings.last_seen_version = (version != FRESH_INSTALL_VERSION).then_some(version);
        if let Err(e) = self.settings.save_to(&self.path) {
            warn!("Failed to persist last seen version {}: {}", version, e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_settings_default() {
        let settings = Settings::default();
        assert!(settings.last_seen_version.is_none());
        assert_eq!(settings.config, Config::default());
    }

    #[test]
    fn test_settings_save_load() -> Result<(), Box<dyn std::error::Error>> {
        let temp_dir = TempDir::new()?;
        let path = temp_dir.path().join("nested").join("settings.json");

        let settings = Settings {
            last_seen_version: Some(4),
            config: Config::default(),
        };
        settings.save_to(&path)?;

        let loaded = Settings::load_from(&path);
        assert_eq!(loaded, settings);
        Ok(())
    }

    #[test]
    fn test_settings_load_nonexistent_returns_default() -> Result<(), Box<dyn std::error::Error>> {
        let temp_dir = TempDir::new()?;
        let loaded = Settings::load_from(&temp_dir.path().join("missing.json"));
        assert_eq!(loaded, Settings::default());
        Ok(())
    }

    #[test]
    fn test_settings_load_corrupt_returns_default() -> Result<(), Box<dyn std::error::Error>> {
        let temp_dir = TempDir::new()?;
        let path = temp_dir.path().join("settings.json");
        std::fs::write(&path, "{not json")?;
        assert_eq!(Settings::load_from(&path), Settings::default());
        Ok(())
    }

    #[cfg(all(not(windows), not(target_os = "macos")))]
    #[test]
    fn test_app_data_dir_prefers_xdg_data_home() {
        let env = |key: &str| match key {
            "XDG_DATA_HOME" => Some(OsString::from("/srv/data")),
            "HOME" => Some(OsString::from("/home/ada")),
            _ => None,
        };
        assert_eq!(app_data_dir(env), Some(PathBuf::from("/srv/data/whatsnew")));
    }

    #[cfg(all(not(windows), not(target_os = "macos")))]
    #[test]
    fn test_app_data_dir_falls_back_to_home_when_xdg_is_empty() {
        let env = |key: &str| match key {
            "XDG_DATA_HOME" => Some(OsString::new()),
            "HOME" => Some(OsString::from("/home/ada")),
            _ => None,
        };
        assert_eq!(
            app_data_dir(env),
            Some(PathBuf::from("/home/ada/.local/share/whatsnew"))
        );
    }

    #[test]
    fn test_app_data_dir_without_env_is_none() {
        assert_eq!(app_data_dir(|_: &str| None), None);
    }

    #[test]
    fn test_settings_store_missing_file_is_fresh_install() -> Result<(), Box<dyn std::error::Error>>
    {
        let temp_dir = TempDir::new()?;
        let store = SettingsStore::open(temp_dir.path().join("settings.json"));
        assert_eq!(store.last_version(), FRESH_INSTALL_VERSION);
        Ok(())
    }

    #[test]
    fn test_settings_store_persists_writes() -> Result<(), Box<dyn std::error::Error>> {
        let temp_dir = TempDir::new()?;
        let path = temp_dir.path().join("settings.json");

        let mut store = SettingsStore::open(&path);
        store.set_last_version(3);

        let reopened = SettingsStore::open(&path);
        assert_eq!(reopened.last_version(), 3);
        assert_eq!(reopened.settings().last_seen_version, Some(3));
        Ok(())
    }

    #[test]
    fn test_settings_store_reset_forgets_version() -> Result<(), Box<dyn std::error::Error>> {
        let temp_dir = TempDir::new()?;
        let path = temp_dir.path().join("settings.json");

        let mut store = SettingsStore::open(&path);
        store.set_last_version(2);
        store.reset()?;

        assert_eq!(
            SettingsStore::open(&path).last_version(),
            FRESH_INSTALL_VERSION
        );
        Ok(())
    }
}
