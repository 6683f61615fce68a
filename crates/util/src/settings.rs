//! Settings persistence for the pin code demo.
//!
//! Widget settings are stored as a small JSON document in the standard
//! configuration directory (`~/.config/pincode/settings.json` on most
//! platforms). A missing file yields defaults; a malformed file is reported
//! through `tracing` and also yields defaults so a bad edit never prevents
//! the widget from starting.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use dirs_next::{config_dir, home_dir};
use pincode_types::PinSettings;
use thiserror::Error;
use tracing::{debug, warn};

/// Environment variable allowing callers to override the settings file path.
pub const SETTINGS_PATH_ENV: &str = "PINCODE_SETTINGS_PATH";

/// Default filename for the JSON payload.
pub const SETTINGS_FILE_NAME: &str = "settings.json";

/// Error surfaced when reading or writing settings fails.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// I/O failure (for example, permissions or missing directory).
    #[error("settings I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// Serialization or deserialization failure.
    #[error("settings serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// JSON-backed store for [`PinSettings`].
#[derive(Debug, Clone)]
pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    /// Store at the path named by `PINCODE_SETTINGS_PATH`, falling back to
    /// the platform config directory.
    pub fn from_env() -> Self {
        Self { path: default_settings_path() }
    }

    /// Store rooted at an explicit path. A leading `~` is expanded.
    pub fn at(path: impl AsRef<Path>) -> Self {
        let raw = path.as_ref().to_string_lossy();
        Self { path: expand_home(&raw) }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the settings, substituting defaults for a missing or unparsable file.
    pub fn load(&self) -> Result<PinSettings, SettingsError> {
        match fs::read_to_string(&self.path) {
            Ok(data) => match serde_json::from_str(&data) {
                Ok(settings) => {
                    debug!(path = %self.path.display(), "loaded pin settings");
                    Ok(settings)
                }
                Err(error) => {
                    warn!(
                        path = %self.path.display(),
                        error = %error,
                        "Failed to parse settings file; using defaults"
                    );
                    Ok(PinSettings::default())
                }
            },
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => Ok(PinSettings::default()),
            Err(error) => Err(SettingsError::Io(error)),
        }
    }

    /// Write the settings, creating parent directories as needed.
    pub fn save(&self, settings: &PinSettings) -> Result<(), SettingsError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_string_pretty(settings)?;
        fs::write(&self.path, data)?;
        Ok(())
    }
}

/// Expand a leading `~`, `~/` or `~\` to the user's home directory.
pub fn expand_home(raw: &str) -> PathBuf {
    let trimmed = raw.trim();
    let rest = match trimmed.strip_prefix('~') {
        Some(rest) if rest.is_empty() => "",
        Some(rest) => match rest.strip_prefix('/').or_else(|| rest.strip_prefix('\\')) {
            Some(rest) => rest,
            // `~user/...` is left alone
            None => return PathBuf::from(trimmed),
        },
        None => return PathBuf::from(trimmed),
    };
    let home = home_dir().unwrap_or_else(|| PathBuf::from("~"));
    if rest.is_empty() { home } else { home.join(rest) }
}

fn default_settings_path() -> PathBuf {
    if let Ok(path) = env::var(SETTINGS_PATH_ENV)
        && !path.trim().is_empty()
    {
        return expand_home(&path);
    }

    config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("pincode")
        .join(SETTINGS_FILE_NAME)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pincode_types::KeyboardType;
    use tempfile::tempdir;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempdir().expect("tempdir");
        let store = SettingsStore::at(dir.path().join("absent.json"));
        let settings = store.load().expect("load");
        assert_eq!(settings, PinSettings::default());
    }

    #[test]
    fn save_then_load_preserves_changes() {
        let dir = tempdir().expect("tempdir");
        let store = SettingsStore::at(dir.path().join("nested").join(SETTINGS_FILE_NAME));
        let settings = PinSettings {
            code_length: 6,
            password: true,
            mask: "•".to_string(),
            keyboard_type: KeyboardType::NumberPad,
            ..PinSettings::default()
        };
        store.save(&settings).expect("save");
        assert_eq!(store.load().expect("load"), settings);
    }

    #[test]
    fn malformed_file_falls_back_to_defaults() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join(SETTINGS_FILE_NAME);
        fs::write(&path, "{ not json").expect("write");
        let settings = SettingsStore::at(&path).load().expect("load");
        assert_eq!(settings, PinSettings::default());
    }

    #[test]
    fn env_override_selects_settings_path() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("custom.json");
        let expected = path.clone();
        temp_env::with_var(SETTINGS_PATH_ENV, Some(path.as_os_str()), || {
            assert_eq!(SettingsStore::from_env().path(), expected.as_path());
        });
    }

    #[test]
    fn blank_env_override_is_ignored() {
        temp_env::with_var(SETTINGS_PATH_ENV, Some("   "), || {
            let path = SettingsStore::from_env().path().to_path_buf();
            assert!(path.ends_with(Path::new("pincode").join(SETTINGS_FILE_NAME)));
        });
    }

    #[test]
    fn expand_home_only_touches_leading_tilde() {
        assert_eq!(expand_home("/tmp/a.json"), PathBuf::from("/tmp/a.json"));
        assert_eq!(expand_home("~user/a.json"), PathBuf::from("~user/a.json"));
        if let Some(home) = home_dir() {
            assert_eq!(expand_home("~/a.json"), home.join("a.json"));
            assert_eq!(expand_home("~"), home);
        }
    }
}
