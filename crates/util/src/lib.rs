//! Helpers shared by the pincode binary and widget crates.

pub mod settings;

pub use settings::{SETTINGS_FILE_NAME, SETTINGS_PATH_ENV, SettingsError, SettingsStore, expand_home};
