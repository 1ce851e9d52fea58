//! Settings persistence
//!
//! Loads and saves the calculator's UI preferences as TOML in the platform
//! config directory. Selection state (breaks, detachment) is deliberately
//! never persisted; only input-modality and mode preferences live here.

use directories::ProjectDirs;
use serde::{de::DeserializeOwned, Serialize};
use std::fs;
use std::io;
use std::path::PathBuf;

const SETTINGS_FILE: &str = "settings.toml";

/// Error type for settings operations
#[derive(Debug)]
pub enum SettingsError {
    /// Failed to determine the config directory
    NoConfigDir,
    /// IO error while reading/writing the settings file
    Io(io::Error),
    /// Failed to parse the settings file
    Parse(toml::de::Error),
    /// Failed to serialize settings
    Serialize(toml::ser::Error),
}

impl std::fmt::Display for SettingsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SettingsError::NoConfigDir => write!(f, "Could not determine config directory"),
            SettingsError::Io(e) => write!(f, "IO error: {}", e),
            SettingsError::Parse(e) => write!(f, "Parse error: {}", e),
            SettingsError::Serialize(e) => write!(f, "Serialize error: {}", e),
        }
    }
}

impl std::error::Error for SettingsError {}

impl From<io::Error> for SettingsError {
    fn from(e: io::Error) -> Self {
        SettingsError::Io(e)
    }
}

impl From<toml::de::Error> for SettingsError {
    fn from(e: toml::de::Error) -> Self {
        SettingsError::Parse(e)
    }
}

impl From<toml::ser::Error> for SettingsError {
    fn from(e: toml::ser::Error) -> Self {
        SettingsError::Serialize(e)
    }
}

/// Path of the settings file inside the platform config directory
pub fn settings_path() -> Option<PathBuf> {
    ProjectDirs::from("org", "beavrs", "retinal-risk")
        .map(|dirs| dirs.config_dir().join(SETTINGS_FILE))
}

/// Load persisted settings
///
/// Returns `None` when no settings file exists yet; an error only when the
/// file exists but cannot be read or parsed.
pub fn load_settings<T: DeserializeOwned>() -> Result<Option<T>, SettingsError> {
    let path = settings_path().ok_or(SettingsError::NoConfigDir)?;

    if !path.exists() {
        return Ok(None);
    }

    let contents = fs::read_to_string(&path)?;
    let settings: T = toml::from_str(&contents)?;
    Ok(Some(settings))
}

/// Save settings, creating the config directory if needed
pub fn save_settings<T: Serialize>(settings: &T) -> Result<(), SettingsError> {
    let path = settings_path().ok_or(SettingsError::NoConfigDir)?;

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let contents = toml::to_string_pretty(settings)?;
    fs::write(&path, contents)?;
    Ok(())
}
