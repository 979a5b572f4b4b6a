use std::fmt;
use std::path::{Path, PathBuf};

use crate::kernel::services::ports::BehaviorSettings;

use super::paths::get_settings_path;

#[derive(Debug)]
pub enum SettingsError {
    NoSettingsDir,
    Io(std::io::Error),
    Parse(serde_json::Error),
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsError::NoSettingsDir => write!(f, "Cannot determine settings directory"),
            SettingsError::Io(e) => write!(f, "Settings IO failed: {}", e),
            SettingsError::Parse(e) => write!(f, "Settings parse failed: {}", e),
        }
    }
}

impl std::error::Error for SettingsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SettingsError::NoSettingsDir => None,
            SettingsError::Io(e) => Some(e),
            SettingsError::Parse(e) => Some(e),
        }
    }
}

impl From<std::io::Error> for SettingsError {
    fn from(e: std::io::Error) -> Self {
        SettingsError::Io(e)
    }
}

impl From<serde_json::Error> for SettingsError {
    fn from(e: serde_json::Error) -> Self {
        SettingsError::Parse(e)
    }
}

/// Creates the settings file with defaults when missing. Existing files are left untouched.
pub fn ensure_settings_file_at(path: &Path) -> Result<(), SettingsError> {
    if let Some(parent) = path.parent() {
        if !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }
    if !path.exists() {
        let content = serde_json::to_string_pretty(&BehaviorSettings::default())?;
        std::fs::write(path, content)?;
    }
    Ok(())
}

pub fn ensure_settings_file() -> Result<PathBuf, SettingsError> {
    let path = get_settings_path().ok_or(SettingsError::NoSettingsDir)?;
    ensure_settings_file_at(&path)?;
    Ok(path)
}

pub fn load_settings_from(path: &Path) -> Result<BehaviorSettings, SettingsError> {
    let data = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&data)?)
}

/// Settings from the default location; `None` when absent or unreadable.
pub fn load_settings() -> Option<BehaviorSettings> {
    let path = get_settings_path()?;
    match load_settings_from(&path) {
        Ok(settings) => Some(settings),
        Err(SettingsError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => None,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "load_settings failed");
            None
        }
    }
}

/// Startup path: writes defaults when the file is missing, then loads it.
///
/// Never fails; problems are logged and defaults are used.
pub fn init_settings_at(path: &Path) -> BehaviorSettings {
    if let Err(e) = ensure_settings_file_at(path) {
        tracing::warn!(path = %path.display(), error = %e, "ensure_settings_file failed");
    }
    match load_settings_from(path) {
        Ok(settings) => settings,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "load_settings failed");
            BehaviorSettings::default()
        }
    }
}

pub fn init_settings() -> BehaviorSettings {
    match get_settings_path() {
        Some(path) => init_settings_at(&path),
        None => {
            tracing::warn!(error = %SettingsError::NoSettingsDir, "ensure_settings_file failed");
            BehaviorSettings::default()
        }
    }
}

#[cfg(test)]
#[path = "../../../../tests/unit/kernel/services/adapters/settings.rs"]
mod tests;
