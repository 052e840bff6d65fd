//! Persisted user settings under the platform config directory.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Settings format version.
pub const SETTINGS_VERSION: u32 = 1;

/// Directory name under the user's config directory.
const APP_DIR: &str = "anvil-order";

/// Filename for the settings file.
const SETTINGS_FILE: &str = "settings.toml";

/// User settings persisted across runs.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Settings {
    /// Format version, stamped on save.
    #[serde(default = "default_version")]
    pub version: u32,
    /// UI locale code, or "default" to follow the built-in fallback.
    #[serde(default = "default_language")]
    pub language: String,
}

fn default_version() -> u32 {
    SETTINGS_VERSION
}

fn default_language() -> String {
    "default".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            version: SETTINGS_VERSION,
            language: default_language(),
        }
    }
}

/// Path of the settings file, when a config directory exists on this
/// platform.
pub fn settings_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR).join(SETTINGS_FILE))
}

/// Load settings, returning defaults when no file exists (or no config
/// directory is available at all).
pub fn load_settings() -> Result<Settings> {
    settings_path().map_or_else(|| Ok(Settings::default()), |path| load_settings_from(&path))
}

/// Load settings from an explicit path; a missing file yields defaults.
pub fn load_settings_from(path: &Path) -> Result<Settings> {
    if !path.exists() {
        return Ok(Settings::default());
    }

    let content = fs::read_to_string(path)
        .map_err(|e| Error::Settings(format!("failed to read {}: {e}", path.display())))?;

    let settings: Settings = toml::from_str(&content)
        .map_err(|e| Error::Settings(format!("failed to parse {}: {e}", path.display())))?;

    Ok(settings)
}

/// Save settings to the default location.
pub fn save_settings(settings: &Settings) -> Result<()> {
    let path = settings_path()
        .ok_or_else(|| Error::Settings("no config directory on this platform".to_string()))?;
    save_settings_to(&path, settings)
}

/// Save settings to an explicit path, creating parent directories as
/// needed.
pub fn save_settings_to(path: &Path, settings: &Settings) -> Result<()> {
    if let Some(dir) = path.parent() {
        if !dir.exists() {
            fs::create_dir_all(dir)
                .map_err(|e| Error::Settings(format!("failed to create {}: {e}", dir.display())))?;
        }
    }

    // Serialize with version
    let mut to_save = settings.clone();
    to_save.version = SETTINGS_VERSION;

    let content = toml::to_string_pretty(&to_save)
        .map_err(|e| Error::Settings(format!("failed to serialize settings: {e}")))?;

    // Add header comment
    let content_with_header = format!(
        "# anvil settings\n# Auto-generated - manual edits may be overwritten\n\n{content}"
    );

    fs::write(path, content_with_header)
        .map_err(|e| Error::Settings(format!("failed to write {}: {e}", path.display())))?;

    Ok(())
}
