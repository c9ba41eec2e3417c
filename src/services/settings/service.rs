use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use directories::ProjectDirs;

use crate::models::settings::Settings;

const CONFIG_FILE: &str = "config.toml";
const DATABASE_FILE: &str = "birthdays.db";

/// Loads and saves [`Settings`] as TOML.
pub struct SettingsService;

impl SettingsService {
    fn project_dirs() -> Option<ProjectDirs> {
        ProjectDirs::from("com", "KenBoyle", "BirthdayReminder")
    }

    /// `<config dir>/config.toml` for this platform.
    pub fn default_config_path() -> Result<PathBuf> {
        Self::project_dirs()
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE))
            .ok_or_else(|| anyhow!("Could not determine a config directory"))
    }

    /// `<data dir>/birthdays.db` for this platform.
    pub fn default_database_path() -> Result<PathBuf> {
        Self::project_dirs()
            .map(|dirs| dirs.data_dir().join(DATABASE_FILE))
            .ok_or_else(|| anyhow!("Could not determine a data directory"))
    }

    /// The configured database file, falling back to the platform default.
    pub fn database_path(settings: &Settings) -> Result<PathBuf> {
        match settings.database_path {
            Some(ref path) => Ok(path.clone()),
            None => Self::default_database_path(),
        }
    }

    /// Read settings from `path`. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Settings> {
        if !path.exists() {
            log::debug!("No config at {}, using defaults", path.display());
            return Ok(Settings::default());
        }

        let data = fs::read_to_string(path)
            .with_context(|| format!("failed to read config from {}", path.display()))?;
        let settings: Settings = toml::from_str(&data)
            .with_context(|| format!("failed to parse config from {}", path.display()))?;

        settings
            .validate()
            .map_err(|e| anyhow!("Invalid settings in {}: {}", path.display(), e))?;

        Ok(settings)
    }

    /// Write settings to `path`, creating parent directories as needed.
    pub fn save(path: &Path, settings: &Settings) -> Result<()> {
        settings
            .validate()
            .map_err(|e| anyhow!("Invalid settings: {}", e))?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create dir {}", parent.display()))?;
        }

        let data = toml::to_string_pretty(settings).context("failed to serialize settings")?;
        fs::write(path, data)
            .with_context(|| format!("failed to write config to {}", path.display()))?;
        Ok(())
    }
}
