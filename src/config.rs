//! Configuration management for the application.
//!
//! This module handles loading, validating, and saving application settings
//! in TOML format with platform-specific directory resolution. These are the
//! program's own settings; a person's life config is loaded by `parser`.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::constants::{
    APP_DIR_NAME, CONFIG_DIR_ENV, DEFAULT_DATA_DIR, DEFAULT_LIFE_EXPECTANCY, DEFAULT_TARGET_FPS,
    MAX_LIFE_EXPECTANCY,
};

/// Highest frame rate accepted from the settings file.
const MAX_TARGET_FPS: u32 = 240;

/// Theme display mode preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ThemeMode {
    /// Automatically detect OS theme (dark/light)
    #[default]
    Auto,
    /// Always use dark theme
    Dark,
    /// Always use light theme
    Light,
}

/// Path configuration for file system locations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathConfig {
    /// Directory scanned for life config files
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from(DEFAULT_DATA_DIR)
}

impl Default for PathConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
        }
    }
}

/// UI preferences configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UiConfig {
    /// Theme mode preference (Auto, Dark, Light)
    #[serde(default)]
    pub theme_mode: ThemeMode,
    /// Frame rate cap for the UI loop
    #[serde(default = "default_target_fps")]
    pub target_fps: u32,
    /// Life expectancy shown in the input before any file is loaded
    #[serde(default = "default_life_expectancy")]
    pub default_life_expectancy: u32,
}

fn default_target_fps() -> u32 {
    DEFAULT_TARGET_FPS
}

fn default_life_expectancy() -> u32 {
    DEFAULT_LIFE_EXPECTANCY
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            theme_mode: ThemeMode::default(),
            target_fps: default_target_fps(),
            default_life_expectancy: default_life_expectancy(),
        }
    }
}

impl UiConfig {
    /// Frame rate clamped to a usable range.
    #[must_use]
    pub fn effective_fps(&self) -> u32 {
        self.target_fps.clamp(1, MAX_TARGET_FPS)
    }
}

/// Application configuration.
///
/// # File Location
///
/// - Linux: `~/.config/LifeCalendar/config.toml`
/// - macOS: `~/Library/Application Support/LifeCalendar/config.toml`
/// - Windows: `%APPDATA%\LifeCalendar\config.toml`
///
/// `LIFECAL_CONFIG_DIR` overrides the directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Config {
    /// File system paths
    #[serde(default)]
    pub paths: PathConfig,
    /// UI preferences
    #[serde(default)]
    pub ui: UiConfig,
}

impl Config {
    /// Creates a new Config with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Gets the platform-specific config directory path.
    pub fn config_dir() -> Result<PathBuf> {
        if let Some(dir) = std::env::var_os(CONFIG_DIR_ENV) {
            return Ok(PathBuf::from(dir));
        }

        let config_dir = dirs::config_dir()
            .context("Failed to determine config directory")?
            .join(APP_DIR_NAME);

        Ok(config_dir)
    }

    /// Gets the full path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Returns true if a settings file has been written.
    pub fn exists() -> bool {
        Self::config_file_path()
            .map(|path| path.exists())
            .unwrap_or(false)
    }

    /// Loads configuration from the config file.
    ///
    /// If the file doesn't exist, returns default configuration.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file_path()?)
    }

    /// Loads configuration from an explicit path.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::new());
        }

        let content = fs::read_to_string(path)
            .context(format!("Failed to read config file: {}", path.display()))?;

        let config: Self = toml::from_str(&content)
            .context(format!("Failed to parse config file: {}", path.display()))?;

        config.validate()?;
        Ok(config)
    }

    /// Saves configuration to the config file using atomic write.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_file_path()?)
    }

    /// Saves configuration to an explicit path using temp file + rename.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        self.validate()?;

        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir).context(format!(
                "Failed to create config directory: {}",
                dir.display()
            ))?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize configuration")?;

        let temp_path = path.with_extension("toml.tmp");
        fs::write(&temp_path, content).context(format!(
            "Failed to write temp config file: {}",
            temp_path.display()
        ))?;

        fs::rename(&temp_path, path).context(format!(
            "Failed to rename temp config file to: {}",
            path.display()
        ))?;

        Ok(())
    }

    /// Validates configuration values.
    ///
    /// Checks:
    /// - `data_dir` is not empty
    /// - `default_life_expectancy` is between 1 and 999
    pub fn validate(&self) -> Result<()> {
        if self.paths.data_dir.as_os_str().is_empty() {
            anyhow::bail!("paths.data_dir cannot be empty");
        }

        if !(1..=MAX_LIFE_EXPECTANCY).contains(&self.ui.default_life_expectancy) {
            anyhow::bail!(
                "ui.default_life_expectancy must be between 1 and {MAX_LIFE_EXPECTANCY} (got {})",
                self.ui.default_life_expectancy
            );
        }

        Ok(())
    }
}
