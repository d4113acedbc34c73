//! Configuration management for the application.
//!
//! This module handles loading, validating, and saving application configuration
//! in TOML format with platform-specific directory resolution.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::constants::{
    is_supported_grid_size, APP_NAME, DEFAULT_CELL_SIZE, DEFAULT_GRID_SIZE, SUPPORTED_GRID_SIZES,
};

/// Editor defaults for new blocks and rendering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EditorConfig {
    /// Grid size for new blocks
    #[serde(default = "default_grid_size")]
    pub default_grid_size: u8,
    /// Pixel size of one grid cell when rendering
    #[serde(default = "default_cell_size")]
    pub cell_size: f64,
}

const fn default_grid_size() -> u8 {
    DEFAULT_GRID_SIZE
}

const fn default_cell_size() -> f64 {
    DEFAULT_CELL_SIZE
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            default_grid_size: default_grid_size(),
            cell_size: default_cell_size(),
        }
    }
}

/// Validation preferences.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ValidationConfig {
    /// Treat validation warnings as failures
    #[serde(default)]
    pub strict: bool,
}

/// Application configuration.
///
/// # File Location
///
/// - Linux: `~/.config/QuiltKit/config.toml`
/// - macOS: `~/Library/Application Support/QuiltKit/config.toml`
/// - Windows: `%APPDATA%\QuiltKit\config.toml`
///
/// # Validation
///
/// - `default_grid_size` must be a supported grid size (2 to 8)
/// - `cell_size` must be a positive, finite number
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Config {
    /// Editor defaults
    #[serde(default)]
    pub editor: EditorConfig,
    /// Validation preferences
    #[serde(default)]
    pub validation: ValidationConfig,
}

impl Config {
    /// Creates a new Config with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Gets the platform-specific config directory path.
    pub fn config_dir() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Failed to determine config directory")?
            .join(APP_NAME);

        Ok(config_dir)
    }

    /// Gets the full path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Loads configuration from the platform config file.
    ///
    /// If the file doesn't exist, returns default configuration.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file_path()?)
    }

    /// Loads configuration from `path`, or defaults if it doesn't exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::new());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        config
            .validate()
            .with_context(|| format!("Invalid config file: {}", path.display()))?;
        Ok(config)
    }

    /// Saves configuration to the platform config file.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_file_path()?)
    }

    /// Saves configuration to `path` using an atomic write.
    ///
    /// Uses temp file + rename pattern for atomic writes.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        self.validate()?;

        if let Some(dir) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create config directory: {}", dir.display()))?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize configuration")?;
        let temp_path = path.with_extension("toml.tmp");

        fs::write(&temp_path, content)
            .with_context(|| format!("Failed to write temp config file: {}", temp_path.display()))?;

        fs::rename(&temp_path, path)
            .with_context(|| format!("Failed to rename temp config file to: {}", path.display()))?;

        Ok(())
    }

    /// Validates configuration values.
    pub fn validate(&self) -> Result<()> {
        if !is_supported_grid_size(self.editor.default_grid_size) {
            anyhow::bail!(
                "default_grid_size {} is not supported (expected {} to {})",
                self.editor.default_grid_size,
                SUPPORTED_GRID_SIZES.start(),
                SUPPORTED_GRID_SIZES.end()
            );
        }

        if !self.editor.cell_size.is_finite() || self.editor.cell_size <= 0.0 {
            anyhow::bail!(
                "cell_size must be a positive number, got {}",
                self.editor.cell_size
            );
        }

        Ok(())
    }
}
