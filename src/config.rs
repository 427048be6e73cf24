//! Configuration system for splitwm
//!
//! Loads configuration from TOML file at `~/.config/splitwm/config.toml`
//! Auto-generates default config file on first run if missing.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub tiling: TilingConfig,
    pub rules: RulesConfig,
}

impl Config {
    /// Load configuration from `path`, or from the default location.
    ///
    /// A missing file yields the defaults; at the default location the
    /// defaults are also written out.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let (config_path, is_default_path) = match path {
            Some(path) => (path.to_path_buf(), false),
            None => (Self::config_path()?, true),
        };

        if !config_path.exists() {
            info!("Config file not found at {:?}, using defaults", config_path);
            if is_default_path {
                if let Err(e) = Self::save_default(&config_path) {
                    warn!("Failed to create default config file: {}", e);
                }
            }
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read config file {:?}", config_path))?;

        let config = Self::from_toml(&content)
            .with_context(|| format!("Failed to parse config file {:?}", config_path))?;

        info!("Configuration loaded from {:?}", config_path);
        debug!("Config: {:?}", config);

        Ok(config)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Get the path to the config file
    fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Failed to get config directory")?
            .join("splitwm");

        Ok(config_dir.join("config.toml"))
    }

    /// Save default configuration to file
    fn save_default(path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let toml_string = toml::to_string_pretty(&Self::default())
            .context("Failed to serialize default config")?;

        fs::write(path, toml_string).context("Failed to write default config file")?;

        info!("Created default config file at {:?}", path);
        Ok(())
    }
}

/// Tiling configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TilingConfig {
    /// Max distance in pixels between two edges that still counts as shared
    pub neighbor_tolerance: f64,
}

impl Default for TilingConfig {
    fn default() -> Self {
        Self {
            neighbor_tolerance: 1.0,
        }
    }
}

/// Window rules
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RulesConfig {
    /// WM_CLASS names (instance or class, case-insensitive) that always float
    pub floating_classes: Vec<String>,
}

impl RulesConfig {
    pub fn is_floating_class(&self, class: &str) -> bool {
        self.floating_classes
            .iter()
            .any(|c| c.eq_ignore_ascii_case(class))
    }
}
