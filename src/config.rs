//! Picker settings for the demo application.
//!
//! Settings are read from a JSON file; nothing is ever written back.

use crate::options::{PickerOptions, DEFAULT_ACTIVE_FONT};
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Everything needed to construct a [`crate::FontPicker`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// Google Fonts Developer API key.
    pub api_key: Option<String>,
    /// Font selected on startup.
    pub active_font: Option<String>,
    pub options: PickerOptions,
}

impl Config {
    /// Get the default settings path for the current platform.
    ///
    /// - macOS/Linux: `~/.config/gpui-font-picker/settings.json`
    /// - Windows: `%APPDATA%/gpui-font-picker/settings.json`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("gpui-font-picker").join("settings.json"))
    }

    /// Load settings from the default path, returns default if missing or invalid.
    pub fn load() -> Self {
        let Some(path) = Self::default_path() else {
            return Self::default();
        };
        if !path.exists() {
            return Self::default();
        }
        Self::load_from(&path).unwrap_or_else(|e| {
            log::warn!("Ignoring settings file: {:#}", e);
            Self::default()
        })
    }

    /// Load settings from an explicit path.
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::from_json(&contents).with_context(|| format!("Invalid settings in {}", path.display()))
    }

    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.options.validate()?;
        Ok(config)
    }

    pub fn api_key(&self) -> &str {
        self.api_key.as_deref().unwrap_or("")
    }

    pub fn active_font(&self) -> &str {
        self.active_font.as_deref().unwrap_or(DEFAULT_ACTIVE_FONT)
    }
}
