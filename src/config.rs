//! Widget configuration persistence
//!
//! Stores user preferences in `~/.config/overmark/config.yaml`

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::highlight::{FontSpec, DEFAULT_HIGHLIGHT_COLOR};
use crate::theme::Color;

/// Widget configuration that persists across sessions
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WidgetConfig {
    /// Hex color applied to highlights added without one (e.g. "#FFFF00")
    #[serde(default = "default_color")]
    pub default_color: String,
    /// Display font stamped into highlight markup
    #[serde(default)]
    pub font: FontSpec,
}

fn default_color() -> String {
    DEFAULT_HIGHLIGHT_COLOR.to_string()
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            default_color: default_color(),
            font: FontSpec::default(),
        }
    }
}

impl WidgetConfig {
    /// Load config from disk, or return defaults if not found
    pub fn load() -> Self {
        let Some(path) = crate::config_paths::config_file() else {
            tracing::debug!("No config directory available, using defaults");
            return Self::default();
        };

        if !path.exists() {
            tracing::debug!(
                "Config file not found at {}, using defaults",
                path.display()
            );
            return Self::default();
        }

        Self::load_from(&path)
    }

    /// Load config from a specific path, falling back to defaults on failure
    pub fn load_from(path: &Path) -> Self {
        let config = match std::fs::read_to_string(path) {
            Ok(content) => match serde_yaml::from_str::<WidgetConfig>(&content) {
                Ok(config) => {
                    tracing::info!("Loaded config from {}", path.display());
                    config
                }
                Err(e) => {
                    tracing::warn!("Failed to parse config at {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!("Failed to read config at {}: {}", path.display(), e);
                Self::default()
            }
        };

        config.validated()
    }

    /// Replace a malformed default color with the built-in one
    fn validated(mut self) -> Self {
        if let Err(e) = Color::from_hex(&self.default_color) {
            tracing::warn!(
                "Ignoring invalid default_color {:?}: {}",
                self.default_color,
                e
            );
            self.default_color = default_color();
        }
        self
    }

    /// Save config to disk
    ///
    /// Creates the config directory if it doesn't exist.
    pub fn save(&self) -> Result<(), String> {
        let path = crate::config_paths::config_file()
            .ok_or_else(|| "No config directory available".to_string())?;
        self.save_to(&path)
    }

    /// Save config to a specific path, creating parent directories
    pub fn save_to(&self, path: &Path) -> Result<(), String> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create config directory: {}", e))?;
        }

        let content = serde_yaml::to_string(self)
            .map_err(|e| format!("Failed to serialize config: {}", e))?;

        std::fs::write(path, content)
            .map_err(|e| format!("Failed to write config to {}: {}", path.display(), e))?;

        tracing::info!("Saved config to {}", path.display());
        Ok(())
    }
}
