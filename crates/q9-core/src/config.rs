//! JSON configuration file shared with the presentation process.
//!
//! The engine side only needs the `system` flags and the key-mapping
//! tables; window geometry and button layout are read and written here
//! because the file is the single source of truth for both processes.
//! `save` rewrites only the `window`/`storage`/`system` sections and
//! preserves any other root keys it does not understand.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("config parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct WindowConfig {
    pub width: i32,
    pub height: i32,
    #[serde(rename = "minWidth")]
    pub min_width: i32,
    #[serde(rename = "maxWidth")]
    pub max_width: i32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 240,
            height: 320,
            min_width: 120,
            max_width: 480,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct StorageConfig {
    pub x: i32,
    pub y: i32,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self { x: 50, y: 50 }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SystemConfig {
    /// Map committed text to simplified characters.
    pub sc_output: bool,
    /// Numeric-keypad layout; when false the alternate-letter layout in
    /// `altkey` is used instead.
    pub use_numpad: bool,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            sc_output: false,
            use_numpad: true,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct ButtonConfig {
    pub id: u8,
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
    pub r: i32,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct StatusConfig {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub window: WindowConfig,
    pub storage: StorageConfig,
    pub system: SystemConfig,
    pub buttons: Vec<ButtonConfig>,
    pub status: StatusConfig,
    /// Key-name → action id, numpad layout overrides.
    pub key: HashMap<String, i32>,
    /// Key-name → action id, alternate-letter layout.
    pub altkey: HashMap<String, i32>,

    /// Path the config was loaded from, kept for `save`.
    #[serde(skip)]
    pub config_path: PathBuf,
}

impl AppConfig {
    /// Load from `path`. A missing or unreadable file yields the default
    /// config; only malformed JSON is an error.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) => {
                tracing::warn!(path = %path.display(), %err, "config missing, using defaults");
                let mut config = Self::default();
                config.config_path = path.to_path_buf();
                return Ok(config);
            }
        };
        let mut config: AppConfig = serde_json::from_str(&text)?;
        config.config_path = path.to_path_buf();
        Ok(config)
    }

    /// Write the `window`/`storage`/`system` sections back to the file
    /// the config was loaded from, keeping unknown root keys intact.
    pub fn save(&self) -> Result<(), ConfigError> {
        let mut root: serde_json::Value = match fs::read_to_string(&self.config_path) {
            Ok(text) => serde_json::from_str(&text).unwrap_or_else(|_| serde_json::json!({})),
            Err(_) => serde_json::json!({}),
        };

        if let Some(obj) = root.as_object_mut() {
            obj.insert("window".into(), serde_json::to_value(&self.window)?);
            obj.insert("storage".into(), serde_json::to_value(&self.storage)?);
            obj.insert("system".into(), serde_json::to_value(&self.system)?);
        }

        fs::write(&self.config_path, serde_json::to_string_pretty(&root)?)?;
        Ok(())
    }
}
