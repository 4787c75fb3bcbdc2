//! User-level configuration for moatscope
//!
//! Supports loading config from:
//! - Environment variables (MOATSCOPE_FORMAT)
//! - ~/.config/moatscope/config.toml

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::warn;

/// Environment variable overriding the default output format
pub const FORMAT_ENV_VAR: &str = "MOATSCOPE_FORMAT";

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct UserConfig {
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct OutputConfig {
    /// Default output format: text, json, markdown
    pub format: Option<String>,
}

impl UserConfig {
    /// Load ~/.config/moatscope/config.toml, or defaults when it is missing or broken
    pub fn load_file() -> Self {
        Self::user_config_path()
            .filter(|p| p.exists())
            .and_then(|p| Self::from_file(&p))
            .unwrap_or_default()
    }

    fn from_file(path: &Path) -> Option<Self> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                warn!("Failed to read {}: {}", path.display(), e);
                return None;
            }
        };
        match toml::from_str(&content) {
            Ok(config) => Some(config),
            Err(e) => {
                warn!("Failed to parse {}: {}", path.display(), e);
                None
            }
        }
    }

    /// Output format from the environment, ignoring blank values
    pub fn env_format() -> Option<String> {
        std::env::var(FORMAT_ENV_VAR)
            .ok()
            .filter(|f| !f.trim().is_empty())
    }

    /// Get the user config directory path
    pub fn user_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("moatscope").join("config.toml"))
    }

    /// Default output format, if the user set one
    pub fn format(&self) -> Option<&str> {
        self.output.format.as_deref()
    }
}
