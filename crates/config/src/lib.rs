//! Configuration loading, validation, and management for promptloom.
//!
//! Loads configuration from `~/.promptloom/config.toml` with environment
//! variable overrides (`ANTHROPIC_API_KEY`, `CLAUDE_MODEL`). Validates
//! all settings at startup, before any expansion begins.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// The root configuration structure.
///
/// Maps directly to `~/.promptloom/config.toml`.
#[derive(Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Anthropic API key
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Default model
    #[serde(default = "default_model")]
    pub model: String,

    /// Default max tokens per response
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Default temperature
    #[serde(default)]
    pub temperature: f32,

    /// Default system prompt file, looked up next to the input
    #[serde(default = "default_system_prompt_file")]
    pub system_prompt_file: String,

    /// Expansion settings
    #[serde(default)]
    pub expand: ExpandConfig,
}

fn default_model() -> String {
    "claude-3-opus-20240229".into()
}
fn default_max_tokens() -> u32 {
    4096
}
fn default_system_prompt_file() -> String {
    "system.txt".into()
}

/// Redact a secret string for Debug output.
fn redact(s: &Option<String>) -> &'static str {
    match s {
        Some(_) => "[REDACTED]",
        None => "None",
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("api_key", &redact(&self.api_key))
            .field("model", &self.model)
            .field("max_tokens", &self.max_tokens)
            .field("temperature", &self.temperature)
            .field("system_prompt_file", &self.system_prompt_file)
            .field("expand", &self.expand)
            .finish()
    }
}

/// Reference expansion settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpandConfig {
    /// Depth budget for filesystem references (1 = no descent)
    #[serde(default = "default_depth")]
    pub file_depth: u32,

    /// Depth budget for web references (1 = the page itself only)
    #[serde(default = "default_depth")]
    pub web_depth: u32,

    /// Run the cleaning pass on the assembled prompt
    #[serde(default)]
    pub clean: bool,
}

fn default_depth() -> u32 {
    1
}

impl Default for ExpandConfig {
    fn default() -> Self {
        Self {
            file_depth: default_depth(),
            web_depth: default_depth(),
            clean: false,
        }
    }
}

impl AppConfig {
    /// Load configuration from the default path (~/.promptloom/config.toml).
    ///
    /// Environment variables take priority over the file:
    /// - `ANTHROPIC_API_KEY` — API key
    /// - `CLAUDE_MODEL` — model override
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::config_dir().join("config.toml");
        let mut config = Self::load_from(&config_path)?;

        if let Ok(key) = std::env::var("ANTHROPIC_API_KEY") {
            config.api_key = Some(key);
        }
        if let Ok(model) = std::env::var("CLAUDE_MODEL") {
            config.model = model;
        }

        Ok(config)
    }

    /// Load configuration from a specific file path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::debug!("No config file found at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Get the configuration directory path.
    pub fn config_dir() -> PathBuf {
        dirs_home().join(".promptloom")
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.temperature) {
            return Err(ConfigError::ValidationError(
                "temperature must be between 0.0 and 1.0".into(),
            ));
        }
        if self.expand.file_depth == 0 || self.expand.web_depth == 0 {
            return Err(ConfigError::ValidationError(
                "expansion depths must be at least 1".into(),
            ));
        }
        Ok(())
    }

    /// Check if an API key is available (from config or environment).
    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: default_model(),
            max_tokens: default_max_tokens(),
            temperature: 0.0,
            system_prompt_file: default_system_prompt_file(),
            expand: ExpandConfig::default(),
        }
    }
}

/// Get the user's home directory.
fn dirs_home() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        std::env::var("USERPROFILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("C:\\Users\\Default"))
    }
    #[cfg(not(target_os = "windows"))]
    {
        std::env::var("HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("/tmp"))
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError { path: PathBuf, reason: String },

    #[error("Failed to parse config file at {path}: {reason}")]
    ParseError { path: PathBuf, reason: String },

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),

    #[error("Missing required setting: {0}")]
    Missing(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.model, "claude-3-opus-20240229");
        assert_eq!(config.max_tokens, 4096);
        assert_eq!(config.expand.file_depth, 1);
        assert_eq!(config.expand.web_depth, 1);
        assert!(!config.expand.clean);
    }

    #[test]
    fn config_roundtrip_toml() {
        let config = AppConfig::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        let parsed: AppConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.model, config.model);
        assert_eq!(parsed.expand.file_depth, config.expand.file_depth);
    }

    #[test]
    fn invalid_temperature_rejected() {
        let config = AppConfig {
            temperature: 1.5,
            ..AppConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn zero_depth_rejected() {
        let mut config = AppConfig::default();
        config.expand.web_depth = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn missing_config_file_returns_defaults() {
        let result = AppConfig::load_from(Path::new("/nonexistent/config.toml"));
        assert!(result.is_ok());
        assert_eq!(result.unwrap().model, "claude-3-opus-20240229");
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "model = \"claude-3-5-sonnet-20241022\"\n\n[expand]\nweb_depth = 3\n",
        )
        .unwrap();

        let config = AppConfig::load_from(&path).unwrap();
        assert_eq!(config.model, "claude-3-5-sonnet-20241022");
        assert_eq!(config.expand.web_depth, 3);
        assert_eq!(config.expand.file_depth, 1);
        assert_eq!(config.max_tokens, 4096);
    }

    #[test]
    fn debug_redacts_api_key() {
        let config = AppConfig {
            api_key: Some("sk-ant-secret".into()),
            ..AppConfig::default()
        };
        let debug = format!("{config:?}");
        assert!(!debug.contains("sk-ant-secret"));
        assert!(debug.contains("[REDACTED]"));
    }
}
