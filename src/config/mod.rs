//! @acp:module "Configuration"
//! @acp:summary "Tool configuration loading and defaults"
//! @acp:domain cli
//! @acp:layer config

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::blueprint::DEFAULT_EXPORT_PATH;

/// Project-local config file name
pub const CONFIG_FILE_NAME: &str = ".sophia.config.json";

/// Placeholder key shipped in example env files; treated as absent
pub const PLACEHOLDER_API_KEY: &str = "sk-your-api-key-here";

fn default_config_schema() -> String {
    "https://sophia.dev/schemas/v1/config.schema.json".to_string()
}

/// @acp:summary "Main Sophia configuration structure"
/// @acp:lock normal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// JSON Schema URL for validation
    #[serde(rename = "$schema", default = "default_config_schema")]
    pub schema: String,

    /// AI enrichment settings
    #[serde(default)]
    pub ai: EnrichConfig,

    /// Export file locations
    #[serde(default)]
    pub export: ExportConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            schema: default_config_schema(),
            ai: EnrichConfig::default(),
            export: ExportConfig::default(),
        }
    }
}

impl Config {
    /// @acp:summary "Load config from a .sophia.config.json file"
    pub fn load<P: AsRef<Path>>(path: P) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// @acp:summary "Save config to a file"
    pub fn save<P: AsRef<Path>>(&self, path: P) -> crate::Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// @acp:summary "Load from the first existing default location or fall back to defaults"
    pub fn load_or_default() -> Self {
        match Self::locate() {
            Some(path) => Self::load_from(&path),
            None => Self::default(),
        }
    }

    /// Load an explicit path; a missing or unreadable file yields defaults
    pub fn load_from(path: &Path) -> Self {
        match Self::load(path) {
            Ok(config) => {
                tracing::debug!("Loaded config from {}", path.display());
                config
            }
            Err(e) => {
                if path.exists() {
                    tracing::warn!("Ignoring config {}: {}", path.display(), e);
                }
                Self::default()
            }
        }
    }

    /// Project file first, then the per-user config directory
    pub fn locate() -> Option<PathBuf> {
        let local = PathBuf::from(CONFIG_FILE_NAME);
        if local.exists() {
            return Some(local);
        }
        Self::user_config_path().filter(|p| p.exists())
    }

    /// `<config_dir>/sophia/config.json`
    pub fn user_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("sophia").join("config.json"))
    }
}

/// @acp:summary "Settings of the single chat-completion call"
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichConfig {
    /// Environment variable holding the API key
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,

    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_model")]
    pub model: String,

    #[serde(default = "default_temperature")]
    pub temperature: f32,

    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
}

impl Default for EnrichConfig {
    fn default() -> Self {
        Self {
            api_key_env: default_api_key_env(),
            base_url: default_base_url(),
            model: default_model(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
        }
    }
}

impl EnrichConfig {
    /// Raw value of the configured key variable, if set
    pub fn api_key_from_env(&self) -> Option<String> {
        std::env::var(&self.api_key_env).ok()
    }

    pub fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }
}

fn default_api_key_env() -> String {
    "OPENAI_API_KEY".to_string()
}

fn default_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_model() -> String {
    "gpt-4o".to_string()
}

fn default_temperature() -> f32 {
    0.7
}

fn default_max_tokens() -> u32 {
    4000
}

/// @acp:summary "Default export destinations"
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportConfig {
    #[serde(default = "default_json_path")]
    pub json_path: PathBuf,

    /// Markdown export is opt-in
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub markdown_path: Option<PathBuf>,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            json_path: default_json_path(),
            markdown_path: None,
        }
    }
}

fn default_json_path() -> PathBuf {
    PathBuf::from(DEFAULT_EXPORT_PATH)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.ai.model, "gpt-4o");
        assert_eq!(config.ai.max_tokens, 4000);
        assert_eq!(config.ai.api_key_env, "OPENAI_API_KEY");
        assert_eq!(config.export.json_path, PathBuf::from("course-blueprint.json"));
        assert_eq!(
            config.ai.completions_url(),
            "https://api.openai.com/v1/chat/completions"
        );
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let config: Config =
            serde_json::from_str(r#"{ "ai": { "model": "gpt-4o-mini" } }"#).unwrap();
        assert_eq!(config.ai.model, "gpt-4o-mini");
        assert_eq!(config.ai.temperature, 0.7);
        assert!(config.export.markdown_path.is_none());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);

        let mut config = Config::default();
        config.ai.base_url = "http://localhost:8080/v1/".to_string();
        config.save(&path).unwrap();

        let loaded = Config::load(&path).unwrap();
        assert_eq!(loaded, config);
        assert_eq!(
            loaded.ai.completions_url(),
            "http://localhost:8080/v1/chat/completions"
        );
    }

    #[test]
    fn test_missing_file_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("absent.json"));
        assert_eq!(config, Config::default());
    }
}
