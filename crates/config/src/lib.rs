//! Configuration loading, validation, and management for Askhound.
//!
//! Loads configuration from `~/.askhound/config.toml` with environment
//! variable overrides for the Azure OpenAI credentials. Validates all
//! settings at startup.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// The root configuration structure.
///
/// Maps directly to `~/.askhound/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// HTTP server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Document corpus configuration
    #[serde(default)]
    pub documents: DocumentsConfig,

    /// Azure OpenAI completion configuration
    #[serde(default)]
    pub completion: CompletionConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".into()
}
fn default_port() -> u16 {
    8000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentsConfig {
    /// Directory of `.txt` files indexed at startup. Seeded with starter
    /// documents if it does not exist.
    #[serde(default = "default_documents_dir")]
    pub dir: String,
}

fn default_documents_dir() -> String {
    "documents".into()
}

impl Default for DocumentsConfig {
    fn default() -> Self {
        Self {
            dir: default_documents_dir(),
        }
    }
}

#[derive(Clone, Serialize, Deserialize)]
pub struct CompletionConfig {
    /// Azure OpenAI resource endpoint, e.g. `https://myresource.openai.azure.com`
    #[serde(default)]
    pub endpoint: String,

    /// Azure OpenAI API key
    #[serde(default)]
    pub api_key: String,

    /// Deployment name of the chat model
    #[serde(default = "default_deployment")]
    pub deployment: String,

    /// Azure OpenAI REST API version
    #[serde(default = "default_api_version")]
    pub api_version: String,

    /// Sampling temperature for completions
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Maximum tokens per completion
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
}

fn default_deployment() -> String {
    "gpt-4".into()
}
fn default_api_version() -> String {
    "2024-02-15-preview".into()
}
fn default_temperature() -> f32 {
    0.7
}
fn default_max_tokens() -> u32 {
    1000
}

impl Default for CompletionConfig {
    fn default() -> Self {
        Self {
            endpoint: String::new(),
            api_key: String::new(),
            deployment: default_deployment(),
            api_version: default_api_version(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
        }
    }
}

impl CompletionConfig {
    /// Whether enough is configured to call the completion API.
    pub fn is_configured(&self) -> bool {
        !self.endpoint.is_empty() && !self.api_key.is_empty()
    }
}

/// Redact a secret string for Debug output.
fn redact(s: &str) -> &'static str {
    if s.is_empty() { "\"\"" } else { "[REDACTED]" }
}

impl std::fmt::Debug for CompletionConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompletionConfig")
            .field("endpoint", &self.endpoint)
            .field("api_key", &redact(&self.api_key))
            .field("deployment", &self.deployment)
            .field("api_version", &self.api_version)
            .field("temperature", &self.temperature)
            .field("max_tokens", &self.max_tokens)
            .finish()
    }
}

impl AppConfig {
    /// Load configuration from the default path (~/.askhound/config.toml).
    ///
    /// Environment variables override the completion settings:
    /// - `AZURE_OPENAI_ENDPOINT`
    /// - `AZURE_OPENAI_KEY`
    /// - `AZURE_OPENAI_DEPLOYMENT_NAME`
    pub fn load() -> Result<Self, ConfigError> {
        let config_dir = Self::config_dir();
        let config_path = config_dir.join("config.toml");
        let mut config = Self::load_from(&config_path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load configuration from an explicit path if given, the default path
    /// otherwise. Environment overrides apply in both cases.
    pub fn load_with(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => {
                let mut config = Self::load_from(path)?;
                config.apply_env_overrides();
                Ok(config)
            }
            None => Self::load(),
        }
    }

    /// Apply environment variable overrides (highest priority).
    fn apply_env_overrides(&mut self) {
        if let Ok(endpoint) = std::env::var("AZURE_OPENAI_ENDPOINT") {
            self.completion.endpoint = endpoint;
        }
        if let Ok(api_key) = std::env::var("AZURE_OPENAI_KEY") {
            self.completion.api_key = api_key;
        }
        if let Ok(deployment) = std::env::var("AZURE_OPENAI_DEPLOYMENT_NAME") {
            self.completion.deployment = deployment;
        }
    }

    /// Load configuration from a specific file path.
    ///
    /// No environment overrides are applied here, so tests can rely on the
    /// file contents alone.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::info!("No config file found at {}, using defaults", path.display());
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
        dirs_home().join(".askhound")
    }

    /// Validate the configuration.
    fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::ValidationError(
                "server.port must be non-zero".into(),
            ));
        }

        if self.completion.temperature < 0.0 || self.completion.temperature > 2.0 {
            return Err(ConfigError::ValidationError(
                "completion.temperature must be between 0.0 and 2.0".into(),
            ));
        }

        if self.documents.dir.is_empty() {
            return Err(ConfigError::ValidationError(
                "documents.dir must not be empty".into(),
            ));
        }

        Ok(())
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            documents: DocumentsConfig::default(),
            completion: CompletionConfig::default(),
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
}
