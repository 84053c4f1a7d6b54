//! YAML configuration for the relay.
//!
//! Every key is optional; a missing file means all defaults.

use std::io::ErrorKind;
use std::path::Path;
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;
use tokio::fs;
use tracing::debug;

use crate::llm::{AnthropicAdapter, GeminiAdapter, OllamaAdapter, OpenAIAdapter};

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub providers: ProvidersConfig,
}

impl Config {
    pub async fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        match fs::read_to_string(path).await {
            Ok(contents) => Ok(serde_saphyr::from_str(&contents)?),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %path.display(), "No config file, using defaults");
                Ok(Self::default())
            }
            Err(e) => Err(ConfigError::Io(e)),
        }
    }
}

/// Listener settings.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub request_timeout_seconds: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            request_timeout_seconds: 300,
        }
    }
}

/// Outbound client settings and provider endpoint defaults.
///
/// Paths and query shapes are fixed per provider; only the scheme and host
/// part is configurable.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ProvidersConfig {
    pub timeout_seconds: u64,
    pub openai_base_url: String,
    pub anthropic_base_url: String,
    pub gemini_base_url: String,
    /// Used by `ollama` when the request carries no `ollamaUrl`.
    pub ollama_url: String,
    /// Used by `ollamaCloud` when the request carries no `ollamaUrl`.
    pub ollama_cloud_url: String,
}

impl ProvidersConfig {
    /// Per-call timeout for the outbound HTTP client.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

impl Default for ProvidersConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: 120,
            openai_base_url: OpenAIAdapter::DEFAULT_BASE_URL.to_string(),
            anthropic_base_url: AnthropicAdapter::DEFAULT_BASE_URL.to_string(),
            gemini_base_url: GeminiAdapter::DEFAULT_BASE_URL.to_string(),
            ollama_url: OllamaAdapter::DEFAULT_LOCAL_URL.to_string(),
            ollama_cloud_url: OllamaAdapter::DEFAULT_CLOUD_URL.to_string(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config file: {0}")]
    Yaml(#[from] serde_saphyr::Error),
}
