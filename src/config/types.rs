use crate::{Error, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    pub vision: VisionConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_api_prefix")]
    pub api_prefix: String,
    #[serde(default = "default_max_workers")]
    pub max_workers: usize,
    #[serde(default = "default_max_image_bytes")]
    pub max_image_bytes: usize,
    #[serde(default)]
    pub logs: LogsConfig,
    #[serde(default)]
    pub cors: CorsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogsConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorsConfig {
    #[serde(default = "default_cors_wildcard")]
    pub origins: Vec<String>,
    #[serde(default = "default_cors_wildcard")]
    pub methods: Vec<String>,
    #[serde(default = "default_cors_wildcard")]
    pub headers: Vec<String>,
    #[serde(default)]
    pub credentials: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VisionConfig {
    #[serde(default)]
    pub provider: VisionProvider,
    /// Overrides the provider's default endpoint. Leave empty for the
    /// hosted API.
    #[serde(default)]
    pub base_url: String,
    #[serde(default)]
    pub api_key: String,
    pub model: String,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    #[serde(default)]
    pub extraction: ExtractionStrategy,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VisionProvider {
    #[default]
    OpenAi,
    Gemini,
}

impl VisionProvider {
    /// Environment variable consulted for the API key before the config
    /// file value.
    pub fn api_key_env(&self) -> &'static str {
        match self {
            Self::OpenAi => "OPENAI_API_KEY",
            Self::Gemini => "GEMINI_API_KEY",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExtractionStrategy {
    #[default]
    Json,
    Keyword,
}

impl Config {
    pub fn validate(&self) -> Result<()> {
        if self.vision.api_key.is_empty() {
            return Err(Error::config(format!(
                "vision.api_key is not set (set it in the config file or via {})",
                self.vision.provider.api_key_env()
            )));
        }
        if self.vision.model.is_empty() {
            return Err(Error::config("vision.model must not be empty"));
        }
        if self.vision.max_tokens == 0 {
            return Err(Error::config("vision.max_tokens must be greater than zero"));
        }
        if self.server.max_workers == 0 {
            return Err(Error::config("server.max_workers must be greater than zero"));
        }
        if self.server.max_image_bytes == 0 {
            return Err(Error::config(
                "server.max_image_bytes must be greater than zero",
            ));
        }
        if !self.server.api_prefix.starts_with('/') || self.server.api_prefix.len() < 2 {
            return Err(Error::config(
                "server.api_prefix must start with '/' and name at least one path segment",
            ));
        }
        Ok(())
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            api_prefix: default_api_prefix(),
            max_workers: default_max_workers(),
            max_image_bytes: default_max_image_bytes(),
            logs: LogsConfig::default(),
            cors: CorsConfig::default(),
        }
    }
}

impl Default for LogsConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            origins: default_cors_wildcard(),
            methods: default_cors_wildcard(),
            headers: default_cors_wildcard(),
            credentials: false,
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_api_prefix() -> String {
    "/api/v1".to_string()
}

fn default_max_workers() -> usize {
    4
}

fn default_max_image_bytes() -> usize {
    10 * 1024 * 1024
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_cors_wildcard() -> Vec<String> {
    vec!["*".to_string()]
}

fn default_max_tokens() -> u32 {
    500
}
