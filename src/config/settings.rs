//! Application settings and configuration management

use crate::backend::output::DEFAULT_OUTPUT_KEYS;
use crate::error::{AppError, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};

/// Root configuration structure
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Settings {
    pub server: ServerConfig,
    pub auth: AuthConfig,
    pub rate_limit: RateLimitConfig,
    pub storage: StorageConfig,
    pub logging: LoggingConfig,
    pub generation: GenerationConfig,
    #[serde(default)]
    pub catalog: CatalogConfig,
}

/// Server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: usize,
    #[serde(default = "default_true")]
    pub cors_permissive: bool,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_max_upload_bytes() -> usize {
    10 * 1024 * 1024
}

/// Authentication configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuthConfig {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub api_keys: Vec<String>,
}

fn default_true() -> bool {
    true
}

/// Rate limiting configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RateLimitConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_rps")]
    pub requests_per_second: u32,
    #[serde(default = "default_burst")]
    pub burst_size: u32,
}

fn default_rps() -> u32 {
    5
}

fn default_burst() -> u32 {
    10
}

/// Temporary asset storage.
///
/// When enabled, uploaded photos are stored locally and handed to the
/// generation service as URLs; otherwise they are inlined as data URIs.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageConfig {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default = "default_storage_path")]
    pub base_path: String,
    #[serde(default = "default_url_prefix")]
    pub url_prefix: String,
    #[serde(default = "default_folder")]
    pub folder: String,
}

fn default_storage_path() -> String {
    "./temp".to_string()
}

fn default_url_prefix() -> String {
    "http://localhost:8080/temp".to_string()
}

fn default_folder() -> String {
    "uploads".to_string()
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "json".to_string()
}

/// Remote generation service configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GenerationConfig {
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
    #[serde(default)]
    pub api_token: String,
    #[serde(default = "default_poll_interval")]
    pub poll_interval_ms: u64,
    #[serde(default = "default_timeout")]
    pub timeout_ms: u64,
    #[serde(default = "ModelProfile::headshot")]
    pub headshot: ModelProfile,
    #[serde(default = "ModelProfile::edit")]
    pub edit: ModelProfile,
}

fn default_api_base_url() -> String {
    "https://api.replicate.com".to_string()
}

fn default_poll_interval() -> u64 {
    1000
}

fn default_timeout() -> u64 {
    60000
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            api_token: String::new(),
            poll_interval_ms: default_poll_interval(),
            timeout_ms: default_timeout(),
            headshot: ModelProfile::headshot(),
            edit: ModelProfile::edit(),
        }
    }
}

/// How one remote model is called and how its output is read
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ModelProfile {
    /// `owner/name` or `owner/name:version`
    pub model: String,
    /// Input field that carries the subject image
    #[serde(default = "default_image_input_key")]
    pub image_input_key: String,
    #[serde(default = "default_true")]
    pub image_required: bool,
    /// Static inputs merged into every request
    #[serde(default)]
    pub extra_input: Map<String, Value>,
    /// Keys searched for the result URL in object-shaped outputs
    #[serde(default = "default_output_keys")]
    pub output_keys: Vec<String>,
}

fn default_image_input_key() -> String {
    "input_image".to_string()
}

fn default_output_keys() -> Vec<String> {
    DEFAULT_OUTPUT_KEYS.iter().map(|k| k.to_string()).collect()
}

impl ModelProfile {
    pub fn headshot() -> Self {
        let mut extra_input = Map::new();
        extra_input.insert("output_format".to_string(), Value::from("jpg"));
        Self {
            model: "black-forest-labs/flux-kontext-pro".to_string(),
            image_input_key: default_image_input_key(),
            image_required: true,
            extra_input,
            output_keys: default_output_keys(),
        }
    }

    pub fn edit() -> Self {
        Self::headshot()
    }
}

/// Catalog source; the built-in tables are used when no path is set
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct CatalogConfig {
    #[serde(default)]
    pub path: Option<PathBuf>,
}

impl Settings {
    /// Load settings from configuration files and environment variables
    pub fn load() -> Result<Self> {
        Self::load_from_path("config/default.toml")
    }

    /// Load settings from a specific configuration file path
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let config = Config::builder()
            .set_default("server.host", default_host())?
            .set_default("server.port", i64::from(default_port()))?
            .set_default("auth.enabled", false)?
            .set_default("rate_limit.enabled", true)?
            .set_default("storage.enabled", false)?
            .set_default("logging.level", default_log_level())?
            .set_default("generation.api_base_url", default_api_base_url())?
            .add_source(File::with_name(path.as_ref().to_str().unwrap_or("config/default")).required(false))
            // Override with environment variables (prefixed with HEADSHOT_RELAY_)
            .add_source(
                Environment::with_prefix("HEADSHOT_RELAY")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let mut settings: Settings = config.try_deserialize()?;

        if settings.generation.api_token.is_empty() {
            if let Ok(token) = std::env::var("REPLICATE_API_TOKEN") {
                settings.generation.api_token = token;
            }
        }

        Ok(settings)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.server.port == 0 {
            return Err(invalid("Server port cannot be 0"));
        }

        if self.generation.poll_interval_ms == 0 {
            return Err(invalid("generation.poll_interval_ms must be greater than 0"));
        }

        if self.generation.api_token.trim().is_empty() {
            return Err(invalid(
                "Missing generation API token. Set REPLICATE_API_TOKEN or generation.api_token",
            ));
        }

        for (name, profile) in [("headshot", &self.generation.headshot), ("edit", &self.generation.edit)] {
            if profile.model.trim().is_empty() {
                return Err(invalid(format!("Model profile '{}' has no model", name)));
            }
            if profile.output_keys.is_empty() {
                return Err(invalid(format!(
                    "Model profile '{}' must list at least one output key",
                    name
                )));
            }
        }

        if self.rate_limit.enabled && self.rate_limit.requests_per_second == 0 {
            return Err(invalid("rate_limit.requests_per_second must be greater than 0"));
        }

        Ok(())
    }
}

fn invalid(message: impl Into<String>) -> AppError {
    AppError::Config(config::ConfigError::Message(message.into()))
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: default_host(),
                port: default_port(),
                max_upload_bytes: default_max_upload_bytes(),
                cors_permissive: true,
            },
            auth: AuthConfig {
                enabled: false,
                api_keys: vec![],
            },
            rate_limit: RateLimitConfig {
                enabled: true,
                requests_per_second: default_rps(),
                burst_size: default_burst(),
            },
            storage: StorageConfig {
                enabled: false,
                base_path: default_storage_path(),
                url_prefix: default_url_prefix(),
                folder: default_folder(),
            },
            logging: LoggingConfig {
                level: default_log_level(),
                format: default_log_format(),
            },
            generation: GenerationConfig::default(),
            catalog: CatalogConfig::default(),
        }
    }
}
