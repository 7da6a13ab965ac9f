//! Configuration loading

pub mod settings;

pub use settings::{
    AuthConfig, CatalogConfig, GenerationConfig, LoggingConfig, ModelProfile, RateLimitConfig,
    ServerConfig, Settings, StorageConfig,
};
