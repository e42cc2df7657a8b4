//! Application configuration.

use serde::Deserialize;
use std::path::Path;

/// Application configuration.
///
/// Built once at process start and passed by reference into the services
/// that need it; nothing reads the environment after startup.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Server configuration.
    pub server: ServerConfig,
    /// Database configuration.
    pub database: DatabaseConfig,
    /// Token signing and password policy configuration.
    pub auth: AuthConfig,
    /// External generation endpoint configuration.
    pub llm: LlmConfig,
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to bind to.
    #[serde(default = "default_port")]
    pub port: u16,
    /// Origins allowed by the CORS layer (the browser frontend).
    #[serde(default)]
    pub cors_origins: Vec<String>,
}

/// Database connection configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// `PostgreSQL` connection URL.
    pub url: String,
    /// Maximum number of connections in the pool.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Minimum number of connections in the pool.
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
}

/// Token signing configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// Signing secret. Never rotated within a process lifetime.
    pub secret_key: String,
    /// Signing algorithm name, e.g. `HS256`.
    #[serde(default = "default_algorithm")]
    pub algorithm: String,
    /// Token lifetime in minutes.
    #[serde(default = "default_token_expire_minutes")]
    pub access_token_expire_minutes: i64,
}

/// External generation endpoint configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LlmConfig {
    /// API key, appended to the request URL as a query parameter.
    pub api_key: String,
    /// Endpoint URL of the generation API.
    pub api_url: String,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

const fn default_port() -> u16 {
    8000
}

const fn default_max_connections() -> u32 {
    20
}

const fn default_min_connections() -> u32 {
    2
}

fn default_algorithm() -> String {
    "HS256".to_string()
}

const fn default_token_expire_minutes() -> i64 {
    60
}

impl Config {
    /// Load configuration from files and environment variables.
    ///
    /// Configuration is loaded in the following order:
    /// 1. `config/default.toml`
    /// 2. `config/{environment}.toml` (based on `DRAFTSMITH_ENV`)
    /// 3. Environment variables with `DRAFTSMITH` prefix
    pub fn load() -> Result<Self, config::ConfigError> {
        let env = std::env::var("DRAFTSMITH_ENV").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix("DRAFTSMITH")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }

    /// Load configuration from a specific file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::from(path.as_ref()))
            .add_source(
                config::Environment::with_prefix("DRAFTSMITH")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}
