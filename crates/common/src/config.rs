//! Application configuration.

use serde::Deserialize;
use std::path::Path;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Server configuration.
    pub server: ServerConfig,
    /// Database configuration.
    pub database: DatabaseConfig,
    /// Evidence file storage configuration.
    #[serde(default)]
    pub storage: StorageSettings,
    /// Degraded-mode fallback configuration.
    #[serde(default)]
    pub fallback: FallbackConfig,
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
    /// Public URL of this instance.
    pub url: String,
}

/// Database connection configuration.
///
/// The store mode is explicit: with `enabled = false` (or an unreachable
/// database at startup) the service runs entirely on the seeded in-memory
/// store.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Whether the backing database should be used at all.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// `PostgreSQL` connection URL.
    #[serde(default)]
    pub url: String,
    /// Maximum number of connections in the pool.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Minimum number of connections in the pool.
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
}

/// Evidence file storage configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct StorageSettings {
    /// Base path for stored evidence files.
    #[serde(default = "default_storage_path")]
    pub base_path: String,
    /// Base URL for serving evidence files.
    #[serde(default = "default_storage_url")]
    pub base_url: String,
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            base_path: default_storage_path(),
            base_url: default_storage_url(),
        }
    }
}

/// Degraded-mode fallback configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct FallbackConfig {
    /// Whether infrastructure errors fall back to the in-memory store.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Path of the JSON credential store used when the database is down.
    #[serde(default = "default_credentials_path")]
    pub credentials_path: String,
}

impl Default for FallbackConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            credentials_path: default_credentials_path(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

const fn default_port() -> u16 {
    3000
}

const fn default_max_connections() -> u32 {
    20
}

const fn default_min_connections() -> u32 {
    2
}

fn default_storage_path() -> String {
    "./files".to_string()
}

fn default_storage_url() -> String {
    "/files".to_string()
}

fn default_credentials_path() -> String {
    "./data/credentials.json".to_string()
}

const fn default_true() -> bool {
    true
}

impl Config {
    /// Load configuration from files and environment variables.
    ///
    /// Configuration is loaded in the following order:
    /// 1. `config/default.toml`
    /// 2. `config/{environment}.toml` (based on `RAPPORT_ENV`)
    /// 3. Environment variables with `RAPPORT_` prefix
    pub fn load() -> Result<Self, config::ConfigError> {
        let env = std::env::var("RAPPORT_ENV").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix("RAPPORT")
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
                config::Environment::with_prefix("RAPPORT")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}
