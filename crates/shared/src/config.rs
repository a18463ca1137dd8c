//! Application configuration management.

use std::collections::BTreeSet;

use config::ConfigError;
use serde::Deserialize;

/// Application configuration.
///
/// Built once at startup and never mutated afterwards.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Database configuration.
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Remote image host configuration.
    #[serde(default)]
    pub imgbb: ImgbbConfig,
    /// Upload limits.
    #[serde(default)]
    pub upload: UploadConfig,
    /// Environment name (`production`, `development`, ...).
    #[serde(default = "default_environment")]
    pub environment: String,
    /// Default log filter directive.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_environment() -> String {
    "production".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

/// Database configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Path of the SQLite database file, or `:memory:`.
    #[serde(default = "default_database_path")]
    pub path: String,
    /// Maximum number of pooled connections.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_database_path(),
            max_connections: default_max_connections(),
        }
    }
}

fn default_database_path() -> String {
    "images.db".to_string()
}

fn default_max_connections() -> u32 {
    5
}

impl DatabaseConfig {
    /// Connection URL for the configured path.
    ///
    /// File databases are created on first connect.
    #[must_use]
    pub fn url(&self) -> String {
        if self.path == ":memory:" {
            "sqlite::memory:".to_string()
        } else {
            format!("sqlite://{}?mode=rwc", self.path)
        }
    }
}

/// ImgBB API configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ImgbbConfig {
    /// API key. Required.
    #[serde(default)]
    pub api_key: String,
    /// Upload endpoint.
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// Request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ImgbbConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            api_url: default_api_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_api_url() -> String {
    "https://api.imgbb.com/1/upload".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

/// Upload limits.
#[derive(Debug, Clone, Deserialize)]
pub struct UploadConfig {
    /// Maximum accepted file size in bytes.
    #[serde(default = "default_max_file_size")]
    pub max_file_size: u64,
    /// Accepted file extensions, lowercase, without the dot.
    #[serde(default = "default_allowed_extensions")]
    pub allowed_extensions: BTreeSet<String>,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            max_file_size: default_max_file_size(),
            allowed_extensions: default_allowed_extensions(),
        }
    }
}

/// 32 MiB, the ImgBB hard limit.
pub const DEFAULT_MAX_FILE_SIZE: u64 = 32 * 1024 * 1024;

fn default_max_file_size() -> u64 {
    DEFAULT_MAX_FILE_SIZE
}

fn default_allowed_extensions() -> BTreeSet<String> {
    ["png", "jpg", "jpeg", "gif", "webp", "bmp", "tiff"]
        .into_iter()
        .map(String::from)
        .collect()
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// Sources, lowest precedence first: `config/default`, `config/{RUN_MODE}`,
    /// then `PIXSTASH__*` environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded or the ImgBB API key is missing.
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "production".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(
                config::Environment::with_prefix("PIXSTASH")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("upload.allowed_extensions")
                    .try_parsing(true),
            )
            .build()?;

        let mut loaded: Self = config.try_deserialize()?;
        loaded.normalize();
        loaded.validate()?;
        Ok(loaded)
    }

    /// Checks settings the process cannot run without.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NotFound` when the ImgBB API key is blank.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.imgbb.api_key.trim().is_empty() {
            return Err(ConfigError::NotFound("imgbb.api_key".to_string()));
        }
        Ok(())
    }

    /// Whether debug-only behaviour is enabled.
    #[must_use]
    pub fn is_development(&self) -> bool {
        self.environment.eq_ignore_ascii_case("development")
    }

    fn normalize(&mut self) {
        self.upload.allowed_extensions = self
            .upload
            .allowed_extensions
            .iter()
            .map(|ext| ext.trim().trim_start_matches('.').to_ascii_lowercase())
            .filter(|ext| !ext.is_empty())
            .collect();
    }
}
