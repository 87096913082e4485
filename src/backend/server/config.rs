/**
 * Server Configuration
 *
 * This module handles loading and validation of server configuration.
 *
 * # Configuration Sources
 *
 * Later sources override earlier ones:
 * 1. Built-in defaults, suitable for local development
 * 2. An optional TOML file named by `BACKENDHUB_CONFIG`
 * 3. Environment variables (`.env` is loaded by the binary beforehand)
 *
 * # Environment Variables
 *
 * | Variable | Default |
 * |---|---|
 * | `SERVER_PORT` | `3000` |
 * | `DATABASE_URL` | unset (in-memory storage) |
 * | `ACCESS_TOKEN_SECRET` / `REFRESH_TOKEN_SECRET` | development secrets |
 * | `ACCESS_TOKEN_EXPIRY` / `REFRESH_TOKEN_EXPIRY` | `1d` / `10d` |
 * | `BCRYPT_COST` | `10` |
 * | `COOKIE_SECURE` | `true` |
 * | `CORS_ORIGIN` | `http://localhost:5173` |
 * | `MAX_UPLOAD_FILES` / `MAX_UPLOAD_BYTES` | `50` / 50 MiB |
 * | `UPLOAD_DIR` / `PUBLIC_BASE_URL` | `public/uploads` / `http://localhost:3000` |
 * | `CLOUDINARY_CLOUD_NAME` / `CLOUDINARY_UPLOAD_PRESET` / `CLOUDINARY_API_BASE` | unset |
 */

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use axum::http::HeaderValue;
use serde::Deserialize;
use sqlx::{postgres::PgPoolOptions, PgPool};
use thiserror::Error;

/// Environment variable naming an optional TOML config file
pub const CONFIG_PATH_ENV: &str = "BACKENDHUB_CONFIG";

const DEV_ACCESS_SECRET: &str = "backendhub-dev-access-secret";
const DEV_REFRESH_SECRET: &str = "backendhub-dev-refresh-secret";
const DEFAULT_CLOUDINARY_API_BASE: &str = "https://api.cloudinary.com";
const DEFAULT_CLOUDINARY_TIMEOUT_SECS: u64 = 60;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid duration '{0}': expected a number with an optional s, m, h, d or w suffix")]
    InvalidDuration(String),

    #[error("invalid value for {key}: '{value}'")]
    InvalidValue { key: &'static str, value: String },

    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Token and password settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    pub access_token_secret: String,
    /// Lifetime such as `"15m"` or `"1d"`
    pub access_token_expiry: String,
    pub refresh_token_secret: String,
    pub refresh_token_expiry: String,
    pub bcrypt_cost: u32,
    /// Set the `Secure` attribute on auth cookies
    pub cookie_secure: bool,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            access_token_secret: DEV_ACCESS_SECRET.to_string(),
            access_token_expiry: "1d".to_string(),
            refresh_token_secret: DEV_REFRESH_SECRET.to_string(),
            refresh_token_expiry: "10d".to_string(),
            bcrypt_cost: 10,
            cookie_secure: true,
        }
    }
}

impl AuthConfig {
    pub fn access_lifetime(&self) -> Result<Duration, ConfigError> {
        parse_duration(&self.access_token_expiry)
    }

    pub fn refresh_lifetime(&self) -> Result<Duration, ConfigError> {
        parse_duration(&self.refresh_token_expiry)
    }
}

/// Upload limits and local media storage
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UploadConfig {
    /// Maximum number of files per project
    pub max_files: usize,
    /// Maximum size of an upload request body in bytes
    pub max_bytes: usize,
    /// Directory used by the local media store
    pub dir: PathBuf,
    /// Base URL under which `/uploads` is reachable
    pub public_base_url: String,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            max_files: 50,
            max_bytes: 50 * 1024 * 1024,
            dir: PathBuf::from("public/uploads"),
            public_base_url: "http://localhost:3000".to_string(),
        }
    }
}

/// Cloudinary unsigned upload settings
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct CloudinaryConfig {
    pub cloud_name: String,
    pub upload_preset: String,
    #[serde(default = "default_cloudinary_api_base")]
    pub api_base: String,
    /// Whole-request limit for one upload, in seconds
    #[serde(default = "default_cloudinary_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_cloudinary_api_base() -> String {
    DEFAULT_CLOUDINARY_API_BASE.to_string()
}

fn default_cloudinary_timeout_secs() -> u64 {
    DEFAULT_CLOUDINARY_TIMEOUT_SECS
}

/// Complete server configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub port: u16,
    /// PostgreSQL URL; `None` selects the in-memory store
    pub database_url: Option<String>,
    /// Allowed CORS origin (credentials are allowed, so no wildcard)
    pub cors_origin: String,
    pub auth: AuthConfig,
    pub uploads: UploadConfig,
    /// When set, files go to Cloudinary instead of the local directory
    pub cloudinary: Option<CloudinaryConfig>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 3000,
            database_url: None,
            cors_origin: "http://localhost:5173".to_string(),
            auth: AuthConfig::default(),
            uploads: UploadConfig::default(),
            cloudinary: None,
        }
    }
}

impl ServerConfig {
    /// Create a new ServerConfigBuilder
    pub fn builder() -> ServerConfigBuilder {
        ServerConfigBuilder::default()
    }

    /// Load configuration from the optional TOML file and the environment
    ///
    /// # Errors
    ///
    /// Fails if the file cannot be read or parsed, if an environment value
    /// does not parse, or if the result does not validate.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = match env_string(CONFIG_PATH_ENV) {
            Some(path) => {
                tracing::info!("Loading configuration from {}", path);
                Self::from_toml_file(PathBuf::from(path))?
            }
            None => Self::default(),
        };

        config.apply_env()?;

        if config.auth.access_token_secret == DEV_ACCESS_SECRET
            || config.auth.refresh_token_secret == DEV_REFRESH_SECRET
        {
            tracing::warn!(
                "ACCESS_TOKEN_SECRET or REFRESH_TOKEN_SECRET not set. Using development secrets."
            );
        }

        config.validate()?;
        Ok(config)
    }

    /// Parse a TOML document
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(contents)?)
    }

    fn from_toml_file(path: PathBuf) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(&path)
            .map_err(|source| ConfigError::Io { path, source })?;
        Self::from_toml_str(&contents)
    }

    /// Override fields from environment variables that are set
    pub fn apply_env(&mut self) -> Result<(), ConfigError> {
        if let Some(port) = env_parse("SERVER_PORT")? {
            self.port = port;
        }
        if let Some(url) = env_string("DATABASE_URL") {
            self.database_url = Some(url);
        }
        if let Some(origin) = env_string("CORS_ORIGIN") {
            self.cors_origin = origin;
        }

        if let Some(secret) = env_string("ACCESS_TOKEN_SECRET") {
            self.auth.access_token_secret = secret;
        }
        if let Some(expiry) = env_string("ACCESS_TOKEN_EXPIRY") {
            self.auth.access_token_expiry = expiry;
        }
        if let Some(secret) = env_string("REFRESH_TOKEN_SECRET") {
            self.auth.refresh_token_secret = secret;
        }
        if let Some(expiry) = env_string("REFRESH_TOKEN_EXPIRY") {
            self.auth.refresh_token_expiry = expiry;
        }
        if let Some(cost) = env_parse("BCRYPT_COST")? {
            self.auth.bcrypt_cost = cost;
        }
        if let Some(secure) = env_parse("COOKIE_SECURE")? {
            self.auth.cookie_secure = secure;
        }

        if let Some(max_files) = env_parse("MAX_UPLOAD_FILES")? {
            self.uploads.max_files = max_files;
        }
        if let Some(max_bytes) = env_parse("MAX_UPLOAD_BYTES")? {
            self.uploads.max_bytes = max_bytes;
        }
        if let Some(dir) = env_string("UPLOAD_DIR") {
            self.uploads.dir = PathBuf::from(dir);
        }
        if let Some(base) = env_string("PUBLIC_BASE_URL") {
            self.uploads.public_base_url = base;
        }

        if let (Some(cloud_name), Some(upload_preset)) = (
            env_string("CLOUDINARY_CLOUD_NAME"),
            env_string("CLOUDINARY_UPLOAD_PRESET"),
        ) {
            self.cloudinary = Some(CloudinaryConfig {
                cloud_name,
                upload_preset,
                api_base: env_string("CLOUDINARY_API_BASE")
                    .unwrap_or_else(default_cloudinary_api_base),
                timeout_secs: env_parse("CLOUDINARY_TIMEOUT_SECS")?
                    .unwrap_or(DEFAULT_CLOUDINARY_TIMEOUT_SECS),
            });
        }

        Ok(())
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        let auth = &self.auth;

        if auth.access_token_secret.is_empty() || auth.refresh_token_secret.is_empty() {
            return Err(ConfigError::Invalid("token secrets must not be empty".into()));
        }
        if auth.access_token_secret == auth.refresh_token_secret {
            return Err(ConfigError::Invalid(
                "access and refresh tokens must use different secrets".into(),
            ));
        }
        if auth.access_lifetime()?.is_zero() || auth.refresh_lifetime()?.is_zero() {
            return Err(ConfigError::Invalid("token lifetimes must be positive".into()));
        }
        if !(4..=31).contains(&auth.bcrypt_cost) {
            return Err(ConfigError::InvalidValue {
                key: "BCRYPT_COST",
                value: auth.bcrypt_cost.to_string(),
            });
        }
        if self.uploads.max_files == 0 {
            return Err(ConfigError::InvalidValue {
                key: "MAX_UPLOAD_FILES",
                value: "0".into(),
            });
        }
        if HeaderValue::from_str(&self.cors_origin).is_err() {
            return Err(ConfigError::InvalidValue {
                key: "CORS_ORIGIN",
                value: self.cors_origin.clone(),
            });
        }

        Ok(())
    }
}

/// Builder for ServerConfig
#[derive(Debug, Default)]
pub struct ServerConfigBuilder {
    config: ServerConfig,
}

impl ServerConfigBuilder {
    pub fn token_secrets(mut self, access: impl Into<String>, refresh: impl Into<String>) -> Self {
        self.config.auth.access_token_secret = access.into();
        self.config.auth.refresh_token_secret = refresh.into();
        self
    }

    pub fn token_expiry(mut self, access: impl Into<String>, refresh: impl Into<String>) -> Self {
        self.config.auth.access_token_expiry = access.into();
        self.config.auth.refresh_token_expiry = refresh.into();
        self
    }

    pub fn bcrypt_cost(mut self, cost: u32) -> Self {
        self.config.auth.bcrypt_cost = cost;
        self
    }

    pub fn cookie_secure(mut self, secure: bool) -> Self {
        self.config.auth.cookie_secure = secure;
        self
    }

    pub fn cors_origin(mut self, origin: impl Into<String>) -> Self {
        self.config.cors_origin = origin.into();
        self
    }

    pub fn upload_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.uploads.dir = dir.into();
        self
    }

    pub fn public_base_url(mut self, url: impl Into<String>) -> Self {
        self.config.uploads.public_base_url = url.into();
        self
    }

    pub fn max_upload_bytes(mut self, max_bytes: usize) -> Self {
        self.config.uploads.max_bytes = max_bytes;
        self
    }

    pub fn max_upload_files(mut self, max_files: usize) -> Self {
        self.config.uploads.max_files = max_files;
        self
    }

    /// Build and validate the configuration
    pub fn build(self) -> Result<ServerConfig, ConfigError> {
        self.config.validate()?;
        Ok(self.config)
    }
}

/// Parse a lifetime such as `"900"`, `"15m"`, `"12h"`, `"1d"` or `"2w"`
pub fn parse_duration(value: &str) -> Result<Duration, ConfigError> {
    let trimmed = value.trim();
    let split = trimmed
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(trimmed.len());
    let (digits, unit) = trimmed.split_at(split);

    let amount: u64 = digits
        .parse()
        .map_err(|_| ConfigError::InvalidDuration(value.to_string()))?;
    let multiplier = match unit.trim() {
        "" | "s" => 1,
        "m" => 60,
        "h" => 60 * 60,
        "d" => 24 * 60 * 60,
        "w" => 7 * 24 * 60 * 60,
        _ => return Err(ConfigError::InvalidDuration(value.to_string())),
    };

    amount
        .checked_mul(multiplier)
        .map(Duration::from_secs)
        .ok_or_else(|| ConfigError::InvalidDuration(value.to_string()))
}

fn env_string(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn env_parse<T: FromStr>(key: &'static str) -> Result<Option<T>, ConfigError> {
    match env_string(key) {
        Some(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::InvalidValue { key, value }),
        None => Ok(None),
    }
}

/// Connect to PostgreSQL if `database_url` is configured
///
/// This function:
/// 1. Creates a PostgreSQL connection pool
/// 2. Runs database migrations
///
/// # Returns
///
/// - `Ok(Some(PgPool))` if the database is configured and reachable
/// - `Ok(None)` if no database URL is configured
///
/// # Errors
///
/// Connection failures are returned; migration failures are logged and the
/// server continues, since the schema may already be current.
pub async fn load_database(config: &ServerConfig) -> Result<Option<PgPool>, sqlx::Error> {
    let Some(database_url) = config.database_url.as_deref() else {
        tracing::warn!("DATABASE_URL not set. Using in-memory storage; data is lost on restart.");
        return Ok(None);
    };

    tracing::info!("Connecting to database...");

    let pool = PgPoolOptions::new()
        .max_connections(10)
        .acquire_timeout(Duration::from_secs(5))
        .connect(database_url)
        .await?;

    tracing::info!("Database connection pool created successfully");

    tracing::info!("Running database migrations...");
    match sqlx::migrate!().run(&pool).await {
        Ok(_) => tracing::info!("Database migrations completed successfully"),
        Err(e) => {
            tracing::error!("Failed to run database migrations: {}", e);
            tracing::warn!("Continuing without migrations - database might not be up to date");
        }
    }

    Ok(Some(pool))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn test_parse_duration() {
        assert_eq!(parse_duration("900").unwrap(), Duration::from_secs(900));
        assert_eq!(parse_duration("45s").unwrap(), Duration::from_secs(45));
        assert_eq!(parse_duration("15m").unwrap(), Duration::from_secs(900));
        assert_eq!(parse_duration("12h").unwrap(), Duration::from_secs(43_200));
        assert_eq!(parse_duration("1d").unwrap(), Duration::from_secs(86_400));
        assert_eq!(parse_duration("2w").unwrap(), Duration::from_secs(1_209_600));
    }

    #[test]
    fn test_parse_duration_rejects_garbage() {
        assert!(parse_duration("").is_err());
        assert!(parse_duration("d").is_err());
        assert!(parse_duration("10y").is_err());
        assert!(parse_duration("-5m").is_err());
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(ServerConfig::default().validate().is_ok());
    }

    #[test]
    fn test_identical_secrets_are_rejected() {
        let result = ServerConfig::builder().token_secrets("same", "same").build();
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_zero_lifetime_is_rejected() {
        let result = ServerConfig::builder().token_expiry("0s", "10d").build();
        assert!(result.is_err());
    }

    #[test]
    fn test_bcrypt_cost_range() {
        assert!(ServerConfig::builder().bcrypt_cost(3).build().is_err());
        assert!(ServerConfig::builder().bcrypt_cost(4).build().is_ok());
    }

    #[test]
    fn test_from_toml() {
        let config = ServerConfig::from_toml_str(
            r#"
            port = 8080
            cors_origin = "https://hub.example.com"

            [auth]
            access_token_expiry = "15m"

            [cloudinary]
            cloud_name = "demo"
            upload_preset = "unsigned"
            "#,
        )
        .unwrap();

        assert_eq!(config.port, 8080);
        assert_eq!(config.cors_origin, "https://hub.example.com");
        assert_eq!(config.auth.access_lifetime().unwrap(), Duration::from_secs(900));
        assert_eq!(config.auth.refresh_token_expiry, "10d");
        let cloudinary = config.cloudinary.unwrap();
        assert_eq!(cloudinary.api_base, DEFAULT_CLOUDINARY_API_BASE);
        assert_eq!(cloudinary.timeout_secs, DEFAULT_CLOUDINARY_TIMEOUT_SECS);
        assert_eq!(config.uploads.max_files, 50);
    }

    #[test]
    #[serial]
    fn test_env_overrides() {
        std::env::set_var("SERVER_PORT", "4100");
        std::env::set_var("ACCESS_TOKEN_EXPIRY", "2h");
        std::env::set_var("COOKIE_SECURE", "false");

        let mut config = ServerConfig::default();
        let result = config.apply_env();

        std::env::remove_var("SERVER_PORT");
        std::env::remove_var("ACCESS_TOKEN_EXPIRY");
        std::env::remove_var("COOKIE_SECURE");

        result.unwrap();
        assert_eq!(config.port, 4100);
        assert_eq!(config.auth.access_token_expiry, "2h");
        assert!(!config.auth.cookie_secure);
    }

    #[test]
    #[serial]
    fn test_invalid_env_value() {
        std::env::set_var("SERVER_PORT", "not-a-port");
        let result = ServerConfig::default().apply_env();
        std::env::remove_var("SERVER_PORT");

        assert!(matches!(
            result,
            Err(ConfigError::InvalidValue { key: "SERVER_PORT", .. })
        ));
    }
}
