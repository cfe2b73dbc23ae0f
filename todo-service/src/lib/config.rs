use std::env;

use auth::IssuerSettings;
use auth::TokenPolicy;
use chrono::Duration;
use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;

const MIN_SECRET_BYTES: usize = 16;
const MAX_LIFETIME_DAYS: i64 = 3650;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub jwt: JwtConfig,
    #[serde(default)]
    pub cors: CorsConfig,
    #[serde(default)]
    pub storage: StorageConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

fn default_max_connections() -> u32 {
    5
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub http_port: u16,
}

/// Signing secrets and lifetimes for the three token kinds.
#[derive(Deserialize, Clone)]
pub struct JwtConfig {
    pub access_secret: String,
    #[serde(default = "default_access_minutes")]
    pub access_expiration_minutes: i64,
    pub refresh_secret: String,
    #[serde(default = "default_refresh_days")]
    pub refresh_expiration_days: i64,
    pub remember_secret: String,
    #[serde(default = "default_remember_days")]
    pub remember_expiration_days: i64,
}

fn default_access_minutes() -> i64 {
    15
}

fn default_refresh_days() -> i64 {
    7
}

fn default_remember_days() -> i64 {
    30
}

impl std::fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtConfig")
            .field("access_expiration_minutes", &self.access_expiration_minutes)
            .field("refresh_expiration_days", &self.refresh_expiration_days)
            .field("remember_expiration_days", &self.remember_expiration_days)
            .finish_non_exhaustive()
    }
}

impl JwtConfig {
    /// Build issuer settings.
    ///
    /// Rejects secrets shorter than 16 bytes and lifetimes outside one unit
    /// to ten years.
    pub fn issuer_settings(&self) -> Result<IssuerSettings, ConfigError> {
        for (key, secret) in [
            ("jwt.access_secret", &self.access_secret),
            ("jwt.refresh_secret", &self.refresh_secret),
            ("jwt.remember_secret", &self.remember_secret),
        ] {
            if secret.len() < MIN_SECRET_BYTES {
                return Err(ConfigError::Message(format!(
                    "{} must be at least {} bytes",
                    key, MIN_SECRET_BYTES
                )));
            }
        }

        let access_minutes = bounded(
            "jwt.access_expiration_minutes",
            self.access_expiration_minutes,
            MAX_LIFETIME_DAYS * 24 * 60,
        )?;
        let refresh_days = bounded(
            "jwt.refresh_expiration_days",
            self.refresh_expiration_days,
            MAX_LIFETIME_DAYS,
        )?;
        let remember_days = bounded(
            "jwt.remember_expiration_days",
            self.remember_expiration_days,
            MAX_LIFETIME_DAYS,
        )?;

        Ok(IssuerSettings {
            access: TokenPolicy::new(&self.access_secret, Duration::minutes(access_minutes)),
            standard_refresh: TokenPolicy::new(&self.refresh_secret, Duration::days(refresh_days)),
            extended_refresh: TokenPolicy::new(
                &self.remember_secret,
                Duration::days(remember_days),
            ),
        })
    }
}

fn bounded(key: &str, value: i64, max: i64) -> Result<i64, ConfigError> {
    if (1..=max).contains(&value) {
        Ok(value)
    } else {
        Err(ConfigError::Message(format!(
            "{} must be between 1 and {}, got {}",
            key, max, value
        )))
    }
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct CorsConfig {
    /// Allowed origins. Empty allows any origin.
    #[serde(default)]
    pub origins: Vec<String>,
}

#[derive(Debug, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    #[default]
    Postgres,
    Memory,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct StorageConfig {
    #[serde(default)]
    pub backend: StorageBackend,
}

impl Config {
    /// Load configuration from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (DATABASE__URL, JWT__ACCESS_SECRET, etc.)
    /// 2. Environment-specific config file (config/{environment}.toml)
    /// 3. Default config file (config/default.toml)
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let configuration = ConfigBuilder::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Example: JWT__ACCESS_SECRET=... overrides jwt.access_secret
            .add_source(
                Environment::default()
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("cors.origins")
                    .try_parsing(true),
            )
            .build()?;

        configuration.try_deserialize()
    }
}
