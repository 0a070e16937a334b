use std::env;

use thiserror::Error;

pub const DEFAULT_DATABASE_URL: &str = "sqlite://produkty.db?mode=rwc";
pub const DEFAULT_JOKE_API_URL: &str = "https://api.chucknorris.io/jokes/random";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing configuration: {0}")]
    Missing(&'static str),

    #[error("invalid value for {0}: {1}")]
    Invalid(&'static str, String),
}

/// Application configuration, built once in `main` and injected through
/// [`crate::AppState`]. Nothing reads the environment after startup.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub security: SecurityConfig,
    pub joke: JokeConfig,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub port: u16,
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

#[derive(Debug, Clone)]
pub struct SecurityConfig {
    /// HS256 signing secret for bearer tokens. Required; there is no
    /// fallback literal.
    pub jwt_secret: String,
    /// Token lifetime in hours. When unset, issued tokens carry no expiry.
    pub token_expiry_hours: Option<u64>,
}

#[derive(Debug, Clone)]
pub struct JokeConfig {
    pub api_url: String,
    pub timeout_secs: u64,
}

impl AppConfig {
    /// Build the configuration from the process environment.
    ///
    /// A missing or empty `JWT_SECRET` is an error: refusing to start beats
    /// signing tokens with a well-known default.
    pub fn from_env() -> Result<Self, ConfigError> {
        let jwt_secret = optional("JWT_SECRET").ok_or(ConfigError::Missing("JWT_SECRET"))?;

        Ok(Self {
            server: ServerConfig {
                port: parsed("PORT")?.unwrap_or(3000),
            },
            database: DatabaseConfig {
                url: optional("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string()),
                max_connections: parsed("DATABASE_MAX_CONNECTIONS")?.unwrap_or(5),
            },
            security: SecurityConfig {
                jwt_secret,
                token_expiry_hours: parsed("TOKEN_EXPIRY_HOURS")?,
            },
            joke: JokeConfig {
                api_url: optional("JOKE_API_URL").unwrap_or_else(|| DEFAULT_JOKE_API_URL.to_string()),
                timeout_secs: parsed("JOKE_TIMEOUT_SECS")?.unwrap_or(5),
            },
        })
    }
}

fn optional(key: &'static str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.is_empty())
}

fn parsed<T: std::str::FromStr>(key: &'static str) -> Result<Option<T>, ConfigError> {
    match optional(key) {
        Some(value) => value
            .parse::<T>()
            .map(Some)
            .map_err(|_| ConfigError::Invalid(key, value)),
        None => Ok(None),
    }
}
