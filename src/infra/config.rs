//! Environment-derived configuration.
//!
//! All configuration is gathered once at startup and passed into handlers
//! through [`crate::AppState`]; nothing reads the environment after boot.

use thiserror::Error;

pub const DEFAULT_TELEGRAM_API_BASE: &str = "https://api.telegram.org";
pub const DEFAULT_SERVER_HOST: &str = "0.0.0.0";
pub const DEFAULT_SERVER_PORT: u16 = 8080;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    MissingVar(&'static str),

    #[error("invalid value for {name}: {message}")]
    Invalid { name: &'static str, message: String },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub telegram: TelegramConfig,
    pub database: DatabaseConfig,
    pub access: AccessConfig,
    /// Base URL embedded in retrieval links sent back to uploaders.
    pub public_base_url: String,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone)]
pub struct TelegramConfig {
    pub bot_token: String,
    /// Bot API base; overridable for self-hosted API servers and tests.
    pub api_base: String,
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
}

#[derive(Debug, Clone)]
pub struct AccessConfig {
    /// Group chat ids (decimal string form) allowed to use the bot outside
    /// of private chats. Empty means private chats only.
    pub allowed_group_ids: Vec<String>,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let bot_token = required_var("BOT_TOKEN")?;
        let database_url = required_var("DATABASE_URL")?;
        let public_base_url = required_var("PUBLIC_BASE_URL")?
            .trim_end_matches('/')
            .to_string();

        let api_base = std::env::var("TELEGRAM_API_BASE")
            .map(|raw| raw.trim_end_matches('/').to_string())
            .unwrap_or_else(|_| DEFAULT_TELEGRAM_API_BASE.to_string());

        let host = std::env::var("SERVER_HOST")
            .unwrap_or_else(|_| DEFAULT_SERVER_HOST.to_string());
        let port = match std::env::var("SERVER_PORT") {
            Ok(raw) => raw.parse().map_err(|_| ConfigError::Invalid {
                name: "SERVER_PORT",
                message: format!("`{raw}` is not a valid port number"),
            })?,
            Err(_) => DEFAULT_SERVER_PORT,
        };

        let allowed_group_ids = std::env::var("ALLOWED_GROUP_IDS")
            .map(|raw| split_csv(&raw))
            .unwrap_or_default();

        Ok(Self {
            server: ServerConfig { host, port },
            telegram: TelegramConfig {
                bot_token,
                api_base,
            },
            database: DatabaseConfig { url: database_url },
            access: AccessConfig { allowed_group_ids },
            public_base_url,
        })
    }
}

fn required_var(name: &'static str) -> Result<String, ConfigError> {
    match std::env::var(name) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(ConfigError::MissingVar(name)),
    }
}

/// Split a comma-separated variable into trimmed, non-empty entries.
pub fn split_csv(raw: &str) -> Vec<String> {
    raw.split(',')
        .filter_map(|part| {
            let trimmed = part.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        })
        .collect()
}
