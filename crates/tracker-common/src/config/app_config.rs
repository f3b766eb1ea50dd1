//! Application configuration structs
//!
//! Loads configuration from environment variables and config files.

use serde::Deserialize;
use std::env;

/// Main application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub app: AppSettings,
    pub api: ServerConfig,
    pub ingest: ServerConfig,
    pub database: DatabaseConfig,
    pub slack: SlackConfig,
    pub sync: SyncConfig,
    pub rate_limit: RateLimitConfig,
    pub cors: CorsConfig,
    /// Path to the declarative emoji policy file
    #[serde(default = "default_emoji_config_path")]
    pub emoji_config_path: String,
}

/// General application settings
#[derive(Debug, Clone, Deserialize)]
pub struct AppSettings {
    #[serde(default = "default_app_name")]
    pub name: String,
    #[serde(default = "default_env")]
    pub env: Environment,
}

/// Environment type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl Environment {
    #[must_use]
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }

    #[must_use]
    pub fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }
}

/// Server configuration (for both the API and ingest binaries)
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    #[must_use]
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Database configuration
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
}

/// Slack integration configuration.
///
/// The bot token is optional: without it the directory client is disabled and
/// identities are created from event fields alone.
#[derive(Debug, Clone, Deserialize)]
pub struct SlackConfig {
    #[serde(default)]
    pub bot_token: Option<String>,
    /// Legacy verification token checked on inbound event callbacks, if set
    #[serde(default)]
    pub verification_token: Option<String>,
}

impl SlackConfig {
    #[must_use]
    pub fn has_token(&self) -> bool {
        self.bot_token.as_deref().is_some_and(|t| !t.is_empty())
    }
}

/// Directory synchronization configuration
#[derive(Debug, Clone, Deserialize)]
pub struct SyncConfig {
    /// Run a full user/channel sync when the ingest binary starts
    #[serde(default)]
    pub on_startup: bool,
    /// Upper bound on synced records per run
    #[serde(default = "default_sync_limit")]
    pub limit: u32,
}

/// Rate limiting configuration
#[derive(Debug, Clone, Deserialize)]
pub struct RateLimitConfig {
    #[serde(default = "default_requests_per_second")]
    pub requests_per_second: u32,
    #[serde(default = "default_burst")]
    pub burst: u32,
}

/// CORS configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CorsConfig {
    #[serde(default)]
    pub allowed_origins: Vec<String>,
}

// Default value functions
fn default_app_name() -> String {
    "emoji-tracker".to_string()
}

fn default_env() -> Environment {
    Environment::Development
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_max_connections() -> u32 {
    20
}

fn default_min_connections() -> u32 {
    5
}

fn default_sync_limit() -> u32 {
    1000
}

fn default_requests_per_second() -> u32 {
    10
}

fn default_burst() -> u32 {
    50
}

fn default_emoji_config_path() -> String {
    "config/emoji_config.json".to_string()
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    /// Returns an error if required environment variables are missing
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Ok(Self {
            app: AppSettings {
                name: env::var("APP_NAME").unwrap_or_else(|_| default_app_name()),
                env: env::var("APP_ENV")
                    .ok()
                    .and_then(|s| match s.to_lowercase().as_str() {
                        "production" => Some(Environment::Production),
                        "staging" => Some(Environment::Staging),
                        "development" => Some(Environment::Development),
                        _ => None,
                    })
                    .unwrap_or_default(),
            },
            api: ServerConfig {
                host: env::var("API_HOST").unwrap_or_else(|_| default_host()),
                port: env::var("API_PORT")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(8000),
            },
            ingest: ServerConfig {
                host: env::var("INGEST_HOST").unwrap_or_else(|_| default_host()),
                port: env::var("INGEST_PORT")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(8001),
            },
            database: DatabaseConfig {
                url: env::var("DATABASE_URL").map_err(|_| ConfigError::MissingVar("DATABASE_URL"))?,
                max_connections: env::var("DATABASE_MAX_CONNECTIONS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or_else(default_max_connections),
                min_connections: env::var("DATABASE_MIN_CONNECTIONS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or_else(default_min_connections),
            },
            slack: SlackConfig {
                bot_token: env::var("SLACK_BOT_TOKEN").ok().filter(|t| !t.is_empty()),
                verification_token: env::var("SLACK_VERIFICATION_TOKEN")
                    .ok()
                    .filter(|t| !t.is_empty()),
            },
            sync: SyncConfig {
                on_startup: env::var("SYNC_ON_STARTUP")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(false),
                limit: env::var("SYNC_LIMIT")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or_else(default_sync_limit),
            },
            rate_limit: RateLimitConfig {
                requests_per_second: env::var("RATE_LIMIT_REQUESTS_PER_SECOND")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or_else(default_requests_per_second),
                burst: env::var("RATE_LIMIT_BURST")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or_else(default_burst),
            },
            cors: CorsConfig {
                allowed_origins: env::var("CORS_ALLOWED_ORIGINS")
                    .ok()
                    .map(|s| s.split(',').map(str::trim).map(String::from).collect())
                    .unwrap_or_default(),
            },
            emoji_config_path: env::var("EMOJI_CONFIG_PATH")
                .unwrap_or_else(|_| default_emoji_config_path()),
        })
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(&'static str),

    #[error("Invalid value for {0}: {1}")]
    InvalidValue(&'static str, String),

    #[error("Failed to read {path}: {source}")]
    UnreadableFile {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {path}: {source}")]
    MalformedFile {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_environment_is_production() {
        assert!(!Environment::Development.is_production());
        assert!(!Environment::Staging.is_production());
        assert!(Environment::Production.is_production());
    }

    #[test]
    fn test_server_address() {
        let config = ServerConfig {
            host: "0.0.0.0".to_string(),
            port: 8000,
        };
        assert_eq!(config.address(), "0.0.0.0:8000");
    }

    #[test]
    fn test_slack_config_token_presence() {
        let config = SlackConfig {
            bot_token: Some("xoxb-test".to_string()),
            verification_token: None,
        };
        assert!(config.has_token());

        let config = SlackConfig {
            bot_token: None,
            verification_token: None,
        };
        assert!(!config.has_token());
    }

    #[test]
    fn test_default_values() {
        assert_eq!(default_app_name(), "emoji-tracker");
        assert_eq!(default_host(), "127.0.0.1");
        assert_eq!(default_max_connections(), 20);
        assert_eq!(default_sync_limit(), 1000);
    }
}
