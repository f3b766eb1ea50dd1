//! Configuration structs and the emoji policy resource loader

mod app_config;
mod emoji_file;

pub use app_config::{
    AppConfig, AppSettings, ConfigError, CorsConfig, DatabaseConfig, Environment,
    RateLimitConfig, ServerConfig, SlackConfig, SyncConfig,
};
pub use emoji_file::load_emoji_policy;
