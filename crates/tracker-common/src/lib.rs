//! # tracker-common
//!
//! Shared utilities including configuration, error handling, and telemetry.

pub mod config;
pub mod error;
pub mod telemetry;

// Re-export commonly used types at crate root
pub use config::{
    load_emoji_policy, AppConfig, AppSettings, ConfigError, CorsConfig, DatabaseConfig,
    Environment, RateLimitConfig, ServerConfig, SlackConfig, SyncConfig,
};
pub use error::{AppError, AppResult};
pub use telemetry::{
    init_tracing, init_tracing_with_config, try_init_tracing, try_init_tracing_with_config,
    TracingConfig, TracingError,
};
