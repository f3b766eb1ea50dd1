//! Tracing subscriber setup
//!
//! One fmt layer on top of an env filter. `RUST_LOG` wins when set;
//! otherwise the configured level applies. Production deployments emit
//! JSON lines, development gets the pretty format.

use tracing::Level;
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

/// Knobs for the fmt layer
#[derive(Debug, Clone)]
pub struct TracingConfig {
    /// Fallback level when `RUST_LOG` is not set
    pub level: Level,
    /// Emit JSON lines instead of the pretty format
    pub json: bool,
    /// Emit span open/close events
    pub span_events: bool,
    /// Annotate events with file and line
    pub file_line: bool,
    /// Annotate events with the thread name
    pub thread_names: bool,
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self {
            level: Level::INFO,
            json: false,
            span_events: false,
            file_line: true,
            thread_names: false,
        }
    }
}

impl TracingConfig {
    /// Verbose pretty output for local development
    pub fn development() -> Self {
        Self {
            level: Level::DEBUG,
            span_events: true,
            thread_names: true,
            ..Self::default()
        }
    }

    /// JSON lines for log aggregation
    pub fn production() -> Self {
        Self {
            json: true,
            file_line: false,
            ..Self::default()
        }
    }

    fn fmt_span(&self) -> FmtSpan {
        if self.span_events {
            FmtSpan::NEW | FmtSpan::CLOSE
        } else {
            FmtSpan::NONE
        }
    }

    fn env_filter(&self) -> EnvFilter {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(self.level.to_string()))
    }
}

/// Install the subscriber with default configuration.
///
/// # Panics
/// Panics if a subscriber is already installed; use [`try_init_tracing`]
/// when that is a possibility (tests, embedded use).
pub fn init_tracing() {
    init_tracing_with_config(TracingConfig::default());
}

/// Install the subscriber with the given configuration.
///
/// # Panics
/// Panics if a subscriber is already installed.
pub fn init_tracing_with_config(config: TracingConfig) {
    try_init_tracing_with_config(config).expect("tracing subscriber already installed");
}

/// Install the subscriber with default configuration, reporting instead of
/// panicking when one is already installed.
pub fn try_init_tracing() -> Result<(), TracingError> {
    try_init_tracing_with_config(TracingConfig::default())
}

/// Install the subscriber with the given configuration, reporting instead
/// of panicking when one is already installed.
pub fn try_init_tracing_with_config(config: TracingConfig) -> Result<(), TracingError> {
    let registry = tracing_subscriber::registry().with(config.env_filter());

    let result = if config.json {
        registry
            .with(
                fmt::layer()
                    .json()
                    .with_file(config.file_line)
                    .with_line_number(config.file_line)
                    .with_thread_names(config.thread_names)
                    .with_span_events(config.fmt_span()),
            )
            .try_init()
    } else {
        registry
            .with(
                fmt::layer()
                    .with_file(config.file_line)
                    .with_line_number(config.file_line)
                    .with_thread_names(config.thread_names)
                    .with_span_events(config.fmt_span()),
            )
            .try_init()
    };

    result.map_err(|_| TracingError::AlreadyInitialized)
}

/// Tracing initialization errors
#[derive(Debug, thiserror::Error)]
pub enum TracingError {
    #[error("Tracing subscriber already initialized")]
    AlreadyInitialized,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = TracingConfig::default();
        assert_eq!(config.level, Level::INFO);
        assert!(!config.json);
        assert!(!config.span_events);
        assert!(config.file_line);
    }

    #[test]
    fn test_profiles() {
        assert!(TracingConfig::production().json);
        assert!(!TracingConfig::production().file_line);
        assert_eq!(TracingConfig::development().level, Level::DEBUG);
    }

    #[test]
    fn test_try_init_twice_reports_already_initialized() {
        // First call may or may not win depending on test ordering; the
        // second is guaranteed to find a subscriber installed.
        let _ = try_init_tracing();
        assert!(matches!(
            try_init_tracing(),
            Err(TracingError::AlreadyInitialized)
        ));
    }
}
