//! Test helpers for integration tests
//!
//! Provides utilities for spawning test servers, making HTTP requests,
//! and asserting on responses.

use std::net::SocketAddr;
use std::time::Duration;

use anyhow::{bail, Result};
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

use tracker_api::{create_app, create_app_state};
use tracker_common::AppConfig;

/// Check that the test environment is usable (DATABASE_URL set and
/// reachable). Tests return early when it is not, so the suite passes on
/// machines without a database.
pub async fn check_test_env() -> bool {
    let Ok(url) = std::env::var("DATABASE_URL") else {
        return false;
    };
    sqlx_connect_ok(&url).await
}

async fn sqlx_connect_ok(url: &str) -> bool {
    tracker_db::PgPool::connect(url).await.is_ok()
}

/// Test server instance that manages lifecycle
pub struct TestServer {
    pub addr: SocketAddr,
    pub client: Client,
    _handle: JoinHandle<()>,
}

impl TestServer {
    /// Start a new test server
    pub async fn start() -> Result<Self> {
        let config = test_config()?;
        Self::start_with_config(config).await
    }

    /// Start a test server with custom config
    pub async fn start_with_config(config: AppConfig) -> Result<Self> {
        // Create app state
        let state = create_app_state(config).await?;

        // Build application
        let app = create_app(state);

        // Bind an ephemeral port
        let listener = TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0))).await?;
        let addr = listener.local_addr()?;

        // Spawn server task
        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        // Wait for server to be ready
        tokio::time::sleep(Duration::from_millis(100)).await;

        // Create HTTP client
        let client = Client::builder().timeout(Duration::from_secs(10)).build()?;

        Ok(Self {
            addr,
            client,
            _handle: handle,
        })
    }

    /// Get base URL for the server
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Make a GET request
    pub async fn get(&self, path: &str) -> Result<Response> {
        let response = self
            .client
            .get(format!("{}{}", self.base_url(), path))
            .send()
            .await?;
        Ok(response)
    }
}

/// Build a test configuration from the environment
pub fn test_config() -> Result<AppConfig> {
    let mut config = AppConfig::from_env()?;
    // Generous rate limit so parallel tests never trip it
    config.rate_limit.requests_per_second = 10_000;
    config.rate_limit.burst = 10_000;
    // No directory calls from tests
    config.slack.bot_token = None;
    Ok(config)
}

/// Assert a response has the expected status
pub async fn assert_status(response: Response, expected: StatusCode) -> Result<()> {
    let status = response.status();
    if status != expected {
        let body = response.text().await.unwrap_or_default();
        bail!("expected status {expected}, got {status}: {body}");
    }
    Ok(())
}

/// Assert a response has the expected status and parse its JSON body
pub async fn assert_json<T: DeserializeOwned>(
    response: Response,
    expected: StatusCode,
) -> Result<T> {
    let status = response.status();
    let body = response.text().await?;
    if status != expected {
        bail!("expected status {expected}, got {status}: {body}");
    }
    Ok(serde_json::from_str(&body)?)
}
