//! Event ingestion server entry point
//!
//! `cargo run -p tracker-ingest`, then point the Slack app's Events API
//! subscription at `http://<host>:<INGEST_PORT>/slack/events`.

use tracing::{error, info};

use tracker_common::{try_init_tracing, AppConfig};

#[tokio::main]
async fn main() {
    if let Err(e) = try_init_tracing() {
        eprintln!("Warning: Failed to initialize tracing: {e}");
    }

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "Failed to load configuration");
            std::process::exit(1);
        }
    };

    info!(
        env = ?config.app.env,
        port = config.ingest.port,
        sync_on_startup = config.sync.on_startup,
        "Starting emoji tracker ingest server"
    );

    if let Err(e) = tracker_ingest::run(config).await {
        error!(error = %e, "Server exited with an error");
        std::process::exit(1);
    }
}
