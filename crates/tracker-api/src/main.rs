//! Stats API server entry point
//!
//! `cargo run -p tracker-api`. Configuration comes from the environment or
//! a `.env` file; `DATABASE_URL` is the only required variable.

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
        port = config.api.port,
        "Starting emoji tracker API server"
    );

    if let Err(e) = tracker_api::run(config).await {
        error!(error = %e, "Server exited with an error");
        std::process::exit(1);
    }
}
