//! # tracker-api
//!
//! REST read API built with the Axum framework: statistics, leaderboards,
//! history, and the emoji policy. The write path lives in tracker-ingest.

pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod response;
pub mod routes;
pub mod server;
pub mod state;

pub use server::{create_app, create_app_state, run, run_server};
pub use state::AppState;
