//! # tracker-ingest
//!
//! Event ingestion server: receives Slack Events API callbacks over HTTP,
//! normalizes them, and drives the usage recorder. The read API lives in
//! tracker-api.

pub mod handlers;
pub mod server;
pub mod state;

pub use server::{create_app, create_app_state, run};
pub use state::IngestState;
