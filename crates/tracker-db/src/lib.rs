//! # tracker-db
//!
//! PostgreSQL implementations of the `tracker-core` repository traits:
//! connection pooling, `FromRow` models with entity mappers, the atomic
//! usage write path, aggregate read queries, and embedded SQL migrations.
//!
//! ```rust,ignore
//! use tracker_core::traits::UserRepository;
//! use tracker_db::pool::{create_pool, DatabaseConfig};
//! use tracker_db::PgUserRepository;
//!
//! async fn example(url: &str) -> Result<(), Box<dyn std::error::Error>> {
//!     let pool = create_pool(&DatabaseConfig::new(url)).await?;
//!     tracker_db::migrate(&pool).await?;
//!     let users = PgUserRepository::new(pool);
//!     // ...
//!     Ok(())
//! }
//! ```

pub mod mappers;
pub mod models;
pub mod pool;
pub mod repositories;

// Re-export commonly used types
pub use pool::{create_pool, DatabaseConfig, PgPool};
pub use repositories::{
    PgChannelRepository, PgStatsRepository, PgUsageRepository, PgUserRepository,
};

/// Run embedded migrations against a pool
pub async fn migrate(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}
