//! PostgreSQL repository implementations

mod channel;
mod error;
mod stats;
mod usage;
mod user;

pub use channel::PgChannelRepository;
pub use stats::PgStatsRepository;
pub use usage::PgUsageRepository;
pub use user::PgUserRepository;

pub(crate) use channel::upsert_channel_on;
pub(crate) use user::upsert_user_on;
