//! Database models - SQLx-compatible structs for PostgreSQL tables

mod channel;
mod emoji_stat;
mod projections;
mod usage_event;
mod user;

pub use channel::ChannelModel;
pub use emoji_stat::EmojiStatModel;
pub use projections::{
    ChannelTotalsModel, EmojiTallyModel, GlobalTotalsModel, LeaderboardRowModel, UsageTotalsModel,
    UserTallyModel,
};
pub use usage_event::EmojiUsageModel;
pub use user::UserModel;
