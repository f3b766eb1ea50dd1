//! Projection models for aggregate queries
//!
//! These are not table-backed; they decode the result shapes of GROUP BY /
//! SUM queries in the stats repository.

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Summed counters for one user across all emojis
#[derive(Debug, Clone, FromRow)]
pub struct UsageTotalsModel {
    pub given_count: i64,
    pub given_score: i64,
    pub received_count: i64,
    pub received_score: i64,
}

/// Per-emoji count/score aggregation row
#[derive(Debug, Clone, FromRow)]
pub struct EmojiTallyModel {
    pub emoji_name: String,
    pub count: i64,
    pub score: i64,
}

/// Leaderboard row: user columns plus summed counters
#[derive(Debug, Clone, FromRow)]
pub struct LeaderboardRowModel {
    pub id: i64,
    pub slack_id: String,
    pub email: Option<String>,
    pub display_name: Option<String>,
    pub real_name: Option<String>,
    pub is_bot: bool,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub given_count: i64,
    pub given_score: i64,
    pub received_count: i64,
    pub received_score: i64,
}

/// Per-user tally within one channel
#[derive(Debug, Clone, FromRow)]
pub struct UserTallyModel {
    pub id: i64,
    pub slack_id: String,
    pub email: Option<String>,
    pub display_name: Option<String>,
    pub real_name: Option<String>,
    pub is_bot: bool,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub count: i64,
    pub score: i64,
}

/// Occurrence totals within one channel
#[derive(Debug, Clone, FromRow)]
pub struct ChannelTotalsModel {
    pub total_count: i64,
    pub total_score: i64,
}

/// Workspace-wide usage totals
#[derive(Debug, Clone, FromRow)]
pub struct GlobalTotalsModel {
    pub total_usage: i64,
    pub total_score: i64,
    pub unique_emojis: i64,
}
