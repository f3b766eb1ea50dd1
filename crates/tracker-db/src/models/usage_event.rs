//! Usage event database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for the emoji_usage table
#[derive(Debug, Clone, FromRow)]
pub struct EmojiUsageModel {
    pub id: i64,
    pub user_id: i64,
    pub channel_id: Option<i64>,
    pub emoji_name: String,
    pub emoji_score: i32,
    pub usage_kind: String,
    pub message_ts: Option<String>,
    pub target_user_id: Option<i64>,
    pub created_at: DateTime<Utc>,
}
