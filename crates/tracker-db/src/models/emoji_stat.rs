//! Aggregate database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for the emoji_stats table
#[derive(Debug, Clone, FromRow)]
pub struct EmojiStatModel {
    pub id: i64,
    pub user_id: i64,
    pub emoji_name: String,
    pub given_count: i64,
    pub given_score: i64,
    pub received_count: i64,
    pub received_score: i64,
    pub first_used: Option<DateTime<Utc>>,
    pub last_used: Option<DateTime<Utc>>,
    pub updated_at: DateTime<Utc>,
}
