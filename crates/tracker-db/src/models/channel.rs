//! Channel database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for channels table
#[derive(Debug, Clone, FromRow)]
pub struct ChannelModel {
    pub id: i64,
    pub slack_id: String,
    pub name: Option<String>,
    pub is_private: bool,
    pub is_archived: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
