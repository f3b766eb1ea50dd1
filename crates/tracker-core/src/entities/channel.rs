//! Channel entity - represents a conversation context

use chrono::{DateTime, Utc};

/// Channel entity keyed by the stable Slack identifier
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Channel {
    pub id: i64,
    pub slack_id: String,
    pub name: Option<String>,
    pub is_private: bool,
    pub is_archived: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields supplied to a channel upsert; `None` never overwrites
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChannelPatch {
    pub slack_id: String,
    pub name: Option<String>,
    pub is_private: Option<bool>,
    pub is_archived: Option<bool>,
}

impl ChannelPatch {
    /// Patch carrying only the external identifier
    pub fn bare(slack_id: impl Into<String>) -> Self {
        Self {
            slack_id: slack_id.into(),
            ..Self::default()
        }
    }
}
