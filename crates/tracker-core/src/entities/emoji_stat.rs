//! Aggregate entity - running per-(user, emoji) counters

use chrono::{DateTime, Utc};

/// Incremental fold over all usage events for one (user, emoji) pair.
///
/// Scores may vary per occurrence when the policy changes over time, so only
/// the sums are authoritative; `given_score == score * given_count` does not
/// hold in general.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmojiStat {
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
