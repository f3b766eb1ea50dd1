//! Usage event entity - one immutable row per tracked emoji occurrence

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// How an emoji was used
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum UsageKind {
    /// Emoji reaction on a message
    #[default]
    Reaction,
    /// Emoji token inside message text
    Message,
}

impl UsageKind {
    /// Database/wire representation
    #[inline]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Reaction => "reaction",
            Self::Message => "message",
        }
    }
}

impl From<&str> for UsageKind {
    fn from(value: &str) -> Self {
        match value {
            "message" => Self::Message,
            // Default for "reaction" and unknown values
            _ => Self::Reaction,
        }
    }
}

/// Leaderboard sort keys - a closed enumeration of the supported metrics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum LeaderboardSort {
    #[default]
    ReceivedScore,
    ReceivedCount,
    GivenScore,
    GivenCount,
}

impl LeaderboardSort {
    /// Parse a query-string value; unrecognized keys fall back to the default
    pub fn parse_or_default(value: &str) -> Self {
        match value {
            "received_count" => Self::ReceivedCount,
            "given_score" => Self::GivenScore,
            "given_count" => Self::GivenCount,
            _ => Self::ReceivedScore,
        }
    }

    /// Query-string representation
    #[inline]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ReceivedScore => "received_score",
            Self::ReceivedCount => "received_count",
            Self::GivenScore => "given_score",
            Self::GivenCount => "given_count",
        }
    }
}

/// Immutable usage event.
///
/// The score is the value the policy assigned at write time; changing the
/// policy later never rewrites history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UsageEvent {
    pub id: i64,
    pub user_id: i64,
    pub channel_id: Option<i64>,
    pub emoji_name: String,
    pub emoji_score: i32,
    pub usage_kind: UsageKind,
    pub message_ts: Option<String>,
    pub target_user_id: Option<i64>,
    pub created_at: DateTime<Utc>,
}
