//! Response DTOs for API endpoints
//!
//! All response DTOs implement `Serialize` for JSON output.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::Serialize;

use tracker_core::entities::{Channel, UsageEvent, UsageKind, User};
use tracker_core::policy::{EmojiSpec, PolicySettings};
use tracker_core::traits::{EmojiTally, UsageTotals};

// ============================================================================
// User Responses
// ============================================================================

/// Basic user identification block embedded in stats responses
#[derive(Debug, Clone, Serialize)]
pub struct UserInfo {
    pub slack_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub real_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl From<&User> for UserInfo {
    fn from(user: &User) -> Self {
        Self {
            slack_id: user.slack_id.clone(),
            display_name: user.display_name.clone(),
            real_name: user.real_name.clone(),
            email: user.email.clone(),
        }
    }
}

/// Entry in the user listing endpoint
#[derive(Debug, Clone, Serialize)]
pub struct UserListEntry {
    pub slack_id: String,
    pub display_name: Option<String>,
    pub real_name: Option<String>,
    pub email: Option<String>,
    pub is_bot: bool,
}

impl From<&User> for UserListEntry {
    fn from(user: &User) -> Self {
        Self {
            slack_id: user.slack_id.clone(),
            display_name: user.display_name.clone(),
            real_name: user.real_name.clone(),
            email: user.email.clone(),
            is_bot: user.is_bot,
        }
    }
}

// ============================================================================
// Stats Responses
// ============================================================================

/// Summed counters block
#[derive(Debug, Clone, Copy, Serialize)]
pub struct TotalsInfo {
    pub given_count: i64,
    pub given_score: i64,
    pub received_count: i64,
    pub received_score: i64,
}

impl From<UsageTotals> for TotalsInfo {
    fn from(totals: UsageTotals) -> Self {
        Self {
            given_count: totals.given_count,
            given_score: totals.given_score,
            received_count: totals.received_count,
            received_score: totals.received_score,
        }
    }
}

/// Per-emoji count/score block used in "top" listings
#[derive(Debug, Clone, Serialize)]
pub struct EmojiStatsEntry {
    pub emoji: String,
    pub count: i64,
    pub score: i64,
}

impl From<EmojiTally> for EmojiStatsEntry {
    fn from(tally: EmojiTally) -> Self {
        Self {
            emoji: tally.emoji,
            count: tally.count,
            score: tally.score,
        }
    }
}

/// User statistics response
#[derive(Debug, Clone, Serialize)]
pub struct UserStatsResponse {
    pub user: UserInfo,
    pub totals: TotalsInfo,
    pub top_given: Vec<EmojiStatsEntry>,
    pub top_received: Vec<EmojiStatsEntry>,
}

/// One leaderboard row
#[derive(Debug, Clone, Serialize)]
pub struct LeaderboardEntry {
    pub rank: i64,
    pub user: UserInfo,
    pub stats: TotalsInfo,
}

/// Leaderboard response
#[derive(Debug, Clone, Serialize)]
pub struct LeaderboardResponse {
    pub entries: Vec<LeaderboardEntry>,
    pub sort_by: String,
    pub total_users: usize,
}

// ============================================================================
// History Responses
// ============================================================================

/// One usage occurrence in a history page
#[derive(Debug, Clone, Serialize)]
pub struct HistoryEntry {
    pub emoji: String,
    pub score: i32,
    #[serde(rename = "type")]
    pub kind: UsageKind,
    pub timestamp: DateTime<Utc>,
}

impl From<UsageEvent> for HistoryEntry {
    fn from(event: UsageEvent) -> Self {
        Self {
            emoji: event.emoji_name,
            score: event.emoji_score,
            kind: event.usage_kind,
            timestamp: event.created_at,
        }
    }
}

/// Offset-based pagination metadata
#[derive(Debug, Clone, Copy, Serialize)]
pub struct PaginationInfo {
    pub total: i64,
    pub limit: i64,
    pub offset: i64,
    pub has_more: bool,
}

/// User history response
#[derive(Debug, Clone, Serialize)]
pub struct UserHistoryResponse {
    pub user: UserInfo,
    pub history: Vec<HistoryEntry>,
    pub pagination: PaginationInfo,
}

// ============================================================================
// Channel Responses
// ============================================================================

/// Basic channel identification block
#[derive(Debug, Clone, Serialize)]
pub struct ChannelInfo {
    pub slack_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub is_private: bool,
}

impl From<&Channel> for ChannelInfo {
    fn from(channel: &Channel) -> Self {
        Self {
            slack_id: channel.slack_id.clone(),
            name: channel.name.clone(),
            is_private: channel.is_private,
        }
    }
}

/// Entry in the channel listing endpoint
#[derive(Debug, Clone, Serialize)]
pub struct ChannelListEntry {
    pub slack_id: String,
    pub name: Option<String>,
    pub is_private: bool,
    pub is_archived: bool,
}

impl From<&Channel> for ChannelListEntry {
    fn from(channel: &Channel) -> Self {
        Self {
            slack_id: channel.slack_id.clone(),
            name: channel.name.clone(),
            is_private: channel.is_private,
            is_archived: channel.is_archived,
        }
    }
}

/// Occurrence totals block for a channel
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ChannelTotalsInfo {
    pub total_count: i64,
    pub total_score: i64,
}

/// Per-user tally within a channel
#[derive(Debug, Clone, Serialize)]
pub struct ChannelUserStats {
    pub user: UserInfo,
    pub count: i64,
    pub score: i64,
}

/// Channel statistics response
#[derive(Debug, Clone, Serialize)]
pub struct ChannelStatsResponse {
    pub channel: ChannelInfo,
    pub totals: ChannelTotalsInfo,
    pub top_emojis: Vec<EmojiStatsEntry>,
    pub top_users: Vec<ChannelUserStats>,
}

// ============================================================================
// Global Stats / Config Responses
// ============================================================================

/// Workspace-wide totals block
#[derive(Debug, Clone, Copy, Serialize)]
pub struct GlobalTotalsInfo {
    pub total_usage: i64,
    pub total_score: i64,
    pub unique_emojis: i64,
    pub active_users: i64,
    pub active_channels: i64,
}

/// Global statistics response
#[derive(Debug, Clone, Serialize)]
pub struct GlobalStatsResponse {
    pub totals: GlobalTotalsInfo,
    pub top_emojis: Vec<EmojiStatsEntry>,
}

/// Emoji policy configuration response
#[derive(Debug, Clone, Serialize)]
pub struct EmojiConfigResponse {
    pub emojis: HashMap<String, EmojiSpec>,
    pub settings: PolicySettings,
}

// ============================================================================
// Health Responses
// ============================================================================

/// Health check response
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub database: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slack: Option<bool>,
    pub timestamp: DateTime<Utc>,
}

impl HealthResponse {
    /// Build a health response from dependency checks
    pub fn from_checks(database: bool, slack: Option<bool>) -> Self {
        let status = if !database {
            "unhealthy"
        } else if slack == Some(false) {
            "degraded"
        } else {
            "healthy"
        };
        Self {
            status,
            database,
            slack,
            timestamp: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_status_derivation() {
        assert_eq!(HealthResponse::from_checks(true, None).status, "healthy");
        assert_eq!(
            HealthResponse::from_checks(true, Some(true)).status,
            "healthy"
        );
        assert_eq!(
            HealthResponse::from_checks(true, Some(false)).status,
            "degraded"
        );
        assert_eq!(
            HealthResponse::from_checks(false, None).status,
            "unhealthy"
        );
    }

    #[test]
    fn test_history_entry_kind_serializes_as_type() {
        let entry = HistoryEntry {
            emoji: "fire".to_string(),
            score: 2,
            kind: UsageKind::Message,
            timestamp: Utc::now(),
        };
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["type"], "message");
        assert_eq!(json["emoji"], "fire");
    }
}
