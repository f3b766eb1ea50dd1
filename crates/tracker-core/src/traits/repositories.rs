//! Repository traits (ports) - define the interface for data access
//!
//! The domain layer defines what it needs, and the infrastructure layer
//! provides the implementation.

use async_trait::async_trait;

use crate::entities::{
    Channel, ChannelPatch, EmojiStat, LeaderboardSort, UsageEvent, UsageKind, User, UserPatch,
};
use crate::error::DomainError;

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// User Repository
// ============================================================================

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert-or-update by slack_id; `None` patch fields leave stored values
    /// untouched. Safe to call concurrently for the same slack_id.
    async fn upsert(&self, patch: &UserPatch) -> RepoResult<User>;

    /// Find user by external identifier
    async fn find_by_slack_id(&self, slack_id: &str) -> RepoResult<Option<User>>;

    /// List active users, ordered by id
    async fn list_active(&self, limit: i64, offset: i64) -> RepoResult<Vec<User>>;

    /// Soft-mark a user inactive (users are never hard-deleted)
    async fn deactivate(&self, slack_id: &str) -> RepoResult<()>;
}

// ============================================================================
// Channel Repository
// ============================================================================

#[async_trait]
pub trait ChannelRepository: Send + Sync {
    /// Insert-or-update by slack_id; `None` patch fields leave stored values
    /// untouched.
    async fn upsert(&self, patch: &ChannelPatch) -> RepoResult<Channel>;

    /// Find channel by external identifier
    async fn find_by_slack_id(&self, slack_id: &str) -> RepoResult<Option<Channel>>;

    /// List unarchived channels, ordered by id
    async fn list_unarchived(&self, limit: i64, offset: i64) -> RepoResult<Vec<Channel>>;
}

// ============================================================================
// Usage Repository (write path)
// ============================================================================

/// Input to the atomic write unit.
///
/// The emoji name is already normalized and the score already resolved and
/// non-zero; score-zero occurrences never reach the repository.
#[derive(Debug, Clone)]
pub struct NewRecording {
    pub actor: UserPatch,
    pub channel: Option<ChannelPatch>,
    pub target: Option<UserPatch>,
    pub emoji_name: String,
    pub score: i32,
    pub kind: UsageKind,
    pub message_ts: Option<String>,
}

#[async_trait]
pub trait UsageRepository: Send + Sync {
    /// Apply one recording as a single all-or-nothing unit: resolve/create the
    /// actor, channel, and target identities, append the immutable usage
    /// event, fold the given-side aggregate, and fold the received-side
    /// aggregate when the target resolves and differs from the actor.
    async fn record(&self, rec: &NewRecording) -> RepoResult<UsageEvent>;
}

// ============================================================================
// Stats Repository (read path)
// ============================================================================

/// Summed counters across all emojis for one user
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UsageTotals {
    pub given_count: i64,
    pub given_score: i64,
    pub received_count: i64,
    pub received_score: i64,
}

impl UsageTotals {
    /// Pick the counter matching a sort key
    pub fn metric(&self, sort: LeaderboardSort) -> i64 {
        match sort {
            LeaderboardSort::ReceivedScore => self.received_score,
            LeaderboardSort::ReceivedCount => self.received_count,
            LeaderboardSort::GivenScore => self.given_score,
            LeaderboardSort::GivenCount => self.given_count,
        }
    }
}

/// Per-emoji count/score pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmojiTally {
    pub emoji: String,
    pub count: i64,
    pub score: i64,
}

/// One leaderboard row (rank is assigned by the service layer)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeaderboardRow {
    pub user: User,
    pub totals: UsageTotals,
}

/// Occurrence totals within one channel
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChannelTotals {
    pub total_count: i64,
    pub total_score: i64,
}

/// Per-user count/score pair within one channel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserTally {
    pub user: User,
    pub count: i64,
    pub score: i64,
}

/// Workspace-wide totals
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GlobalTotals {
    pub total_usage: i64,
    pub total_score: i64,
    pub unique_emojis: i64,
    pub active_users: i64,
    pub active_channels: i64,
}

#[async_trait]
pub trait StatsRepository: Send + Sync {
    /// The aggregate row for one (user, emoji) pair, if any occurrences exist
    async fn find_stat(&self, user_id: i64, emoji_name: &str) -> RepoResult<Option<EmojiStat>>;

    /// Summed counters across all aggregate rows for a user
    async fn user_totals(&self, user_id: i64) -> RepoResult<UsageTotals>;

    /// Top emojis a user has given, by given score descending
    async fn top_given(&self, user_id: i64, limit: i64) -> RepoResult<Vec<EmojiTally>>;

    /// Top emojis a user has received, by received score descending
    async fn top_received(&self, user_id: i64, limit: i64) -> RepoResult<Vec<EmojiTally>>;

    /// Users grouped and summed across all emojis, ordered descending by the
    /// chosen metric; ties break by ascending slack_id
    async fn leaderboard(
        &self,
        sort: LeaderboardSort,
        limit: i64,
    ) -> RepoResult<Vec<LeaderboardRow>>;

    /// Page of usage events for a user, newest first, plus the total count
    async fn history(
        &self,
        user_id: i64,
        limit: i64,
        offset: i64,
    ) -> RepoResult<(Vec<UsageEvent>, i64)>;

    /// Occurrence totals within a channel
    async fn channel_totals(&self, channel_id: i64) -> RepoResult<ChannelTotals>;

    /// Top emojis within a channel, by summed score descending
    async fn channel_top_emojis(&self, channel_id: i64, limit: i64)
        -> RepoResult<Vec<EmojiTally>>;

    /// Top contributing users within a channel, by summed score descending
    async fn channel_top_users(&self, channel_id: i64, limit: i64) -> RepoResult<Vec<UserTally>>;

    /// Workspace-wide totals
    async fn global_totals(&self) -> RepoResult<GlobalTotals>;

    /// Top emojis across the whole workspace
    async fn top_emojis_global(&self, limit: i64) -> RepoResult<Vec<EmojiTally>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_totals_metric_selection() {
        let totals = UsageTotals {
            given_count: 1,
            given_score: 2,
            received_count: 3,
            received_score: 4,
        };
        assert_eq!(totals.metric(LeaderboardSort::GivenCount), 1);
        assert_eq!(totals.metric(LeaderboardSort::GivenScore), 2);
        assert_eq!(totals.metric(LeaderboardSort::ReceivedCount), 3);
        assert_eq!(totals.metric(LeaderboardSort::ReceivedScore), 4);
    }
}
