//! Statistics service
//!
//! Read paths over the aggregates and the immutable usage log. All queries
//! go straight to the store; nothing here touches the write path.

use tracing::instrument;

use tracker_core::entities::LeaderboardSort;

use crate::dto::{
    ChannelInfo, ChannelListEntry, ChannelStatsResponse, ChannelTotalsInfo, ChannelUserStats,
    EmojiConfigResponse, EmojiStatsEntry, GlobalStatsResponse, GlobalTotalsInfo, HistoryEntry,
    LeaderboardEntry, LeaderboardResponse, PaginationInfo, TotalsInfo, UserHistoryResponse,
    UserInfo, UserListEntry, UserStatsResponse,
};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Number of entries in "top" listings
const TOP_LIMIT: i64 = 10;

/// Statistics service
pub struct StatsService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> StatsService<'a> {
    /// Create a new StatsService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Totals and top-10 given/received emojis for one user
    #[instrument(skip(self))]
    pub async fn user_stats(&self, slack_id: &str) -> ServiceResult<UserStatsResponse> {
        let user = self
            .ctx
            .user_repo()
            .find_by_slack_id(slack_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("User", slack_id))?;

        let totals = self.ctx.stats_repo().user_totals(user.id).await?;
        let top_given = self.ctx.stats_repo().top_given(user.id, TOP_LIMIT).await?;
        let top_received = self
            .ctx
            .stats_repo()
            .top_received(user.id, TOP_LIMIT)
            .await?;

        Ok(UserStatsResponse {
            user: UserInfo::from(&user),
            totals: TotalsInfo::from(totals),
            top_given: top_given.into_iter().map(EmojiStatsEntry::from).collect(),
            top_received: top_received
                .into_iter()
                .map(EmojiStatsEntry::from)
                .collect(),
        })
    }

    /// Ranked users by the chosen metric. The limit is clamped to 1-200 and
    /// ranks are assigned 1..n in result order.
    #[instrument(skip(self))]
    pub async fn leaderboard(
        &self,
        sort: LeaderboardSort,
        limit: i64,
    ) -> ServiceResult<LeaderboardResponse> {
        let limit = limit.clamp(1, 200);
        let rows = self.ctx.stats_repo().leaderboard(sort, limit).await?;

        let entries: Vec<LeaderboardEntry> = rows
            .into_iter()
            .enumerate()
            .map(|(idx, row)| LeaderboardEntry {
                rank: idx as i64 + 1,
                user: UserInfo::from(&row.user),
                stats: TotalsInfo::from(row.totals),
            })
            .collect();

        Ok(LeaderboardResponse {
            total_users: entries.len(),
            sort_by: sort.as_str().to_string(),
            entries,
        })
    }

    /// Paginated usage history for one user, newest first
    #[instrument(skip(self))]
    pub async fn user_history(
        &self,
        slack_id: &str,
        limit: i64,
        offset: i64,
    ) -> ServiceResult<UserHistoryResponse> {
        let user = self
            .ctx
            .user_repo()
            .find_by_slack_id(slack_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("User", slack_id))?;

        let limit = limit.clamp(1, 500);
        let offset = offset.max(0);

        let (events, total) = self.ctx.stats_repo().history(user.id, limit, offset).await?;

        Ok(UserHistoryResponse {
            user: UserInfo::from(&user),
            history: events.into_iter().map(HistoryEntry::from).collect(),
            pagination: PaginationInfo {
                total,
                limit,
                offset,
                has_more: offset + limit < total,
            },
        })
    }

    /// Totals plus top emojis and top users for one channel
    #[instrument(skip(self))]
    pub async fn channel_stats(&self, slack_id: &str) -> ServiceResult<ChannelStatsResponse> {
        let channel = self
            .ctx
            .channel_repo()
            .find_by_slack_id(slack_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Channel", slack_id))?;

        let totals = self.ctx.stats_repo().channel_totals(channel.id).await?;
        let top_emojis = self
            .ctx
            .stats_repo()
            .channel_top_emojis(channel.id, TOP_LIMIT)
            .await?;
        let top_users = self
            .ctx
            .stats_repo()
            .channel_top_users(channel.id, TOP_LIMIT)
            .await?;

        Ok(ChannelStatsResponse {
            channel: ChannelInfo::from(&channel),
            totals: ChannelTotalsInfo {
                total_count: totals.total_count,
                total_score: totals.total_score,
            },
            top_emojis: top_emojis.into_iter().map(EmojiStatsEntry::from).collect(),
            top_users: top_users
                .into_iter()
                .map(|tally| ChannelUserStats {
                    user: UserInfo::from(&tally.user),
                    count: tally.count,
                    score: tally.score,
                })
                .collect(),
        })
    }

    /// Workspace-wide totals and top emojis
    #[instrument(skip(self))]
    pub async fn global_stats(&self) -> ServiceResult<GlobalStatsResponse> {
        let totals = self.ctx.stats_repo().global_totals().await?;
        let top_emojis = self.ctx.stats_repo().top_emojis_global(TOP_LIMIT).await?;

        Ok(GlobalStatsResponse {
            totals: GlobalTotalsInfo {
                total_usage: totals.total_usage,
                total_score: totals.total_score,
                unique_emojis: totals.unique_emojis,
                active_users: totals.active_users,
                active_channels: totals.active_channels,
            },
            top_emojis: top_emojis.into_iter().map(EmojiStatsEntry::from).collect(),
        })
    }

    /// Active users with basic profile fields
    #[instrument(skip(self))]
    pub async fn list_users(&self, limit: i64, offset: i64) -> ServiceResult<Vec<UserListEntry>> {
        let users = self
            .ctx
            .user_repo()
            .list_active(limit.clamp(1, 500), offset.max(0))
            .await?;
        Ok(users.iter().map(UserListEntry::from).collect())
    }

    /// Unarchived channels with basic fields
    #[instrument(skip(self))]
    pub async fn list_channels(
        &self,
        limit: i64,
        offset: i64,
    ) -> ServiceResult<Vec<ChannelListEntry>> {
        let channels = self
            .ctx
            .channel_repo()
            .list_unarchived(limit.clamp(1, 500), offset.max(0))
            .await?;
        Ok(channels.iter().map(ChannelListEntry::from).collect())
    }

    /// The full emoji policy: score table plus settings, read-only
    pub fn emoji_config(&self) -> EmojiConfigResponse {
        let policy = self.ctx.policy();
        EmojiConfigResponse {
            emojis: policy.emojis().clone(),
            settings: *policy.settings(),
        }
    }
}
