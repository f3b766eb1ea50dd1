//! PostgreSQL implementation of StatsRepository
//!
//! Read-only aggregate queries over the usage log and the stats table.

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use tracker_core::entities::{EmojiStat, LeaderboardSort, UsageEvent};
use tracker_core::traits::{
    ChannelTotals, EmojiTally, GlobalTotals, LeaderboardRow, RepoResult, StatsRepository,
    UsageTotals, UserTally,
};

use crate::models::{
    ChannelTotalsModel, EmojiStatModel, EmojiTallyModel, EmojiUsageModel, GlobalTotalsModel,
    LeaderboardRowModel, UsageTotalsModel, UserTallyModel,
};

use super::error::map_db_error;

/// SQL column for a leaderboard sort key
fn sort_column(sort: LeaderboardSort) -> &'static str {
    match sort {
        LeaderboardSort::ReceivedScore => "received_score",
        LeaderboardSort::ReceivedCount => "received_count",
        LeaderboardSort::GivenScore => "given_score",
        LeaderboardSort::GivenCount => "given_count",
    }
}

/// PostgreSQL implementation of StatsRepository
#[derive(Clone)]
pub struct PgStatsRepository {
    pool: PgPool,
}

impl PgStatsRepository {
    /// Create a new PgStatsRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl StatsRepository for PgStatsRepository {
    #[instrument(skip(self))]
    async fn find_stat(&self, user_id: i64, emoji_name: &str) -> RepoResult<Option<EmojiStat>> {
        let result = sqlx::query_as::<_, EmojiStatModel>(
            r"
            SELECT id, user_id, emoji_name, given_count, given_score, received_count,
                   received_score, first_used, last_used, updated_at
            FROM emoji_stats
            WHERE user_id = $1 AND emoji_name = $2
            ",
        )
        .bind(user_id)
        .bind(emoji_name)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(EmojiStat::from))
    }

    #[instrument(skip(self))]
    async fn user_totals(&self, user_id: i64) -> RepoResult<UsageTotals> {
        let result = sqlx::query_as::<_, UsageTotalsModel>(
            r"
            SELECT COALESCE(SUM(given_count), 0)::BIGINT    AS given_count,
                   COALESCE(SUM(given_score), 0)::BIGINT    AS given_score,
                   COALESCE(SUM(received_count), 0)::BIGINT AS received_count,
                   COALESCE(SUM(received_score), 0)::BIGINT AS received_score
            FROM emoji_stats
            WHERE user_id = $1
            ",
        )
        .bind(user_id)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(UsageTotals::from(result))
    }

    #[instrument(skip(self))]
    async fn top_given(&self, user_id: i64, limit: i64) -> RepoResult<Vec<EmojiTally>> {
        let results = sqlx::query_as::<_, EmojiTallyModel>(
            r"
            SELECT emoji_name, given_count AS count, given_score AS score
            FROM emoji_stats
            WHERE user_id = $1 AND given_count > 0
            ORDER BY given_score DESC, emoji_name
            LIMIT $2
            ",
        )
        .bind(user_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(EmojiTally::from).collect())
    }

    #[instrument(skip(self))]
    async fn top_received(&self, user_id: i64, limit: i64) -> RepoResult<Vec<EmojiTally>> {
        let results = sqlx::query_as::<_, EmojiTallyModel>(
            r"
            SELECT emoji_name, received_count AS count, received_score AS score
            FROM emoji_stats
            WHERE user_id = $1 AND received_count > 0
            ORDER BY received_score DESC, emoji_name
            LIMIT $2
            ",
        )
        .bind(user_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(EmojiTally::from).collect())
    }

    #[instrument(skip(self))]
    async fn leaderboard(
        &self,
        sort: LeaderboardSort,
        limit: i64,
    ) -> RepoResult<Vec<LeaderboardRow>> {
        // The sort key is a closed enumeration; the column name is mapped at
        // definition time, never taken from the request.
        let query = format!(
            r"
            SELECT u.id, u.slack_id, u.email, u.display_name, u.real_name, u.is_bot,
                   u.is_active, u.created_at, u.updated_at,
                   COALESCE(SUM(s.given_count), 0)::BIGINT    AS given_count,
                   COALESCE(SUM(s.given_score), 0)::BIGINT    AS given_score,
                   COALESCE(SUM(s.received_count), 0)::BIGINT AS received_count,
                   COALESCE(SUM(s.received_score), 0)::BIGINT AS received_score
            FROM users u
            JOIN emoji_stats s ON s.user_id = u.id
            GROUP BY u.id
            ORDER BY {metric} DESC, u.slack_id ASC
            LIMIT $1
            ",
            metric = sort_column(sort),
        );

        let results = sqlx::query_as::<_, LeaderboardRowModel>(&query)
            .bind(limit)
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(results.into_iter().map(LeaderboardRow::from).collect())
    }

    #[instrument(skip(self))]
    async fn history(
        &self,
        user_id: i64,
        limit: i64,
        offset: i64,
    ) -> RepoResult<(Vec<UsageEvent>, i64)> {
        let events = sqlx::query_as::<_, EmojiUsageModel>(
            r"
            SELECT id, user_id, channel_id, emoji_name, emoji_score, usage_kind,
                   message_ts, target_user_id, created_at
            FROM emoji_usage
            WHERE user_id = $1
            ORDER BY created_at DESC, id DESC
            LIMIT $2 OFFSET $3
            ",
        )
        .bind(user_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        let total = sqlx::query_scalar::<_, i64>(
            r"
            SELECT COUNT(*) FROM emoji_usage WHERE user_id = $1
            ",
        )
        .bind(user_id)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok((events.into_iter().map(UsageEvent::from).collect(), total))
    }

    #[instrument(skip(self))]
    async fn channel_totals(&self, channel_id: i64) -> RepoResult<ChannelTotals> {
        let result = sqlx::query_as::<_, ChannelTotalsModel>(
            r"
            SELECT COUNT(*)::BIGINT                        AS total_count,
                   COALESCE(SUM(emoji_score), 0)::BIGINT   AS total_score
            FROM emoji_usage
            WHERE channel_id = $1
            ",
        )
        .bind(channel_id)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(ChannelTotals {
            total_count: result.total_count,
            total_score: result.total_score,
        })
    }

    #[instrument(skip(self))]
    async fn channel_top_emojis(
        &self,
        channel_id: i64,
        limit: i64,
    ) -> RepoResult<Vec<EmojiTally>> {
        let results = sqlx::query_as::<_, EmojiTallyModel>(
            r"
            SELECT emoji_name,
                   COUNT(*)::BIGINT                      AS count,
                   COALESCE(SUM(emoji_score), 0)::BIGINT AS score
            FROM emoji_usage
            WHERE channel_id = $1
            GROUP BY emoji_name
            ORDER BY score DESC, emoji_name
            LIMIT $2
            ",
        )
        .bind(channel_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(EmojiTally::from).collect())
    }

    #[instrument(skip(self))]
    async fn channel_top_users(&self, channel_id: i64, limit: i64) -> RepoResult<Vec<UserTally>> {
        let results = sqlx::query_as::<_, UserTallyModel>(
            r"
            SELECT u.id, u.slack_id, u.email, u.display_name, u.real_name, u.is_bot,
                   u.is_active, u.created_at, u.updated_at,
                   COUNT(e.id)::BIGINT                     AS count,
                   COALESCE(SUM(e.emoji_score), 0)::BIGINT AS score
            FROM users u
            JOIN emoji_usage e ON e.user_id = u.id
            WHERE e.channel_id = $1
            GROUP BY u.id
            ORDER BY score DESC, u.slack_id ASC
            LIMIT $2
            ",
        )
        .bind(channel_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(UserTally::from).collect())
    }

    #[instrument(skip(self))]
    async fn global_totals(&self) -> RepoResult<GlobalTotals> {
        let usage = sqlx::query_as::<_, GlobalTotalsModel>(
            r"
            SELECT COUNT(*)::BIGINT                      AS total_usage,
                   COALESCE(SUM(emoji_score), 0)::BIGINT AS total_score,
                   COUNT(DISTINCT emoji_name)::BIGINT    AS unique_emojis
            FROM emoji_usage
            ",
        )
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        let active_users = sqlx::query_scalar::<_, i64>(
            r"SELECT COUNT(*) FROM users WHERE is_active = TRUE",
        )
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        let active_channels = sqlx::query_scalar::<_, i64>(
            r"SELECT COUNT(*) FROM channels WHERE is_archived = FALSE",
        )
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(GlobalTotals {
            total_usage: usage.total_usage,
            total_score: usage.total_score,
            unique_emojis: usage.unique_emojis,
            active_users,
            active_channels,
        })
    }

    #[instrument(skip(self))]
    async fn top_emojis_global(&self, limit: i64) -> RepoResult<Vec<EmojiTally>> {
        let results = sqlx::query_as::<_, EmojiTallyModel>(
            r"
            SELECT emoji_name,
                   COUNT(*)::BIGINT                      AS count,
                   COALESCE(SUM(emoji_score), 0)::BIGINT AS score
            FROM emoji_usage
            GROUP BY emoji_name
            ORDER BY score DESC, emoji_name
            LIMIT $1
            ",
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(EmojiTally::from).collect())
    }
}
