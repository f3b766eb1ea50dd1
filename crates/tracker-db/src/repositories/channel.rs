//! PostgreSQL implementation of ChannelRepository

use async_trait::async_trait;
use sqlx::{PgConnection, PgPool};
use tracing::instrument;

use tracker_core::entities::{Channel, ChannelPatch};
use tracker_core::traits::{ChannelRepository, RepoResult};

use crate::models::ChannelModel;

use super::error::map_db_error;

/// Insert-or-update a channel by slack_id on an arbitrary connection.
///
/// Same patch semantics as the user upsert: `None` never erases.
pub(crate) async fn upsert_channel_on(
    conn: &mut PgConnection,
    patch: &ChannelPatch,
) -> Result<ChannelModel, sqlx::Error> {
    sqlx::query_as::<_, ChannelModel>(
        r"
        INSERT INTO channels (slack_id, name, is_private, is_archived)
        VALUES ($1, $2, COALESCE($3, FALSE), COALESCE($4, FALSE))
        ON CONFLICT (slack_id) DO UPDATE
        SET name        = COALESCE(EXCLUDED.name, channels.name),
            is_private  = COALESCE($3, channels.is_private),
            is_archived = COALESCE($4, channels.is_archived),
            updated_at  = NOW()
        RETURNING id, slack_id, name, is_private, is_archived, created_at, updated_at
        ",
    )
    .bind(&patch.slack_id)
    .bind(&patch.name)
    .bind(patch.is_private)
    .bind(patch.is_archived)
    .fetch_one(&mut *conn)
    .await
}

/// PostgreSQL implementation of ChannelRepository
#[derive(Clone)]
pub struct PgChannelRepository {
    pool: PgPool,
}

impl PgChannelRepository {
    /// Create a new PgChannelRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ChannelRepository for PgChannelRepository {
    #[instrument(skip(self))]
    async fn upsert(&self, patch: &ChannelPatch) -> RepoResult<Channel> {
        let mut conn = self.pool.acquire().await.map_err(map_db_error)?;
        let model = upsert_channel_on(&mut conn, patch)
            .await
            .map_err(map_db_error)?;
        Ok(Channel::from(model))
    }

    #[instrument(skip(self))]
    async fn find_by_slack_id(&self, slack_id: &str) -> RepoResult<Option<Channel>> {
        let result = sqlx::query_as::<_, ChannelModel>(
            r"
            SELECT id, slack_id, name, is_private, is_archived, created_at, updated_at
            FROM channels
            WHERE slack_id = $1
            ",
        )
        .bind(slack_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Channel::from))
    }

    #[instrument(skip(self))]
    async fn list_unarchived(&self, limit: i64, offset: i64) -> RepoResult<Vec<Channel>> {
        let results = sqlx::query_as::<_, ChannelModel>(
            r"
            SELECT id, slack_id, name, is_private, is_archived, created_at, updated_at
            FROM channels
            WHERE is_archived = FALSE
            ORDER BY id
            LIMIT $1 OFFSET $2
            ",
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Channel::from).collect())
    }
}
