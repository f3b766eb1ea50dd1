//! PostgreSQL implementation of UsageRepository
//!
//! The write path for the immutable usage log and the running aggregates.
//! One recording is one transaction: identity upserts, the event insert, and
//! the aggregate folds either all commit or all roll back.

use async_trait::async_trait;
use sqlx::{PgConnection, PgPool};
use tracing::instrument;

use tracker_core::entities::UsageEvent;
use tracker_core::traits::{NewRecording, RepoResult, UsageRepository};

use crate::models::EmojiUsageModel;

use super::error::map_db_error;
use super::{upsert_channel_on, upsert_user_on};

/// Fold one occurrence into the (user, emoji) aggregate row.
///
/// The increment is a single INSERT … ON CONFLICT … DO UPDATE statement, so
/// two concurrent folds for the same pair serialize on the row instead of
/// losing an update. `first_used` is only written by the insert arm.
async fn fold_stats(
    conn: &mut PgConnection,
    user_id: i64,
    emoji_name: &str,
    given_count: i64,
    given_score: i64,
    received_count: i64,
    received_score: i64,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        r"
        INSERT INTO emoji_stats
            (user_id, emoji_name, given_count, given_score, received_count, received_score,
             first_used, last_used)
        VALUES ($1, $2, $3, $4, $5, $6, NOW(), NOW())
        ON CONFLICT (user_id, emoji_name) DO UPDATE
        SET given_count    = emoji_stats.given_count + EXCLUDED.given_count,
            given_score    = emoji_stats.given_score + EXCLUDED.given_score,
            received_count = emoji_stats.received_count + EXCLUDED.received_count,
            received_score = emoji_stats.received_score + EXCLUDED.received_score,
            last_used      = EXCLUDED.last_used,
            updated_at     = NOW()
        ",
    )
    .bind(user_id)
    .bind(emoji_name)
    .bind(given_count)
    .bind(given_score)
    .bind(received_count)
    .bind(received_score)
    .execute(&mut *conn)
    .await?;

    Ok(())
}

/// PostgreSQL implementation of UsageRepository
#[derive(Clone)]
pub struct PgUsageRepository {
    pool: PgPool,
}

impl PgUsageRepository {
    /// Create a new PgUsageRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UsageRepository for PgUsageRepository {
    #[instrument(skip(self, rec), fields(emoji = %rec.emoji_name, actor = %rec.actor.slack_id))]
    async fn record(&self, rec: &NewRecording) -> RepoResult<UsageEvent> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        let actor = upsert_user_on(&mut tx, &rec.actor)
            .await
            .map_err(map_db_error)?;

        let channel_id = match &rec.channel {
            Some(patch) => Some(
                upsert_channel_on(&mut tx, patch)
                    .await
                    .map_err(map_db_error)?
                    .id,
            ),
            None => None,
        };

        let target_user_id = match &rec.target {
            Some(patch) => Some(
                upsert_user_on(&mut tx, patch)
                    .await
                    .map_err(map_db_error)?
                    .id,
            ),
            None => None,
        };

        let event = sqlx::query_as::<_, EmojiUsageModel>(
            r"
            INSERT INTO emoji_usage
                (user_id, channel_id, emoji_name, emoji_score, usage_kind, message_ts,
                 target_user_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, user_id, channel_id, emoji_name, emoji_score, usage_kind,
                      message_ts, target_user_id, created_at
            ",
        )
        .bind(actor.id)
        .bind(channel_id)
        .bind(&rec.emoji_name)
        .bind(rec.score)
        .bind(rec.kind.as_str())
        .bind(&rec.message_ts)
        .bind(target_user_id)
        .fetch_one(&mut *tx)
        .await
        .map_err(map_db_error)?;

        fold_stats(
            &mut tx,
            actor.id,
            &rec.emoji_name,
            1,
            i64::from(rec.score),
            0,
            0,
        )
        .await
        .map_err(map_db_error)?;

        // Self-referential occurrences never produce a received-side fold
        if let Some(target_id) = target_user_id {
            if target_id != actor.id {
                fold_stats(
                    &mut tx,
                    target_id,
                    &rec.emoji_name,
                    0,
                    0,
                    1,
                    i64::from(rec.score),
                )
                .await
                .map_err(map_db_error)?;
            }
        }

        tx.commit().await.map_err(map_db_error)?;

        Ok(UsageEvent::from(event))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repo_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PgUsageRepository>();
    }
}
