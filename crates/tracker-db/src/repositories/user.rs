//! PostgreSQL implementation of UserRepository

use async_trait::async_trait;
use sqlx::{PgConnection, PgPool};
use tracing::instrument;

use tracker_core::entities::{User, UserPatch};
use tracker_core::traits::{RepoResult, UserRepository};

use crate::models::UserModel;

use super::error::{map_db_error, user_not_found};

/// Insert-or-update a user by slack_id on an arbitrary connection.
///
/// `None` patch fields resolve to the stored value via COALESCE, so an upsert
/// never erases previously observed profile data. The unique constraint on
/// slack_id makes concurrent calls converge on one row.
pub(crate) async fn upsert_user_on(
    conn: &mut PgConnection,
    patch: &UserPatch,
) -> Result<UserModel, sqlx::Error> {
    sqlx::query_as::<_, UserModel>(
        r"
        INSERT INTO users (slack_id, email, display_name, real_name, is_bot)
        VALUES ($1, $2, $3, $4, COALESCE($5, FALSE))
        ON CONFLICT (slack_id) DO UPDATE
        SET email        = COALESCE(EXCLUDED.email, users.email),
            display_name = COALESCE(EXCLUDED.display_name, users.display_name),
            real_name    = COALESCE(EXCLUDED.real_name, users.real_name),
            is_bot       = COALESCE($5, users.is_bot),
            updated_at   = NOW()
        RETURNING id, slack_id, email, display_name, real_name, is_bot, is_active,
                  created_at, updated_at
        ",
    )
    .bind(&patch.slack_id)
    .bind(&patch.email)
    .bind(&patch.display_name)
    .bind(&patch.real_name)
    .bind(patch.is_bot)
    .fetch_one(&mut *conn)
    .await
}

/// PostgreSQL implementation of UserRepository
#[derive(Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    /// Create a new PgUserRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    #[instrument(skip(self))]
    async fn upsert(&self, patch: &UserPatch) -> RepoResult<User> {
        let mut conn = self.pool.acquire().await.map_err(map_db_error)?;
        let model = upsert_user_on(&mut conn, patch).await.map_err(map_db_error)?;
        Ok(User::from(model))
    }

    #[instrument(skip(self))]
    async fn find_by_slack_id(&self, slack_id: &str) -> RepoResult<Option<User>> {
        let result = sqlx::query_as::<_, UserModel>(
            r"
            SELECT id, slack_id, email, display_name, real_name, is_bot, is_active,
                   created_at, updated_at
            FROM users
            WHERE slack_id = $1
            ",
        )
        .bind(slack_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(User::from))
    }

    #[instrument(skip(self))]
    async fn list_active(&self, limit: i64, offset: i64) -> RepoResult<Vec<User>> {
        let results = sqlx::query_as::<_, UserModel>(
            r"
            SELECT id, slack_id, email, display_name, real_name, is_bot, is_active,
                   created_at, updated_at
            FROM users
            WHERE is_active = TRUE
            ORDER BY id
            LIMIT $1 OFFSET $2
            ",
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(User::from).collect())
    }

    #[instrument(skip(self))]
    async fn deactivate(&self, slack_id: &str) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE users
            SET is_active = FALSE, updated_at = NOW()
            WHERE slack_id = $1
            ",
        )
        .bind(slack_id)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(user_not_found(slack_id));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repo_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PgUserRepository>();
    }
}
