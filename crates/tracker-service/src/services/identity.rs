//! Identity service
//!
//! Create-or-update for user and channel identities. The upsert itself is a
//! pure write from explicitly supplied fields; directory enrichment is a
//! separate, optional step whose results feed back into the same upsert
//! parameters. Enrichment failures are logged and swallowed, never
//! propagated: identities are still created from whatever fields the event
//! carried.

use tracing::{info, instrument, warn};

use tracker_core::entities::{Channel, ChannelPatch, User, UserPatch};
use tracker_core::traits::DirectoryProfile;

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Identity service
pub struct IdentityService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> IdentityService<'a> {
    /// Create a new IdentityService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Upsert a user from explicit fields only
    #[instrument(skip(self, patch), fields(slack_id = %patch.slack_id))]
    pub async fn upsert_user(&self, patch: UserPatch) -> ServiceResult<User> {
        Ok(self.ctx.user_repo().upsert(&patch).await?)
    }

    /// Upsert a user, filling fields the caller did not supply from the
    /// directory when one is configured. Explicit fields always win.
    #[instrument(skip(self, patch), fields(slack_id = %patch.slack_id))]
    pub async fn upsert_user_enriched(&self, patch: UserPatch) -> ServiceResult<User> {
        let patch = match self.enrichment_for(&patch.slack_id).await {
            Some(enriched) => patch.or(enriched),
            None => patch,
        };
        Ok(self.ctx.user_repo().upsert(&patch).await?)
    }

    /// Upsert a channel from explicit fields
    #[instrument(skip(self, patch), fields(slack_id = %patch.slack_id))]
    pub async fn upsert_channel(&self, patch: ChannelPatch) -> ServiceResult<Channel> {
        Ok(self.ctx.channel_repo().upsert(&patch).await?)
    }

    /// Soft-mark a user inactive. Users are never hard-deleted.
    #[instrument(skip(self))]
    pub async fn deactivate_user(&self, slack_id: &str) -> ServiceResult<()> {
        Ok(self.ctx.user_repo().deactivate(slack_id).await?)
    }

    /// Make sure every mentioned user exists, creating missing ones from the
    /// directory. Per-user failures are logged and skipped.
    #[instrument(skip(self, slack_ids))]
    pub async fn ensure_users_exist(&self, slack_ids: &[String]) -> ServiceResult<Vec<User>> {
        let mut users = Vec::with_capacity(slack_ids.len());

        for slack_id in slack_ids {
            match self.ctx.user_repo().find_by_slack_id(slack_id).await {
                Ok(Some(user)) => users.push(user),
                Ok(None) => {
                    info!(slack_id = %slack_id, "Creating user from mention");
                    match self.upsert_user_enriched(UserPatch::bare(slack_id)).await {
                        Ok(user) => users.push(user),
                        Err(e) => {
                            warn!(slack_id = %slack_id, error = %e, "Failed to create mentioned user");
                        }
                    }
                }
                Err(e) => {
                    warn!(slack_id = %slack_id, error = %e, "Failed to look up mentioned user");
                }
            }
        }

        Ok(users)
    }

    /// Best-effort directory lookup converted to upsert parameters.
    /// Any failure means "no enrichment data available".
    pub async fn enrichment_for(&self, slack_id: &str) -> Option<UserPatch> {
        let directory = self.ctx.directory()?;

        match directory.lookup_user(slack_id).await {
            Ok(Some(profile)) => Some(profile_patch(profile)),
            Ok(None) => None,
            Err(e) => {
                warn!(slack_id = %slack_id, error = %e, "Directory lookup failed, continuing without enrichment");
                None
            }
        }
    }
}

/// Convert a directory profile into upsert parameters
fn profile_patch(profile: DirectoryProfile) -> UserPatch {
    UserPatch {
        slack_id: profile.slack_id,
        email: profile.email,
        display_name: profile.display_name,
        real_name: profile.real_name,
        is_bot: Some(profile.is_bot),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_patch_carries_all_fields() {
        let patch = profile_patch(DirectoryProfile {
            slack_id: "U1".to_string(),
            email: Some("a@example.com".to_string()),
            display_name: Some("alice".to_string()),
            real_name: None,
            is_bot: true,
            deleted: false,
        });
        assert_eq!(patch.slack_id, "U1");
        assert_eq!(patch.email.as_deref(), Some("a@example.com"));
        assert_eq!(patch.is_bot, Some(true));
        assert!(patch.real_name.is_none());
    }
}
