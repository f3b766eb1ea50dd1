//! Directory synchronization
//!
//! Bulk-imports user and channel profiles from the external directory into
//! the identity tables. Runs at ingest startup when enabled; the event path
//! does not depend on it.

use tracing::{info, instrument, warn};

use tracker_core::entities::{ChannelPatch, UserPatch};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Directory sync service
pub struct SyncService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> SyncService<'a> {
    /// Create a new SyncService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Sync users from the directory, up to `limit` records.
    /// Returns the number of users upserted.
    #[instrument(skip(self))]
    pub async fn sync_users(&self, limit: u64) -> ServiceResult<u64> {
        let directory = self
            .ctx
            .directory()
            .ok_or_else(|| ServiceError::validation("directory client not configured"))?;

        info!("Starting user synchronization");
        let mut synced: u64 = 0;
        let mut cursor: Option<String> = None;

        loop {
            let page = directory.list_users(cursor.as_deref()).await?;
            if page.items.is_empty() {
                break;
            }

            for profile in page.items {
                if profile.deleted {
                    continue;
                }
                let patch = UserPatch {
                    slack_id: profile.slack_id.clone(),
                    email: profile.email,
                    display_name: profile.display_name,
                    real_name: profile.real_name,
                    is_bot: Some(profile.is_bot),
                };
                if let Err(e) = self.ctx.user_repo().upsert(&patch).await {
                    warn!(slack_id = %profile.slack_id, error = %e, "Failed to sync user");
                    continue;
                }
                synced += 1;
                if synced >= limit {
                    info!(synced, "User synchronization hit limit");
                    return Ok(synced);
                }
            }

            cursor = page.next_cursor;
            if cursor.is_none() {
                break;
            }
        }

        info!(synced, "User synchronization completed");
        Ok(synced)
    }

    /// Sync channels from the directory, up to `limit` records.
    /// Returns the number of channels upserted.
    #[instrument(skip(self))]
    pub async fn sync_channels(&self, limit: u64) -> ServiceResult<u64> {
        let directory = self
            .ctx
            .directory()
            .ok_or_else(|| ServiceError::validation("directory client not configured"))?;

        info!("Starting channel synchronization");
        let mut synced: u64 = 0;
        let mut cursor: Option<String> = None;

        loop {
            let page = directory.list_channels(cursor.as_deref()).await?;
            if page.items.is_empty() {
                break;
            }

            for channel in page.items {
                let patch = ChannelPatch {
                    slack_id: channel.slack_id.clone(),
                    name: channel.name,
                    is_private: Some(channel.is_private),
                    is_archived: Some(channel.is_archived),
                };
                if let Err(e) = self.ctx.channel_repo().upsert(&patch).await {
                    warn!(slack_id = %channel.slack_id, error = %e, "Failed to sync channel");
                    continue;
                }
                synced += 1;
                if synced >= limit {
                    info!(synced, "Channel synchronization hit limit");
                    return Ok(synced);
                }
            }

            cursor = page.next_cursor;
            if cursor.is_none() {
                break;
            }
        }

        info!(synced, "Channel synchronization completed");
        Ok(synced)
    }
}
