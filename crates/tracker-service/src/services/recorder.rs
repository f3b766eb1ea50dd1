//! Usage recorder
//!
//! The orchestration path for every tracked occurrence: consult the policy,
//! resolve identities, append the immutable event, and fold the aggregates.
//! Steps 2-5 run inside one repository transaction; the policy gate and the
//! best-effort directory enrichment happen before it, so the transaction is
//! never held across an external round trip.

use tracing::{debug, info, instrument, warn};

use tracker_core::entities::{ChannelPatch, UsageEvent, UsageKind, UserPatch};
use tracker_core::extract::dedup_preserve_order;
use tracker_core::traits::NewRecording;

use super::context::ServiceContext;
use super::error::ServiceResult;
use super::identity::IdentityService;

/// One occurrence to record
#[derive(Debug, Clone)]
pub struct RecordRequest {
    pub actor_slack_id: String,
    pub emoji_name: String,
    pub kind: UsageKind,
    pub channel_slack_id: Option<String>,
    pub message_ts: Option<String>,
    /// Receiver of a reaction; ignored for message occurrences
    pub target_slack_id: Option<String>,
}

/// Result of a record call
#[derive(Debug, Clone)]
pub enum RecordOutcome {
    /// The occurrence was written
    Recorded(UsageEvent),
    /// The policy scored the emoji 0; nothing was written
    Skipped,
}

impl RecordOutcome {
    pub fn is_skipped(&self) -> bool {
        matches!(self, Self::Skipped)
    }

    /// The written event, if any
    pub fn event(self) -> Option<UsageEvent> {
        match self {
            Self::Recorded(event) => Some(event),
            Self::Skipped => None,
        }
    }
}

/// Normalized reaction event from the event source
#[derive(Debug, Clone)]
pub struct ReactionEvent {
    pub user_slack_id: String,
    pub reaction: String,
    pub channel_slack_id: Option<String>,
    pub message_ts: Option<String>,
    /// Author of the reacted-to message, when the ingest layer resolved one
    pub message_author_slack_id: Option<String>,
}

/// Normalized message event from the event source
#[derive(Debug, Clone)]
pub struct MessageEvent {
    pub user_slack_id: String,
    pub text: String,
    pub channel_slack_id: Option<String>,
    pub message_ts: Option<String>,
    /// Raw event payload for rich-text mention extraction
    pub payload: Option<serde_json::Value>,
}

/// Usage recorder service
pub struct RecorderService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> RecorderService<'a> {
    /// Create a new RecorderService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Record one occurrence.
    ///
    /// Returns `Skipped` without touching the store when the policy scores
    /// the emoji 0. A target is only honored for reactions, and a
    /// self-referential target never produces a received-side update.
    #[instrument(skip(self, req), fields(actor = %req.actor_slack_id, emoji = %req.emoji_name))]
    pub async fn record(&self, req: RecordRequest) -> ServiceResult<RecordOutcome> {
        let emoji_name = self.ctx.policy().normalize(&req.emoji_name);
        let score = self.ctx.policy().score_of(&req.emoji_name);
        if score == 0 {
            debug!(emoji = %emoji_name, "Emoji not configured for tracking");
            return Ok(RecordOutcome::Skipped);
        }

        let identity = IdentityService::new(self.ctx);

        // Enrichment happens before the write unit and is best-effort
        let mut actor = UserPatch::bare(&req.actor_slack_id);
        if let Some(enriched) = identity.enrichment_for(&req.actor_slack_id).await {
            actor = actor.or(enriched);
        }

        let target = match (&req.target_slack_id, req.kind) {
            (Some(target_id), UsageKind::Reaction) => {
                let mut patch = UserPatch::bare(target_id);
                if let Some(enriched) = identity.enrichment_for(target_id).await {
                    patch = patch.or(enriched);
                }
                Some(patch)
            }
            _ => None,
        };

        let recording = NewRecording {
            actor,
            channel: req.channel_slack_id.map(ChannelPatch::bare),
            target,
            emoji_name: emoji_name.clone(),
            score,
            kind: req.kind,
            message_ts: req.message_ts,
        };

        let event = self.ctx.usage_repo().record(&recording).await?;

        match &req.target_slack_id {
            Some(target) => info!(
                actor = %req.actor_slack_id,
                target = %target,
                emoji = %emoji_name,
                score,
                kind = ?req.kind,
                "Tracked emoji usage"
            ),
            None => info!(
                actor = %req.actor_slack_id,
                emoji = %emoji_name,
                score,
                kind = ?req.kind,
                "Tracked emoji usage"
            ),
        }

        Ok(RecordOutcome::Recorded(event))
    }

    /// Record a reaction occurrence
    #[instrument(skip(self, ev), fields(actor = %ev.user_slack_id, emoji = %ev.reaction))]
    pub async fn process_reaction(&self, ev: ReactionEvent) -> ServiceResult<RecordOutcome> {
        self.record(RecordRequest {
            actor_slack_id: ev.user_slack_id,
            emoji_name: ev.reaction,
            kind: UsageKind::Reaction,
            channel_slack_id: ev.channel_slack_id,
            message_ts: ev.message_ts,
            target_slack_id: ev.message_author_slack_id,
        })
        .await
    }

    /// Record every emoji token in a message.
    ///
    /// Mentioned users are lazily created so later stats queries can resolve
    /// them, but mentions never generate received-side credit; only
    /// reactions do.
    #[instrument(skip(self, ev), fields(actor = %ev.user_slack_id))]
    pub async fn process_message(&self, ev: MessageEvent) -> ServiceResult<Vec<UsageEvent>> {
        let emojis = self.ctx.extractor().emoji_tokens(&ev.text);
        if emojis.is_empty() {
            return Ok(Vec::new());
        }

        let mentions = self.resolve_mentions(&ev.text, ev.payload.as_ref()).await;
        if !mentions.is_empty() {
            let identity = IdentityService::new(self.ctx);
            identity.ensure_users_exist(&mentions).await?;
        }

        let mut events = Vec::with_capacity(emojis.len());
        for emoji in emojis {
            let outcome = self
                .record(RecordRequest {
                    actor_slack_id: ev.user_slack_id.clone(),
                    emoji_name: emoji,
                    kind: UsageKind::Message,
                    channel_slack_id: ev.channel_slack_id.clone(),
                    message_ts: ev.message_ts.clone(),
                    target_slack_id: None,
                })
                .await?;
            if let RecordOutcome::Recorded(event) = outcome {
                events.push(event);
            }
        }

        Ok(events)
    }

    /// All mentioned user ids: structured payload and canonical syntax first,
    /// then bare @names resolved through the directory. Unresolved names are
    /// silently dropped.
    async fn resolve_mentions(
        &self,
        text: &str,
        payload: Option<&serde_json::Value>,
    ) -> Vec<String> {
        let mut ids = self.ctx.extractor().mentioned_users(text, payload);

        if let Some(directory) = self.ctx.directory() {
            for name in self.ctx.extractor().display_mentions(text) {
                match directory.resolve_display_name(&name).await {
                    Ok(Some(id)) => ids.push(id),
                    Ok(None) => debug!(name = %name, "Could not resolve display name"),
                    Err(e) => {
                        warn!(name = %name, error = %e, "Display name resolution failed");
                    }
                }
            }
        }

        dedup_preserve_order(ids)
    }
}
