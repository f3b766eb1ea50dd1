//! Event callback handlers
//!
//! Slack delivers events over HTTP and retries anything that does not get a
//! timely 200, so the handler acknowledges immediately and processes the
//! event in a background task. Processing failures are logged, never
//! returned to Slack.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::{debug, error, info, instrument, warn};

use tracker_core::entities::{ChannelPatch, UserPatch};
use tracker_service::{
    HealthResponse, IdentityService, MessageEvent, ReactionEvent, RecorderService,
};
use tracker_slack::{EventEnvelope, SlackEvent};

use crate::state::IngestState;

/// Slack Events API endpoint
///
/// POST /slack/events
#[instrument(skip(state, envelope))]
pub async fn slack_events(
    State(state): State<IngestState>,
    Json(envelope): Json<EventEnvelope>,
) -> Response {
    match envelope {
        EventEnvelope::UrlVerification { challenge } => {
            info!("Answering Events API URL verification");
            Json(json!({ "challenge": challenge })).into_response()
        }
        EventEnvelope::EventCallback { token, event } => {
            if let Some(expected) = &state.config().slack.verification_token {
                if token.as_deref() != Some(expected.as_str()) {
                    warn!("Rejected event callback with bad verification token");
                    return StatusCode::UNAUTHORIZED.into_response();
                }
            }

            // Ack within Slack's deadline; the actual work happens off-request
            tokio::spawn(async move {
                process_event(state, event).await;
            });
            StatusCode::OK.into_response()
        }
        EventEnvelope::Other => StatusCode::OK.into_response(),
    }
}

/// Ingest liveness
///
/// GET /health
pub async fn health_check(State(state): State<IngestState>) -> (StatusCode, Json<HealthResponse>) {
    let db_healthy = state
        .service_context()
        .pool()
        .acquire()
        .await
        .map(|_| true)
        .unwrap_or(false);
    let slack = state.slack().map(|_| true);

    let response = HealthResponse::from_checks(db_healthy, slack);
    let status = if db_healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    (status, Json(response))
}

/// Dispatch one event to the matching service path
async fn process_event(state: IngestState, event: SlackEvent) {
    let ctx = state.service_context();

    match event {
        SlackEvent::ReactionAdded(ev) => {
            let (channel, message_ts) = ev
                .item
                .as_ref()
                .filter(|item| item.kind == "message")
                .map(|item| (item.channel.clone(), item.ts.clone()))
                .unwrap_or((None, None));

            // Find who authored the reacted-to message, best-effort
            let mut author = None;
            if let (Some(slack), Some(channel), Some(ts)) =
                (state.slack(), channel.as_deref(), message_ts.as_deref())
            {
                match slack.message_author(channel, ts).await {
                    Ok(found) => author = found,
                    Err(e) => warn!(error = %e, "Could not fetch message author"),
                }
            }

            let recorder = RecorderService::new(ctx);
            if let Err(e) = recorder
                .process_reaction(ReactionEvent {
                    user_slack_id: ev.user,
                    reaction: ev.reaction,
                    channel_slack_id: channel,
                    message_ts,
                    message_author_slack_id: author,
                })
                .await
            {
                error!(error = %e, "Failed to record reaction");
            }
        }

        SlackEvent::ReactionRemoved(ev) => {
            // Only additions are tracked; the usage log is append-only
            debug!(reaction = %ev.reaction, user = %ev.user, "Ignoring reaction removal");
        }

        SlackEvent::Message(ev) => {
            if ev.is_ignorable() {
                return;
            }
            let payload = ev.mention_payload();
            let recorder = RecorderService::new(ctx);
            if let Err(e) = recorder
                .process_message(MessageEvent {
                    user_slack_id: ev.user.unwrap_or_default(),
                    text: ev.text.unwrap_or_default(),
                    channel_slack_id: ev.channel,
                    message_ts: ev.ts,
                    payload,
                })
                .await
            {
                error!(error = %e, "Failed to record message emojis");
            }
        }

        SlackEvent::UserChange { user } => {
            let identity = IdentityService::new(ctx);
            let profile = user.profile.unwrap_or_else(|| tracker_slack::UserProfilePayload {
                email: None,
                display_name: None,
                real_name: None,
            });
            let patch = UserPatch {
                slack_id: user.id.clone(),
                email: profile.email,
                display_name: profile.display_name.filter(|n| !n.is_empty()).or(user.name),
                real_name: profile.real_name,
                is_bot: Some(user.is_bot),
            };
            if let Err(e) = identity.upsert_user(patch).await {
                error!(slack_id = %user.id, error = %e, "Failed to update user");
                return;
            }
            if user.deleted {
                if let Err(e) = identity.deactivate_user(&user.id).await {
                    error!(slack_id = %user.id, error = %e, "Failed to deactivate user");
                }
            }
        }

        SlackEvent::ChannelCreated { channel } | SlackEvent::ChannelRename { channel } => {
            let identity = IdentityService::new(ctx);
            let patch = ChannelPatch {
                slack_id: channel.id.clone(),
                name: channel.name,
                is_private: Some(channel.is_private),
                is_archived: Some(channel.is_archived),
            };
            if let Err(e) = identity.upsert_channel(patch).await {
                error!(slack_id = %channel.id, error = %e, "Failed to update channel");
            }
        }

        SlackEvent::ChannelArchive { channel } => {
            let identity = IdentityService::new(ctx);
            let patch = ChannelPatch {
                slack_id: channel.clone(),
                is_archived: Some(true),
                ..ChannelPatch::default()
            };
            if let Err(e) = identity.upsert_channel(patch).await {
                error!(slack_id = %channel, error = %e, "Failed to archive channel");
            }
        }

        SlackEvent::Other => {
            debug!("Ignoring unhandled event type");
        }
    }
}
