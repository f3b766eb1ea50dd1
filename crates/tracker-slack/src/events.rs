//! Slack Events API payload types
//!
//! Deserialization targets for the callback envelope and the event variants
//! the ingest binary handles. Unknown envelope and event types deserialize
//! to `Other` and are ignored rather than rejected, so new Slack event types
//! never break ingestion.

use serde::Deserialize;
use serde_json::Value;

/// Top-level Events API envelope
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EventEnvelope {
    /// Endpoint ownership handshake; the challenge must be echoed back
    UrlVerification { challenge: String },
    /// An actual event delivery
    EventCallback {
        #[serde(default)]
        token: Option<String>,
        event: SlackEvent,
    },
    /// Envelope types this service does not consume
    #[serde(other)]
    Other,
}

/// Event variants inside an event_callback envelope
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SlackEvent {
    ReactionAdded(ReactionAddedEvent),
    /// Removals are observed but not tracked; history is append-only
    ReactionRemoved(ReactionRemovedEvent),
    Message(MessagePostedEvent),
    UserChange { user: UserPayload },
    ChannelCreated { channel: ChannelPayload },
    ChannelRename { channel: ChannelPayload },
    /// Archive events carry the channel id only
    ChannelArchive { channel: String },
    #[serde(other)]
    Other,
}

/// reaction_added event body
#[derive(Debug, Clone, Deserialize)]
pub struct ReactionAddedEvent {
    pub user: String,
    pub reaction: String,
    #[serde(default)]
    pub item: Option<ReactionItem>,
    #[serde(default)]
    pub event_ts: Option<String>,
}

/// reaction_removed event body (same shape as reaction_added)
#[derive(Debug, Clone, Deserialize)]
pub struct ReactionRemovedEvent {
    pub user: String,
    pub reaction: String,
    #[serde(default)]
    pub item: Option<ReactionItem>,
}

/// The message/file a reaction was attached to
#[derive(Debug, Clone, Deserialize)]
pub struct ReactionItem {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub channel: Option<String>,
    #[serde(default)]
    pub ts: Option<String>,
}

/// message event body
#[derive(Debug, Clone, Deserialize)]
pub struct MessagePostedEvent {
    #[serde(default)]
    pub user: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub channel: Option<String>,
    #[serde(default)]
    pub ts: Option<String>,
    #[serde(default)]
    pub subtype: Option<String>,
    #[serde(default)]
    pub bot_id: Option<String>,
    /// Rich-text blocks, kept raw for mention extraction
    #[serde(default)]
    pub blocks: Option<Value>,
}

impl MessagePostedEvent {
    /// Whether the message should be ignored (bot traffic or no text)
    pub fn is_ignorable(&self) -> bool {
        self.bot_id.is_some()
            || self.subtype.as_deref() == Some("bot_message")
            || self.user.is_none()
            || self.text.as_deref().is_none_or(str::is_empty)
    }

    /// The raw payload fragment holding mention-bearing blocks
    pub fn mention_payload(&self) -> Option<Value> {
        self.blocks
            .as_ref()
            .map(|blocks| serde_json::json!({ "blocks": blocks }))
    }
}

/// user_change event user body
#[derive(Debug, Clone, Deserialize)]
pub struct UserPayload {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub is_bot: bool,
    #[serde(default)]
    pub deleted: bool,
    #[serde(default)]
    pub profile: Option<UserProfilePayload>,
}

/// Nested profile block on a user payload
#[derive(Debug, Clone, Deserialize)]
pub struct UserProfilePayload {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub real_name: Option<String>,
}

/// channel_created / channel_rename event channel body
#[derive(Debug, Clone, Deserialize)]
pub struct ChannelPayload {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub is_private: bool,
    #[serde(default)]
    pub is_archived: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_verification_envelope() {
        let json = r#"{"type": "url_verification", "challenge": "abc123"}"#;
        let envelope: EventEnvelope = serde_json::from_str(json).unwrap();
        match envelope {
            EventEnvelope::UrlVerification { challenge } => assert_eq!(challenge, "abc123"),
            _ => panic!("expected url_verification"),
        }
    }

    #[test]
    fn test_reaction_added_envelope() {
        let json = r#"{
            "type": "event_callback",
            "token": "verification-token",
            "event": {
                "type": "reaction_added",
                "user": "U123",
                "reaction": "fire",
                "item": {"type": "message", "channel": "C1", "ts": "1700000000.000100"},
                "event_ts": "1700000001.000000"
            }
        }"#;
        let envelope: EventEnvelope = serde_json::from_str(json).unwrap();
        let EventEnvelope::EventCallback { token, event } = envelope else {
            panic!("expected event_callback");
        };
        assert_eq!(token.as_deref(), Some("verification-token"));
        let SlackEvent::ReactionAdded(reaction) = event else {
            panic!("expected reaction_added");
        };
        assert_eq!(reaction.user, "U123");
        assert_eq!(reaction.reaction, "fire");
        assert_eq!(reaction.item.unwrap().channel.as_deref(), Some("C1"));
    }

    #[test]
    fn test_message_event_with_blocks() {
        let json = r#"{
            "type": "message",
            "user": "U123",
            "text": "nice :fire: <@U456>",
            "channel": "C1",
            "ts": "1700000000.000100",
            "blocks": [{"type": "rich_text", "elements": []}]
        }"#;
        let event: SlackEvent = serde_json::from_str(json).unwrap();
        let SlackEvent::Message(message) = event else {
            panic!("expected message");
        };
        assert!(!message.is_ignorable());
        assert!(message.mention_payload().is_some());
    }

    #[test]
    fn test_bot_message_is_ignorable() {
        let json = r#"{
            "type": "message",
            "user": "U123",
            "text": ":fire:",
            "subtype": "bot_message"
        }"#;
        let event: SlackEvent = serde_json::from_str(json).unwrap();
        let SlackEvent::Message(message) = event else {
            panic!("expected message");
        };
        assert!(message.is_ignorable());
    }

    #[test]
    fn test_unknown_event_type_is_other() {
        let json = r#"{
            "type": "event_callback",
            "event": {"type": "app_mention", "user": "U1", "text": "hi"}
        }"#;
        let envelope: EventEnvelope = serde_json::from_str(json).unwrap();
        let EventEnvelope::EventCallback { event, .. } = envelope else {
            panic!("expected event_callback");
        };
        assert!(matches!(event, SlackEvent::Other));
    }

    #[test]
    fn test_channel_archive_carries_id_only() {
        let json = r#"{"type": "channel_archive", "channel": "C99"}"#;
        let event: SlackEvent = serde_json::from_str(json).unwrap();
        let SlackEvent::ChannelArchive { channel } = event else {
            panic!("expected channel_archive");
        };
        assert_eq!(channel, "C99");
    }
}
