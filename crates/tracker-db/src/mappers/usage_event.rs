//! Usage event entity <-> model mapper

use tracker_core::entities::{UsageEvent, UsageKind};
use tracker_core::traits::EmojiTally;

use crate::models::{EmojiTallyModel, EmojiUsageModel};

/// Convert EmojiUsageModel to UsageEvent entity
impl From<EmojiUsageModel> for UsageEvent {
    fn from(model: EmojiUsageModel) -> Self {
        UsageEvent {
            id: model.id,
            user_id: model.user_id,
            channel_id: model.channel_id,
            emoji_name: model.emoji_name,
            emoji_score: model.emoji_score,
            usage_kind: UsageKind::from(model.usage_kind.as_str()),
            message_ts: model.message_ts,
            target_user_id: model.target_user_id,
            created_at: model.created_at,
        }
    }
}

/// Convert an emoji tally projection row to its domain shape
impl From<EmojiTallyModel> for EmojiTally {
    fn from(model: EmojiTallyModel) -> Self {
        EmojiTally {
            emoji: model.emoji_name,
            count: model.count,
            score: model.score,
        }
    }
}
