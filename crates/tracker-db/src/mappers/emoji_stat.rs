//! Aggregate entity <-> model mapper

use tracker_core::entities::EmojiStat;
use tracker_core::traits::UsageTotals;

use crate::models::{EmojiStatModel, UsageTotalsModel};

/// Convert EmojiStatModel to EmojiStat entity
impl From<EmojiStatModel> for EmojiStat {
    fn from(model: EmojiStatModel) -> Self {
        EmojiStat {
            id: model.id,
            user_id: model.user_id,
            emoji_name: model.emoji_name,
            given_count: model.given_count,
            given_score: model.given_score,
            received_count: model.received_count,
            received_score: model.received_score,
            first_used: model.first_used,
            last_used: model.last_used,
            updated_at: model.updated_at,
        }
    }
}

/// Convert a totals projection row to its domain shape
impl From<UsageTotalsModel> for UsageTotals {
    fn from(model: UsageTotalsModel) -> Self {
        UsageTotals {
            given_count: model.given_count,
            given_score: model.given_score,
            received_count: model.received_count,
            received_score: model.received_score,
        }
    }
}
