//! User entity <-> model mapper

use tracker_core::entities::User;
use tracker_core::traits::{LeaderboardRow, UsageTotals, UserTally};

use crate::models::{LeaderboardRowModel, UserModel, UserTallyModel};

/// Convert UserModel to User entity
impl From<UserModel> for User {
    fn from(model: UserModel) -> Self {
        User {
            id: model.id,
            slack_id: model.slack_id,
            email: model.email,
            display_name: model.display_name,
            real_name: model.real_name,
            is_bot: model.is_bot,
            is_active: model.is_active,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

/// Convert a leaderboard projection row to its domain shape
impl From<LeaderboardRowModel> for LeaderboardRow {
    fn from(model: LeaderboardRowModel) -> Self {
        LeaderboardRow {
            user: User {
                id: model.id,
                slack_id: model.slack_id,
                email: model.email,
                display_name: model.display_name,
                real_name: model.real_name,
                is_bot: model.is_bot,
                is_active: model.is_active,
                created_at: model.created_at,
                updated_at: model.updated_at,
            },
            totals: UsageTotals {
                given_count: model.given_count,
                given_score: model.given_score,
                received_count: model.received_count,
                received_score: model.received_score,
            },
        }
    }
}

/// Convert a channel user tally row to its domain shape
impl From<UserTallyModel> for UserTally {
    fn from(model: UserTallyModel) -> Self {
        UserTally {
            user: User {
                id: model.id,
                slack_id: model.slack_id,
                email: model.email,
                display_name: model.display_name,
                real_name: model.real_name,
                is_bot: model.is_bot,
                is_active: model.is_active,
                created_at: model.created_at,
                updated_at: model.updated_at,
            },
            count: model.count,
            score: model.score,
        }
    }
}
