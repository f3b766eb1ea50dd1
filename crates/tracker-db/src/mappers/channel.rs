//! Channel entity <-> model mapper

use tracker_core::entities::Channel;

use crate::models::ChannelModel;

/// Convert ChannelModel to Channel entity
impl From<ChannelModel> for Channel {
    fn from(model: ChannelModel) -> Self {
        Channel {
            id: model.id,
            slack_id: model.slack_id,
            name: model.name,
            is_private: model.is_private,
            is_archived: model.is_archived,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
