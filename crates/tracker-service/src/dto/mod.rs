//! Data transfer objects for API responses
//!
//! Response DTOs for serializing API outputs, plus mappers from domain
//! shapes. The read API has no request bodies; query parameters are handled
//! by the API layer's extractors.

pub mod responses;

// Re-export commonly used response types
pub use responses::{
    ChannelInfo, ChannelListEntry, ChannelStatsResponse, ChannelTotalsInfo, ChannelUserStats,
    EmojiConfigResponse, EmojiStatsEntry, GlobalStatsResponse, GlobalTotalsInfo, HealthResponse,
    HistoryEntry, LeaderboardEntry, LeaderboardResponse, PaginationInfo, TotalsInfo,
    UserHistoryResponse, UserInfo, UserListEntry, UserStatsResponse,
};
