//! Directory client port - external user/channel profile lookups
//!
//! Enrichment through this port is always best-effort: callers treat any
//! error as "no enrichment data available".

use async_trait::async_trait;

use super::repositories::RepoResult;

/// User profile as reported by the external directory
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirectoryProfile {
    pub slack_id: String,
    pub email: Option<String>,
    pub display_name: Option<String>,
    pub real_name: Option<String>,
    pub is_bot: bool,
    pub deleted: bool,
}

/// Channel info as reported by the external directory
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirectoryChannel {
    pub slack_id: String,
    pub name: Option<String>,
    pub is_private: bool,
    pub is_archived: bool,
}

/// One page of a cursor-based directory listing
#[derive(Debug, Clone, Default)]
pub struct DirectoryPage<T> {
    pub items: Vec<T>,
    pub next_cursor: Option<String>,
}

#[async_trait]
pub trait DirectoryClient: Send + Sync {
    /// Fetch a single user profile
    async fn lookup_user(&self, slack_id: &str) -> RepoResult<Option<DirectoryProfile>>;

    /// List workspace users, cursor-paged
    async fn list_users(&self, cursor: Option<&str>) -> RepoResult<DirectoryPage<DirectoryProfile>>;

    /// List workspace channels, cursor-paged
    async fn list_channels(
        &self,
        cursor: Option<&str>,
    ) -> RepoResult<DirectoryPage<DirectoryChannel>>;

    /// Resolve a bare display name to an external identifier
    async fn resolve_display_name(&self, name: &str) -> RepoResult<Option<String>>;
}
