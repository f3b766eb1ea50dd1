//! Slack Web API directory client
//!
//! Implements the `DirectoryClient` port over `users.info`, `users.list`,
//! and `conversations.list`. Every call is treated as best-effort by the
//! service layer; failures map to `DomainError::DirectoryError`.

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, instrument, warn};

use tracker_core::error::DomainError;
use tracker_core::traits::{
    DirectoryChannel, DirectoryClient, DirectoryPage, DirectoryProfile, RepoResult,
};

const DEFAULT_BASE_URL: &str = "https://slack.com/api";
/// Slack caps list endpoints at 200 items per page
const PAGE_SIZE: &str = "200";

/// Directory client backed by the Slack Web API
#[derive(Clone)]
pub struct SlackDirectoryClient {
    http: Client,
    token: String,
    base_url: String,
}

impl SlackDirectoryClient {
    /// Create a client with the given bot token
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            token: token.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Override the API base URL (used by tests)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Call a Web API method and decode its envelope
    async fn call<T: DeserializeOwned>(
        &self,
        method: &str,
        params: &[(&str, &str)],
    ) -> RepoResult<T> {
        let url = format!("{}/{method}", self.base_url);

        let response = self
            .http
            .get(&url)
            .bearer_auth(&self.token)
            .query(params)
            .send()
            .await
            .map_err(|e| DomainError::DirectoryError(format!("{method}: {e}")))?;

        response
            .json::<T>()
            .await
            .map_err(|e| DomainError::DirectoryError(format!("{method}: {e}")))
    }

    /// Author of the message a reaction was attached to, if it can be found
    #[instrument(skip(self))]
    pub async fn message_author(&self, channel: &str, ts: &str) -> RepoResult<Option<String>> {
        let response: HistoryResponse = self
            .call(
                "conversations.history",
                &[
                    ("channel", channel),
                    ("latest", ts),
                    ("limit", "1"),
                    ("inclusive", "true"),
                ],
            )
            .await?;

        if !response.ok {
            debug!(
                channel,
                error = response.error.as_deref().unwrap_or("unknown"),
                "Could not fetch message for reaction target"
            );
            return Ok(None);
        }

        Ok(response
            .messages
            .into_iter()
            .next()
            .and_then(|message| message.user))
    }
}

#[async_trait]
impl DirectoryClient for SlackDirectoryClient {
    #[instrument(skip(self))]
    async fn lookup_user(&self, slack_id: &str) -> RepoResult<Option<DirectoryProfile>> {
        let response: UserInfoResponse = self.call("users.info", &[("user", slack_id)]).await?;

        if !response.ok {
            let error = response.error.unwrap_or_else(|| "unknown".to_string());
            if error == "user_not_found" {
                return Ok(None);
            }
            return Err(DomainError::DirectoryError(format!("users.info: {error}")));
        }

        Ok(response.user.map(MemberPayload::into_profile))
    }

    #[instrument(skip(self))]
    async fn list_users(&self, cursor: Option<&str>) -> RepoResult<DirectoryPage<DirectoryProfile>> {
        let mut params = vec![("limit", PAGE_SIZE)];
        if let Some(cursor) = cursor {
            params.push(("cursor", cursor));
        }

        let response: UsersListResponse = self.call("users.list", &params).await?;
        if !response.ok {
            let error = response.error.unwrap_or_else(|| "unknown".to_string());
            return Err(DomainError::DirectoryError(format!("users.list: {error}")));
        }

        Ok(DirectoryPage {
            items: response
                .members
                .into_iter()
                .map(MemberPayload::into_profile)
                .collect(),
            next_cursor: response.response_metadata.and_then(Metadata::cursor),
        })
    }

    #[instrument(skip(self))]
    async fn list_channels(
        &self,
        cursor: Option<&str>,
    ) -> RepoResult<DirectoryPage<DirectoryChannel>> {
        let mut params = vec![
            ("limit", PAGE_SIZE),
            ("types", "public_channel,private_channel"),
        ];
        if let Some(cursor) = cursor {
            params.push(("cursor", cursor));
        }

        let response: ChannelsListResponse = self.call("conversations.list", &params).await?;
        if !response.ok {
            let error = response.error.unwrap_or_else(|| "unknown".to_string());
            return Err(DomainError::DirectoryError(format!(
                "conversations.list: {error}"
            )));
        }

        Ok(DirectoryPage {
            items: response
                .channels
                .into_iter()
                .map(|channel| DirectoryChannel {
                    slack_id: channel.id,
                    name: channel.name,
                    is_private: channel.is_private,
                    is_archived: channel.is_archived,
                })
                .collect(),
            next_cursor: response.response_metadata.and_then(Metadata::cursor),
        })
    }

    /// Resolve a bare display name by scanning the member list. Matches the
    /// username, display name, or real name case-insensitively, with a
    /// substring fallback on real names.
    #[instrument(skip(self))]
    async fn resolve_display_name(&self, name: &str) -> RepoResult<Option<String>> {
        let wanted = name.to_lowercase();
        let mut cursor: Option<String> = None;
        let mut substring_match: Option<String> = None;

        loop {
            let page = self.list_users(cursor.as_deref()).await?;

            for profile in &page.items {
                if profile.deleted || profile.is_bot {
                    continue;
                }
                let display = profile.display_name.as_deref().unwrap_or("").to_lowercase();
                let real = profile.real_name.as_deref().unwrap_or("").to_lowercase();

                if display == wanted || real == wanted {
                    return Ok(Some(profile.slack_id.clone()));
                }
                if substring_match.is_none()
                    && !real.is_empty()
                    && (real.contains(&wanted) || wanted.contains(&real))
                {
                    substring_match = Some(profile.slack_id.clone());
                }
            }

            cursor = page.next_cursor;
            if cursor.is_none() {
                break;
            }
        }

        if substring_match.is_none() {
            warn!(name = %name, "Could not resolve display name");
        }
        Ok(substring_match)
    }
}

// ============================================================================
// Wire types
// ============================================================================

#[derive(Debug, Deserialize)]
struct UserInfoResponse {
    ok: bool,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    user: Option<MemberPayload>,
}

#[derive(Debug, Deserialize)]
struct UsersListResponse {
    ok: bool,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    members: Vec<MemberPayload>,
    #[serde(default)]
    response_metadata: Option<Metadata>,
}

#[derive(Debug, Deserialize)]
struct ChannelsListResponse {
    ok: bool,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    channels: Vec<ChannelListPayload>,
    #[serde(default)]
    response_metadata: Option<Metadata>,
}

#[derive(Debug, Deserialize)]
struct HistoryResponse {
    ok: bool,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    messages: Vec<HistoryMessage>,
}

#[derive(Debug, Deserialize)]
struct HistoryMessage {
    #[serde(default)]
    user: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Metadata {
    #[serde(default)]
    next_cursor: Option<String>,
}

impl Metadata {
    /// Slack signals "no more pages" with an empty cursor string
    fn cursor(self) -> Option<String> {
        self.next_cursor.filter(|cursor| !cursor.is_empty())
    }
}

#[derive(Debug, Deserialize)]
struct MemberPayload {
    id: String,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    is_bot: bool,
    #[serde(default)]
    deleted: bool,
    #[serde(default)]
    profile: Option<MemberProfilePayload>,
}

#[derive(Debug, Deserialize)]
struct MemberProfilePayload {
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    display_name: Option<String>,
    #[serde(default)]
    real_name: Option<String>,
}

impl MemberPayload {
    fn into_profile(self) -> DirectoryProfile {
        let profile = self.profile.unwrap_or(MemberProfilePayload {
            email: None,
            display_name: None,
            real_name: None,
        });
        DirectoryProfile {
            slack_id: self.id,
            email: profile.email,
            // Fall back to the account name when no display name is set
            display_name: profile.display_name.filter(|n| !n.is_empty()).or(self.name),
            real_name: profile.real_name,
            is_bot: self.is_bot,
            deleted: self.deleted,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_member_profile_display_name_fallback() {
        let member = MemberPayload {
            id: "U1".to_string(),
            name: Some("alice.account".to_string()),
            is_bot: false,
            deleted: false,
            profile: Some(MemberProfilePayload {
                email: None,
                display_name: Some(String::new()),
                real_name: Some("Alice Example".to_string()),
            }),
        };
        let profile = member.into_profile();
        assert_eq!(profile.display_name.as_deref(), Some("alice.account"));
        assert_eq!(profile.real_name.as_deref(), Some("Alice Example"));
    }

    #[test]
    fn test_empty_cursor_means_done() {
        let metadata = Metadata {
            next_cursor: Some(String::new()),
        };
        assert!(metadata.cursor().is_none());

        let metadata = Metadata {
            next_cursor: Some("dXNlcjpVMDYxTkZUVDI=".to_string()),
        };
        assert_eq!(metadata.cursor().as_deref(), Some("dXNlcjpVMDYxTkZUVDI="));
    }

    #[test]
    fn test_client_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<SlackDirectoryClient>();
    }
}
