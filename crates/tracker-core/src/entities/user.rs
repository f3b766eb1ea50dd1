//! User entity - represents a workspace member

use chrono::{DateTime, Utc};

/// User entity keyed by the stable Slack identifier
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: i64,
    pub slack_id: String,
    pub email: Option<String>,
    pub display_name: Option<String>,
    pub real_name: Option<String>,
    pub is_bot: bool,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Best available human-readable name
    pub fn name(&self) -> &str {
        self.display_name
            .as_deref()
            .or(self.real_name.as_deref())
            .unwrap_or(&self.slack_id)
    }
}

/// Profile fields supplied to a user upsert.
///
/// `None` fields never overwrite a stored value; only explicitly supplied
/// fields are written.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserPatch {
    pub slack_id: String,
    pub email: Option<String>,
    pub display_name: Option<String>,
    pub real_name: Option<String>,
    pub is_bot: Option<bool>,
}

impl UserPatch {
    /// Patch carrying only the external identifier
    pub fn bare(slack_id: impl Into<String>) -> Self {
        Self {
            slack_id: slack_id.into(),
            ..Self::default()
        }
    }

    /// Merge another patch into this one; fields already set here win
    pub fn or(mut self, other: UserPatch) -> Self {
        self.email = self.email.or(other.email);
        self.display_name = self.display_name.or(other.display_name);
        self.real_name = self.real_name.or(other.real_name);
        self.is_bot = self.is_bot.or(other.is_bot);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_falls_back_to_slack_id() {
        let user = User {
            id: 1,
            slack_id: "U123".to_string(),
            email: None,
            display_name: None,
            real_name: None,
            is_bot: false,
            is_active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        assert_eq!(user.name(), "U123");
    }

    #[test]
    fn test_name_prefers_display_name() {
        let user = User {
            id: 1,
            slack_id: "U123".to_string(),
            email: None,
            display_name: Some("alice".to_string()),
            real_name: Some("Alice Example".to_string()),
            is_bot: false,
            is_active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        assert_eq!(user.name(), "alice");
    }

    #[test]
    fn test_patch_merge_prefers_existing_fields() {
        let explicit = UserPatch {
            slack_id: "U1".to_string(),
            display_name: Some("explicit".to_string()),
            ..UserPatch::default()
        };
        let enriched = UserPatch {
            slack_id: "U1".to_string(),
            display_name: Some("from-directory".to_string()),
            email: Some("a@example.com".to_string()),
            ..UserPatch::default()
        };

        let merged = explicit.or(enriched);
        assert_eq!(merged.display_name.as_deref(), Some("explicit"));
        assert_eq!(merged.email.as_deref(), Some("a@example.com"));
    }
}
