//! Emoji policy - maps emoji names to point scores
//!
//! Loaded once at startup from a declarative configuration resource and
//! read-only afterwards. A score of exactly 0 means "do not record this
//! occurrence at all".

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Configured entry for a single emoji
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmojiSpec {
    #[serde(default = "default_score")]
    pub score: i32,
    #[serde(default)]
    pub description: Option<String>,
}

/// Global policy settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicySettings {
    #[serde(default = "default_score")]
    pub default_score: i32,
    #[serde(default)]
    pub track_all_emojis: bool,
    #[serde(default)]
    pub case_sensitive: bool,
}

impl Default for PolicySettings {
    fn default() -> Self {
        Self {
            default_score: default_score(),
            track_all_emojis: false,
            case_sensitive: false,
        }
    }
}

fn default_score() -> i32 {
    1
}

/// Static emoji-name -> score lookup plus global settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmojiPolicy {
    emojis: HashMap<String, EmojiSpec>,
    settings: PolicySettings,
}

impl EmojiPolicy {
    /// Build a policy from a configured table and settings.
    ///
    /// In case-insensitive mode (the default) table keys are lowercased so a
    /// lookup for any casing of a configured name hits the same entry.
    pub fn new(emojis: HashMap<String, EmojiSpec>, settings: PolicySettings) -> Self {
        let emojis = if settings.case_sensitive {
            emojis
        } else {
            emojis
                .into_iter()
                .map(|(name, spec)| (name.to_lowercase(), spec))
                .collect()
        };
        Self { emojis, settings }
    }

    /// Strip surrounding colons and apply case folding
    pub fn normalize(&self, name: &str) -> String {
        let trimmed = name.trim_matches(':');
        if self.settings.case_sensitive {
            trimmed.to_string()
        } else {
            trimmed.to_lowercase()
        }
    }

    /// Score for an emoji name; 0 means "not tracked"
    pub fn score_of(&self, name: &str) -> i32 {
        let name = self.normalize(name);

        if let Some(spec) = self.emojis.get(&name) {
            return spec.score;
        }

        if self.settings.track_all_emojis {
            return self.settings.default_score;
        }

        0
    }

    /// Whether an occurrence of this emoji should be recorded
    pub fn is_tracked(&self, name: &str) -> bool {
        self.score_of(name) != 0
    }

    /// The full configured emoji table
    pub fn emojis(&self) -> &HashMap<String, EmojiSpec> {
        &self.emojis
    }

    /// The global settings
    pub fn settings(&self) -> &PolicySettings {
        &self.settings
    }
}

impl Default for EmojiPolicy {
    /// Built-in policy used when no configuration resource is present
    fn default() -> Self {
        let mut emojis = HashMap::new();
        emojis.insert(
            "thumbsup".to_string(),
            EmojiSpec {
                score: 1,
                description: Some("Positive reaction".to_string()),
            },
        );
        Self::new(emojis, PolicySettings::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn policy_with(entries: &[(&str, i32)], settings: PolicySettings) -> EmojiPolicy {
        let emojis = entries
            .iter()
            .map(|(name, score)| {
                (
                    (*name).to_string(),
                    EmojiSpec {
                        score: *score,
                        description: None,
                    },
                )
            })
            .collect();
        EmojiPolicy::new(emojis, settings)
    }

    #[test]
    fn test_configured_score() {
        let policy = policy_with(&[("fire", 3)], PolicySettings::default());
        assert_eq!(policy.score_of("fire"), 3);
        assert!(policy.is_tracked("fire"));
    }

    #[test]
    fn test_colon_and_case_normalization() {
        let policy = policy_with(&[("rocket", 2)], PolicySettings::default());
        assert_eq!(policy.score_of("rocket"), 2);
        assert_eq!(policy.score_of("ROCKET"), 2);
        assert_eq!(policy.score_of(":rocket:"), 2);
    }

    #[test]
    fn test_case_sensitive_mode() {
        let settings = PolicySettings {
            case_sensitive: true,
            ..PolicySettings::default()
        };
        let policy = policy_with(&[("Rocket", 2)], settings);
        assert_eq!(policy.score_of("Rocket"), 2);
        assert_eq!(policy.score_of("rocket"), 0);
    }

    #[test]
    fn test_unlisted_emoji_not_tracked_by_default() {
        let policy = policy_with(&[("fire", 3)], PolicySettings::default());
        assert_eq!(policy.score_of("snail"), 0);
        assert!(!policy.is_tracked("snail"));
    }

    #[test]
    fn test_track_all_emojis_uses_default_score() {
        let settings = PolicySettings {
            default_score: 5,
            track_all_emojis: true,
            ..PolicySettings::default()
        };
        let policy = policy_with(&[("fire", 3)], settings);
        assert_eq!(policy.score_of("snail"), 5);
        assert_eq!(policy.score_of("fire"), 3);
    }

    #[test]
    fn test_default_policy() {
        let policy = EmojiPolicy::default();
        assert_eq!(policy.score_of("thumbsup"), 1);
        assert!(!policy.settings().track_all_emojis);
    }
}
