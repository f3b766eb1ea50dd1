//! Text extraction - emoji tokens and user mentions in message text
//!
//! Pure pattern matching over raw text plus an optional structured rich-text
//! payload. Display-name resolution needs the directory and lives in the
//! service layer; this module only surfaces the candidate names.

use regex::Regex;
use serde_json::Value;

/// Extractor holding the compiled patterns
#[derive(Debug)]
pub struct TextExtractor {
    emoji: Regex,
    canonical_mention: Regex,
    display_mention: Regex,
}

impl TextExtractor {
    pub fn new() -> Self {
        Self {
            emoji: Regex::new(r":([a-zA-Z0-9_+-]+):").expect("valid emoji pattern"),
            canonical_mention: Regex::new(r"<@([A-Z0-9]+)(?:\|[^>]+)?>")
                .expect("valid mention pattern"),
            display_mention: Regex::new(r"@([a-zA-Z0-9._-]+)").expect("valid display pattern"),
        }
    }

    /// Emoji names appearing as `:name:` tokens, in order, duplicates kept.
    /// Each occurrence is tracked separately.
    pub fn emoji_tokens(&self, text: &str) -> Vec<String> {
        self.emoji
            .captures_iter(text)
            .map(|cap| cap[1].to_string())
            .collect()
    }

    /// User ids from canonical `<@ID>` / `<@ID|label>` mentions, in order
    pub fn canonical_mentions(&self, text: &str) -> Vec<String> {
        self.canonical_mention
            .captures_iter(text)
            .map(|cap| cap[1].to_string())
            .collect()
    }

    /// Bare `@name` tokens remaining after canonical mentions are removed.
    /// These are candidates for directory resolution, not ids.
    pub fn display_mentions(&self, text: &str) -> Vec<String> {
        let without_canonical = self.canonical_mention.replace_all(text, "");
        self.display_mention
            .captures_iter(&without_canonical)
            .map(|cap| cap[1].to_string())
            .collect()
    }

    /// User ids from the structured payload and the canonical text syntax,
    /// deduplicated with first-seen order preserved. The payload is walked
    /// first (most reliable source); malformed shapes are skipped.
    pub fn mentioned_users(&self, text: &str, payload: Option<&Value>) -> Vec<String> {
        let mut ids = Vec::new();
        if let Some(payload) = payload {
            ids.extend(payload_mentions(payload));
        }
        ids.extend(self.canonical_mentions(text));
        dedup_preserve_order(ids)
    }
}

impl Default for TextExtractor {
    fn default() -> Self {
        Self::new()
    }
}

/// Remove duplicates while preserving first occurrence
pub fn dedup_preserve_order(ids: Vec<String>) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    ids.into_iter().filter(|id| seen.insert(id.clone())).collect()
}

/// Walk a rich-text event payload for explicit user-mention nodes.
///
/// Handles `blocks -> rich_text -> rich_text_section -> user` nodes plus the
/// looser `mentions` / `user_mentions` fields some events carry. Anything
/// with an unexpected shape is ignored.
fn payload_mentions(payload: &Value) -> Vec<String> {
    let mut ids = Vec::new();

    if let Some(blocks) = payload.get("blocks").and_then(Value::as_array) {
        for block in blocks {
            if block.get("type").and_then(Value::as_str) != Some("rich_text") {
                continue;
            }
            let Some(elements) = block.get("elements").and_then(Value::as_array) else {
                continue;
            };
            for element in elements {
                if element.get("type").and_then(Value::as_str) != Some("rich_text_section") {
                    continue;
                }
                let Some(section) = element.get("elements").and_then(Value::as_array) else {
                    continue;
                };
                for node in section {
                    if node.get("type").and_then(Value::as_str) == Some("user") {
                        if let Some(user_id) = node.get("user_id").and_then(Value::as_str) {
                            ids.push(user_id.to_string());
                        }
                    }
                }
            }
        }
    }

    if let Some(mentions) = payload.get("mentions").and_then(Value::as_array) {
        for mention in mentions {
            match mention {
                Value::String(id) => ids.push(id.clone()),
                Value::Object(obj) => {
                    if let Some(id) = obj.get("user").and_then(Value::as_str) {
                        ids.push(id.to_string());
                    }
                }
                _ => {}
            }
        }
    }

    if let Some(user_mentions) = payload.get("user_mentions").and_then(Value::as_array) {
        for mention in user_mentions {
            if let Some(id) = mention.as_str() {
                ids.push(id.to_string());
            }
        }
    }

    ids
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_emoji_tokens() {
        let extractor = TextExtractor::new();
        assert_eq!(
            extractor.emoji_tokens("great :fire: job :100:"),
            vec!["fire", "100"]
        );
    }

    #[test]
    fn test_emoji_tokens_duplicates_preserved() {
        let extractor = TextExtractor::new();
        assert_eq!(
            extractor.emoji_tokens(":clap: :clap: :tada:"),
            vec!["clap", "clap", "tada"]
        );
    }

    #[test]
    fn test_emoji_tokens_allowed_characters() {
        let extractor = TextExtractor::new();
        assert_eq!(
            extractor.emoji_tokens("nice :+1: and :man-bowing:"),
            vec!["+1", "man-bowing"]
        );
        assert!(extractor.emoji_tokens("plain text, no tokens").is_empty());
    }

    #[test]
    fn test_canonical_mentions() {
        let extractor = TextExtractor::new();
        assert_eq!(
            extractor.mentioned_users("hi <@U123> and <@U456|bob>", None),
            vec!["U123", "U456"]
        );
    }

    #[test]
    fn test_mentions_deduplicated_first_seen_order() {
        let extractor = TextExtractor::new();
        assert_eq!(
            extractor.mentioned_users("<@U2> <@U1> <@U2>", None),
            vec!["U2", "U1"]
        );
    }

    #[test]
    fn test_display_mentions_exclude_canonical() {
        let extractor = TextExtractor::new();
        let names = extractor.display_mentions("ping <@U123|alice> and @bob");
        assert_eq!(names, vec!["bob"]);
    }

    #[test]
    fn test_payload_mentions_walked_first() {
        let extractor = TextExtractor::new();
        let payload = json!({
            "blocks": [{
                "type": "rich_text",
                "elements": [{
                    "type": "rich_text_section",
                    "elements": [
                        {"type": "user", "user_id": "U999"},
                        {"type": "text", "text": " hello "},
                    ]
                }]
            }]
        });
        assert_eq!(
            extractor.mentioned_users("also <@U123>", Some(&payload)),
            vec!["U999", "U123"]
        );
    }

    #[test]
    fn test_malformed_payload_skipped() {
        let extractor = TextExtractor::new();
        let payload = json!({"blocks": "not-an-array", "mentions": 42});
        assert_eq!(
            extractor.mentioned_users("<@U123>", Some(&payload)),
            vec!["U123"]
        );
    }

    #[test]
    fn test_loose_mention_fields() {
        let extractor = TextExtractor::new();
        let payload = json!({
            "mentions": ["U1", {"user": "U2"}],
            "user_mentions": ["U3"]
        });
        assert_eq!(
            extractor.mentioned_users("", Some(&payload)),
            vec!["U1", "U2", "U3"]
        );
    }
}
