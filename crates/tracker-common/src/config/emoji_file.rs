//! Emoji policy resource loading
//!
//! The policy is a small JSON document: a name -> {score, description} table
//! plus global settings. A missing file is not an error; the built-in default
//! policy is used instead. A file that exists but does not parse is a
//! configuration error.

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;
use tracing::{info, warn};

use tracker_core::policy::{EmojiPolicy, EmojiSpec, PolicySettings};

use super::app_config::ConfigError;

/// On-disk shape of the policy resource
#[derive(Debug, Deserialize)]
struct EmojiFile {
    #[serde(default)]
    emojis: HashMap<String, EmojiSpec>,
    #[serde(default)]
    settings: PolicySettings,
}

/// Load the emoji policy from a JSON file path
pub fn load_emoji_policy(path: impl AsRef<Path>) -> Result<EmojiPolicy, ConfigError> {
    let path = path.as_ref();

    let raw = match std::fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            warn!(path = %path.display(), "Emoji config not found, using built-in defaults");
            return Ok(EmojiPolicy::default());
        }
        Err(e) => {
            return Err(ConfigError::UnreadableFile {
                path: path.display().to_string(),
                source: e,
            })
        }
    };

    let file: EmojiFile = serde_json::from_str(&raw).map_err(|e| ConfigError::MalformedFile {
        path: path.display().to_string(),
        source: e,
    })?;

    info!(
        path = %path.display(),
        emojis = file.emojis.len(),
        track_all = file.settings.track_all_emojis,
        "Emoji policy loaded"
    );

    Ok(EmojiPolicy::new(file.emojis, file.settings))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_missing_file_falls_back_to_default() {
        let policy = load_emoji_policy("/nonexistent/emoji_config.json").unwrap();
        assert_eq!(policy.score_of("thumbsup"), 1);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile_path("emoji_ok.json");
        writeln!(
            file.1,
            r#"{{
                "emojis": {{"fire": {{"score": 3, "description": "Hot"}}}},
                "settings": {{"default_score": 2, "track_all_emojis": true, "case_sensitive": false}}
            }}"#
        )
        .unwrap();

        let policy = load_emoji_policy(&file.0).unwrap();
        assert_eq!(policy.score_of("fire"), 3);
        assert_eq!(policy.score_of("anything"), 2);
        std::fs::remove_file(&file.0).ok();
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let mut file = tempfile_path("emoji_bad.json");
        writeln!(file.1, "{{ not json").unwrap();

        let err = load_emoji_policy(&file.0).unwrap_err();
        assert!(matches!(err, ConfigError::MalformedFile { .. }));
        std::fs::remove_file(&file.0).ok();
    }

    fn tempfile_path(name: &str) -> (std::path::PathBuf, std::fs::File) {
        let path = std::env::temp_dir().join(format!("tracker-{}-{name}", std::process::id()));
        let file = std::fs::File::create(&path).unwrap();
        (path, file)
    }
}
