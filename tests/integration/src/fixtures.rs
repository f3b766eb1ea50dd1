//! Test fixtures
//!
//! Seeds usage data through the real write path so API reads see exactly
//! what production recording would produce.

use anyhow::Result;

use tracker_core::entities::{ChannelPatch, UsageKind, UserPatch};
use tracker_core::traits::{NewRecording, UsageRepository};
use tracker_db::{PgPool, PgUsageRepository};

/// Generate a unique external id for test isolation
pub fn unique_slack_id(prefix: &str) -> String {
    use std::sync::atomic::{AtomicU64, Ordering};
    static COUNTER: AtomicU64 = AtomicU64::new(1);
    let n = COUNTER.fetch_add(1, Ordering::SeqCst);
    format!("{prefix}API{}{n:06}", std::process::id())
}

/// One seedable occurrence
pub struct SeedUsage<'a> {
    pub actor: &'a str,
    pub emoji: &'a str,
    pub score: i32,
    pub kind: UsageKind,
    pub channel: Option<&'a str>,
    pub target: Option<&'a str>,
}

impl<'a> SeedUsage<'a> {
    pub fn message(actor: &'a str, emoji: &'a str, score: i32) -> Self {
        Self {
            actor,
            emoji,
            score,
            kind: UsageKind::Message,
            channel: None,
            target: None,
        }
    }

    pub fn reaction(actor: &'a str, emoji: &'a str, score: i32, target: &'a str) -> Self {
        Self {
            actor,
            emoji,
            score,
            kind: UsageKind::Reaction,
            channel: None,
            target: Some(target),
        }
    }

    pub fn in_channel(mut self, channel: &'a str) -> Self {
        self.channel = Some(channel);
        self
    }
}

/// Record a batch of occurrences through the atomic write unit
pub async fn seed_usage(pool: &PgPool, seeds: &[SeedUsage<'_>]) -> Result<()> {
    let repo = PgUsageRepository::new(pool.clone());

    for seed in seeds {
        repo.record(&NewRecording {
            actor: UserPatch::bare(seed.actor),
            channel: seed.channel.map(ChannelPatch::bare),
            target: seed.target.map(UserPatch::bare),
            emoji_name: seed.emoji.to_string(),
            score: seed.score,
            kind: seed.kind,
            message_ts: None,
        })
        .await?;
    }

    Ok(())
}

/// Connect to the test database and apply migrations
pub async fn test_pool() -> Result<PgPool> {
    let url = std::env::var("DATABASE_URL")?;
    let pool = PgPool::connect(&url).await?;
    tracker_db::migrate(&pool).await?;
    Ok(pool)
}
