//! Service context - dependency container for services
//!
//! Holds the repositories, the optional directory client, the emoji policy,
//! and the text extractor needed by services.

use std::sync::Arc;

use tracker_core::extract::TextExtractor;
use tracker_core::policy::EmojiPolicy;
use tracker_core::traits::{
    ChannelRepository, DirectoryClient, StatsRepository, UsageRepository, UserRepository,
};
use tracker_db::PgPool;

/// Service context containing all dependencies
///
/// This is the main dependency container that gets passed to all services.
/// It provides access to:
/// - Database repositories
/// - The optional external directory client (enrichment is disabled without it)
/// - The read-only emoji policy
/// - The compiled text extractor
#[derive(Clone)]
pub struct ServiceContext {
    // Database pool
    pool: PgPool,

    // Repositories
    user_repo: Arc<dyn UserRepository>,
    channel_repo: Arc<dyn ChannelRepository>,
    usage_repo: Arc<dyn UsageRepository>,
    stats_repo: Arc<dyn StatsRepository>,

    // External directory (best-effort enrichment)
    directory: Option<Arc<dyn DirectoryClient>>,

    // Read-only after startup
    policy: Arc<EmojiPolicy>,
    extractor: Arc<TextExtractor>,
}

impl ServiceContext {
    /// Create a new service context with all dependencies
    pub fn new(
        pool: PgPool,
        user_repo: Arc<dyn UserRepository>,
        channel_repo: Arc<dyn ChannelRepository>,
        usage_repo: Arc<dyn UsageRepository>,
        stats_repo: Arc<dyn StatsRepository>,
        directory: Option<Arc<dyn DirectoryClient>>,
        policy: Arc<EmojiPolicy>,
    ) -> Self {
        Self {
            pool,
            user_repo,
            channel_repo,
            usage_repo,
            stats_repo,
            directory,
            policy,
            extractor: Arc::new(TextExtractor::new()),
        }
    }

    // === Database Pool ===

    /// Get the PostgreSQL connection pool
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    // === Repositories ===

    /// Get the user repository
    pub fn user_repo(&self) -> &dyn UserRepository {
        self.user_repo.as_ref()
    }

    /// Get the channel repository
    pub fn channel_repo(&self) -> &dyn ChannelRepository {
        self.channel_repo.as_ref()
    }

    /// Get the usage repository
    pub fn usage_repo(&self) -> &dyn UsageRepository {
        self.usage_repo.as_ref()
    }

    /// Get the stats repository
    pub fn stats_repo(&self) -> &dyn StatsRepository {
        self.stats_repo.as_ref()
    }

    // === Collaborators ===

    /// Get the directory client, if configured
    pub fn directory(&self) -> Option<&dyn DirectoryClient> {
        self.directory.as_deref()
    }

    /// Get the emoji policy
    pub fn policy(&self) -> &EmojiPolicy {
        self.policy.as_ref()
    }

    /// Get the text extractor
    pub fn extractor(&self) -> &TextExtractor {
        self.extractor.as_ref()
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("pool", &"PgPool")
            .field("repositories", &"...")
            .field("directory", &self.directory.is_some())
            .finish()
    }
}

/// Builder for creating ServiceContext with custom configuration
pub struct ServiceContextBuilder {
    pool: Option<PgPool>,
    user_repo: Option<Arc<dyn UserRepository>>,
    channel_repo: Option<Arc<dyn ChannelRepository>>,
    usage_repo: Option<Arc<dyn UsageRepository>>,
    stats_repo: Option<Arc<dyn StatsRepository>>,
    directory: Option<Arc<dyn DirectoryClient>>,
    policy: Option<Arc<EmojiPolicy>>,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self {
            pool: None,
            user_repo: None,
            channel_repo: None,
            usage_repo: None,
            stats_repo: None,
            directory: None,
            policy: None,
        }
    }

    pub fn pool(mut self, pool: PgPool) -> Self {
        self.pool = Some(pool);
        self
    }

    pub fn user_repo(mut self, repo: Arc<dyn UserRepository>) -> Self {
        self.user_repo = Some(repo);
        self
    }

    pub fn channel_repo(mut self, repo: Arc<dyn ChannelRepository>) -> Self {
        self.channel_repo = Some(repo);
        self
    }

    pub fn usage_repo(mut self, repo: Arc<dyn UsageRepository>) -> Self {
        self.usage_repo = Some(repo);
        self
    }

    pub fn stats_repo(mut self, repo: Arc<dyn StatsRepository>) -> Self {
        self.stats_repo = Some(repo);
        self
    }

    pub fn directory(mut self, client: Arc<dyn DirectoryClient>) -> Self {
        self.directory = Some(client);
        self
    }

    pub fn policy(mut self, policy: Arc<EmojiPolicy>) -> Self {
        self.policy = Some(policy);
        self
    }

    /// Build the ServiceContext
    ///
    /// # Errors
    /// Returns `ServiceError::Validation` if any required dependency is missing
    pub fn build(self) -> super::error::ServiceResult<ServiceContext> {
        Ok(ServiceContext::new(
            self.pool
                .ok_or_else(|| super::error::ServiceError::validation("pool is required"))?,
            self.user_repo
                .ok_or_else(|| super::error::ServiceError::validation("user_repo is required"))?,
            self.channel_repo
                .ok_or_else(|| super::error::ServiceError::validation("channel_repo is required"))?,
            self.usage_repo
                .ok_or_else(|| super::error::ServiceError::validation("usage_repo is required"))?,
            self.stats_repo
                .ok_or_else(|| super::error::ServiceError::validation("stats_repo is required"))?,
            self.directory,
            self.policy.unwrap_or_default(),
        ))
    }
}

impl Default for ServiceContextBuilder {
    fn default() -> Self {
        Self::new()
    }
}
