//! Ingest application state

use std::sync::Arc;

use tracker_common::AppConfig;
use tracker_service::ServiceContext;
use tracker_slack::SlackDirectoryClient;

/// State shared across ingest handlers
#[derive(Clone)]
pub struct IngestState {
    /// Service context containing all dependencies
    service_context: Arc<ServiceContext>,
    /// Application configuration
    config: Arc<AppConfig>,
    /// Concrete Slack client, kept for message-author lookups
    slack: Option<Arc<SlackDirectoryClient>>,
}

impl IngestState {
    /// Create a new IngestState
    pub fn new(
        service_context: ServiceContext,
        config: AppConfig,
        slack: Option<Arc<SlackDirectoryClient>>,
    ) -> Self {
        Self {
            service_context: Arc::new(service_context),
            config: Arc::new(config),
            slack,
        }
    }

    /// Get the service context
    pub fn service_context(&self) -> &ServiceContext {
        &self.service_context
    }

    /// Get the application configuration
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Get the Slack Web API client, if configured
    pub fn slack(&self) -> Option<&SlackDirectoryClient> {
        self.slack.as_deref()
    }
}

impl std::fmt::Debug for IngestState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IngestState")
            .field("service_context", &"ServiceContext")
            .field("slack", &self.slack.is_some())
            .finish()
    }
}
