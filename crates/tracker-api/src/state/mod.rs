//! Shared handler state

use std::sync::Arc;

use tracker_common::AppConfig;
use tracker_service::ServiceContext;

struct Inner {
    services: ServiceContext,
    config: AppConfig,
}

/// Cheap-to-clone handle to the service context and configuration,
/// shared by every handler
#[derive(Clone)]
pub struct AppState {
    inner: Arc<Inner>,
}

impl AppState {
    pub fn new(services: ServiceContext, config: AppConfig) -> Self {
        Self {
            inner: Arc::new(Inner { services, config }),
        }
    }

    /// The dependency container services are built from
    pub fn service_context(&self) -> &ServiceContext {
        &self.inner.services
    }

    /// The loaded application configuration
    pub fn config(&self) -> &AppConfig {
        &self.inner.config
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState").finish_non_exhaustive()
    }
}
