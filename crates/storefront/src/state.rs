//! Application state shared across handlers.

use std::sync::Arc;

use crate::config::SiteConfig;
use crate::db::IntakeStore;
use crate::services::IntakeService;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to the
/// intake service and the static site settings.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    site: SiteConfig,
    intake: IntakeService,
}

impl AppState {
    /// Create a new application state.
    ///
    /// # Arguments
    ///
    /// * `site` - Static frontend settings
    /// * `store` - Store backing the intake service
    #[must_use]
    pub fn new(site: SiteConfig, store: Arc<dyn IntakeStore>) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                site,
                intake: IntakeService::new(store),
            }),
        }
    }

    /// Get a reference to the static site settings.
    #[must_use]
    pub fn site(&self) -> &SiteConfig {
        &self.inner.site
    }

    /// Get a reference to the intake service.
    #[must_use]
    pub fn intake(&self) -> &IntakeService {
        &self.inner.intake
    }
}
