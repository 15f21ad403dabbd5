//! Application state shared across handlers.

use std::sync::Arc;

use crate::{config::AdminConfig, reports::ReportsService, shopify::AdminClient};

/// Application state shared across all handlers.
///
/// The Shopify client handle is created once at startup and cloned into each
/// request; there is no per-request construction and no shared mutable state.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: AdminConfig,
    shopify: AdminClient,
    reports: ReportsService,
}

impl AppState {
    /// Build the state from loaded configuration.
    #[must_use]
    pub fn new(config: AdminConfig) -> Self {
        let shopify = AdminClient::new(&config.shopify);
        Self {
            inner: Arc::new(AppStateInner {
                config,
                shopify,
                reports: ReportsService::new(),
            }),
        }
    }

    /// The loaded configuration.
    #[must_use]
    pub fn config(&self) -> &AdminConfig {
        &self.inner.config
    }

    /// The shared Shopify Admin API client.
    #[must_use]
    pub fn shopify(&self) -> &AdminClient {
        &self.inner.shopify
    }

    /// The reports data source.
    #[must_use]
    pub fn reports(&self) -> &ReportsService {
        &self.inner.reports
    }
}
