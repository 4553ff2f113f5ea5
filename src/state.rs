//! Shared application state injected into every handler.

use std::sync::Arc;

use crate::store::PageStore;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn PageStore>,
    /// Public origin used for absolute links (sitemap)
    pub site_url: String,
}

impl AppState {
    pub fn new(store: Arc<dyn PageStore>, site_url: impl Into<String>) -> Self {
        Self {
            store,
            site_url: site_url.into().trim_end_matches('/').to_string(),
        }
    }
}
