//! Shared state injected into handlers and middleware.

use std::sync::Arc;

use crate::application::services::RedirectService;

/// Application state cloned into every request.
///
/// The redirect table itself is not stored here: handlers reach it through
/// [`RedirectService`], which hands out an immutable snapshot per request.
#[derive(Clone)]
pub struct AppState {
    pub redirect_service: Arc<RedirectService>,
    /// Feature flag gating the legacy redirect middleware.
    pub redirects_enabled: bool,
}

impl AppState {
    pub fn new(redirect_service: Arc<RedirectService>, redirects_enabled: bool) -> Self {
        Self {
            redirect_service,
            redirects_enabled,
        }
    }
}
