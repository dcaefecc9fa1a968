//! API route configuration.

use crate::api::handlers::{redirect_summary_handler, resolve_handler};
use crate::state::AppState;
use axum::{Router, routing::get};

/// Read-only redirect introspection routes.
///
/// # Endpoints
///
/// - `GET /redirects`                 - Live table summary and last load report
/// - `GET /redirects/resolve?path=…`  - Decision the middleware would take for a path
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/redirects", get(redirect_summary_handler))
        .route("/redirects/resolve", get(resolve_handler))
}
