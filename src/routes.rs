//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET  /health`  - Health check: redirect table status (public)
//! - `/api/*`        - Read-only redirect introspection
//! - anything else   - `404 not_found` JSON
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging (outermost)
//! - **Legacy redirects** - 301 for paths listed in the redirect feed, applied
//!   to every route including the fallback

use crate::api;
use crate::api::handlers::{health_handler, not_found_handler};
use crate::api::middleware::{legacy_redirect, tracing};
use crate::state::AppState;
use axum::routing::get;
use axum::{Router, middleware};

/// Constructs the application router with all routes and middleware.
pub fn app_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .nest("/api", api::routes::routes())
        .fallback(not_found_handler)
        .layer(middleware::from_fn_with_state(
            state.clone(),
            legacy_redirect::layer,
        ))
        .layer(tracing::layer())
        .with_state(state)
}
