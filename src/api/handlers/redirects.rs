//! Read-only introspection of the legacy redirect table.

use axum::{
    Json,
    extract::{Query, State},
};
use serde_json::json;

use crate::api::dto::redirects::{RedirectSummary, ResolveQuery, ResolveResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Summarizes the live redirect table.
///
/// # Endpoint
///
/// `GET /api/redirects`
pub async fn redirect_summary_handler(State(state): State<AppState>) -> Json<RedirectSummary> {
    let service = &state.redirect_service;

    Json(RedirectSummary {
        enabled: state.redirects_enabled,
        source: service.feed_description(),
        entries: service.snapshot().len(),
        last_load: service.last_report().map(|report| (*report).clone()),
    })
}

/// Shows what the redirect middleware would do for a path.
///
/// Evaluated against the live table whether or not the feature flag is on.
///
/// # Endpoint
///
/// `GET /api/redirects/resolve?path=/old/page%3Fq%3D1`
///
/// # Errors
///
/// Returns 400 Bad Request if `path` is empty.
pub async fn resolve_handler(
    State(state): State<AppState>,
    Query(query): Query<ResolveQuery>,
) -> Result<Json<ResolveResponse>, AppError> {
    if query.path.trim().is_empty() {
        return Err(AppError::bad_request(
            "Path must not be empty",
            json!({ "field": "path" }),
        ));
    }

    let decision = state.redirect_service.decide(&query.path);

    Ok(Json(ResolveResponse::new(query.path, decision)))
}
