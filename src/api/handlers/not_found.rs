//! Fallback for unmatched routes.

use axum::http::Uri;
use serde_json::json;

use crate::error::AppError;

/// Answers any route nothing else handled.
///
/// Storefront routes live in other services; a request reaching this handler
/// matched neither a legacy redirect nor a route of this service.
pub async fn not_found_handler(uri: Uri) -> AppError {
    AppError::not_found("Route not found", json!({ "path": uri.path() }))
}
