//! Handler for health check endpoint.

use axum::{Json, extract::State, http::StatusCode};

use crate::api::dto::health::{HealthChecks, HealthResponse, RedirectCheck};
use crate::state::AppState;

/// Returns service health status with component checks.
///
/// # Endpoint
///
/// `GET /health`
///
/// # Response Codes
///
/// - **200 OK**: Redirects disabled, or the table has been loaded
/// - **503 Service Unavailable**: Redirects enabled but no load has succeeded yet
///
/// # Response
///
/// ```json
/// {
///   "status": "healthy",
///   "version": "0.1.0",
///   "checks": {
///     "redirects": {
///       "status": "ok",
///       "enabled": true,
///       "entries": 1832,
///       "message": "Loaded from csv:data/redirects.csv"
///     }
///   }
/// }
/// ```
pub async fn health_handler(
    State(state): State<AppState>,
) -> Result<Json<HealthResponse>, (StatusCode, Json<HealthResponse>)> {
    let redirect_check = check_redirects(&state);
    let healthy = redirect_check.status == "ok";

    let response = HealthResponse {
        status: if healthy { "healthy" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        checks: HealthChecks {
            redirects: redirect_check,
        },
    };

    if healthy {
        Ok(Json(response))
    } else {
        Err((StatusCode::SERVICE_UNAVAILABLE, Json(response)))
    }
}

/// Checks whether the redirect table finished loading.
fn check_redirects(state: &AppState) -> RedirectCheck {
    let service = &state.redirect_service;
    let entries = service.snapshot().len();

    if !state.redirects_enabled {
        return RedirectCheck {
            status: "ok".to_string(),
            enabled: false,
            entries,
            message: Some("Legacy redirects disabled".to_string()),
        };
    }

    match service.last_report() {
        Some(_) => RedirectCheck {
            status: "ok".to_string(),
            enabled: true,
            entries,
            message: Some(format!("Loaded from {}", service.feed_description())),
        },
        None => RedirectCheck {
            status: "loading".to_string(),
            enabled: true,
            entries,
            message: Some(format!(
                "No table loaded yet from {}",
                service.feed_description()
            )),
        },
    }
}
