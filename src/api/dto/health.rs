//! DTOs for health check endpoint.

use serde::Serialize;

/// Health check response with component status.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub checks: HealthChecks,
}

/// Health status for each system component.
#[derive(Debug, Serialize)]
pub struct HealthChecks {
    pub redirects: RedirectCheck,
}

/// Health status of the legacy redirect table.
#[derive(Debug, Serialize)]
pub struct RedirectCheck {
    pub status: String,
    pub enabled: bool,
    pub entries: usize,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}
