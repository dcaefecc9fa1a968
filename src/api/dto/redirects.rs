//! DTOs for redirect table introspection.

use serde::{Deserialize, Serialize};

use crate::domain::{Decision, LoadReport};

/// Query parameters for `GET /api/redirects/resolve`.
#[derive(Debug, Deserialize)]
pub struct ResolveQuery {
    /// Raw request path, optionally with a query string.
    pub path: String,
}

/// Summary of the live table.
#[derive(Debug, Serialize)]
pub struct RedirectSummary {
    pub enabled: bool,
    pub source: String,
    pub entries: usize,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_load: Option<LoadReport>,
}

/// What the middleware would do for a path.
#[derive(Debug, Serialize)]
pub struct ResolveResponse {
    pub path: String,
    /// `redirect` or `continue`.
    pub action: &'static str,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,

    /// Chain outcome for redirects, pass-through reason otherwise.
    pub reason: &'static str,
}

impl ResolveResponse {
    pub fn new(path: String, decision: Decision) -> Self {
        match decision {
            Decision::Continue(reason) => Self {
                path,
                action: "continue",
                location: None,
                reason: reason.label(),
            },
            Decision::Redirect {
                location,
                resolution,
            } => Self {
                path,
                action: "redirect",
                location: Some(location),
                reason: resolution.label(),
            },
        }
    }
}
