//! Legacy URL redirect middleware.

use axum::{
    extract::{Request, State},
    http::{HeaderValue, StatusCode, header},
    middleware::Next,
    response::{IntoResponse, Response},
};
use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};
use tracing::{debug, warn};

use crate::domain::normalize::is_hex_escape;
use crate::domain::{Decision, Resolution};
use crate::state::AppState;

/// Characters escaped in the path part of a `Location` header.
///
/// `%` is handled separately: a `%XX` escape a target kept from its raw form
/// stays as is, any other `%` becomes `%25`.
const LOCATION_PATH: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'<')
    .add(b'>')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Redirects requests for legacy paths to their current location.
///
/// # Behavior
///
/// - Feature flag off: every request passes straight to the next handler
/// - No rule, self-redirect, two-way loop or redundant target: passes through
/// - Otherwise: `301 Moved Permanently` with `Location` set to the resolved
///   target followed by the request's query string, byte for byte
///
/// Chains are collapsed to their terminal target. A cyclic or overlong chain
/// redirects one hop to the rule's direct target.
///
/// The decision reads the raw path and query from the request URI and uses a
/// snapshot of the table taken for this request only.
///
/// # Example
///
/// ```rust,ignore
/// let app = Router::new()
///     .route("/health", get(health_handler))
///     .layer(middleware::from_fn_with_state(state.clone(), legacy_redirect::layer));
/// ```
pub async fn layer(State(st): State<AppState>, req: Request, next: Next) -> Response {
    if !st.redirects_enabled {
        return next.run(req).await;
    }

    let uri = req.uri();
    let raw = uri
        .path_and_query()
        .map(|pq| pq.as_str())
        .unwrap_or_else(|| uri.path());

    let decision = st.redirect_service.decide(raw);

    let (location, resolution) = match decision {
        Decision::Continue(reason) => {
            metrics::counter!("legacy_redirects_passthrough_total", "reason" => reason.label())
                .increment(1);
            return next.run(req).await;
        }
        Decision::Redirect {
            location,
            resolution,
        } => (location, resolution),
    };

    if !resolution.is_safe() {
        warn!(
            path = %req.uri().path(),
            kind = resolution.label(),
            "Unsafe redirect chain, redirecting one hop to {}",
            location
        );
        metrics::counter!("legacy_redirects_unsafe_chain_total", "kind" => resolution.label())
            .increment(1);
    }

    let Some(value) = location_header(&location) else {
        warn!("Redirect target {:?} is not a valid Location, passing through", location);
        metrics::counter!("legacy_redirects_passthrough_total", "reason" => "invalid_location")
            .increment(1);
        return next.run(req).await;
    };

    debug!(
        from = %req.uri(),
        to = %location,
        terminal = matches!(resolution, Resolution::Terminal(_)),
        "Legacy redirect"
    );
    metrics::counter!("legacy_redirects_issued_total").increment(1);

    (StatusCode::MOVED_PERMANENTLY, [(header::LOCATION, value)]).into_response()
}

/// Builds a `Location` header value, escaping the path and keeping the query
/// exactly as received.
fn location_header(location: &str) -> Option<HeaderValue> {
    let (path, query) = match location.find('?') {
        Some(idx) => location.split_at(idx),
        None => (location, ""),
    };

    let path = escape_stray_percent(path);
    let encoded = format!("{}{}", utf8_percent_encode(&path, LOCATION_PATH), query);
    HeaderValue::from_str(&encoded).ok()
}

/// Rewrites every `%` that does not start a `%XX` escape as `%25`.
fn escape_stray_percent(path: &str) -> String {
    let bytes = path.as_bytes();
    let mut out = String::with_capacity(path.len());
    for (i, ch) in path.char_indices() {
        if ch == '%' && !is_hex_escape(bytes, i) {
            out.push_str("%25");
        } else {
            out.push(ch);
        }
    }
    out
}
