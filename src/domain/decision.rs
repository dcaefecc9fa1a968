//! Per-request redirect decision.
//!
//! [`decide`] is the whole request-time algorithm, free of HTTP types so it
//! can be exercised with fixture tables and reused by the admin CLI. The axum
//! middleware in [`crate::api::middleware::legacy_redirect`] only adds the
//! feature flag and the response.

use super::normalize::{normalize_key, normalize_target, strip_query_and_trailing_slash};
use super::resolver::{Resolution, resolve};
use super::table::RedirectTable;

/// Why a request was let through untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PassThrough {
    /// No table entry for the request's key.
    NoRule,
    /// The direct target is the requested path.
    SelfRedirect,
    /// The direct target maps straight back to the requested path.
    TwoWayLoop,
    /// The resolved target is the requested path.
    Redundant,
}

impl PassThrough {
    pub fn label(&self) -> &'static str {
        match self {
            Self::NoRule => "no_rule",
            Self::SelfRedirect => "self_redirect",
            Self::TwoWayLoop => "two_way_loop",
            Self::Redundant => "redundant",
        }
    }
}

/// Outcome for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    Continue(PassThrough),
    Redirect {
        /// Resolved target followed by the untouched original query string.
        location: String,
        /// How the chain walk ended. Anything but `Terminal` means the
        /// location is the direct first hop.
        resolution: Resolution,
    },
}

impl Decision {
    pub fn location(&self) -> Option<&str> {
        match self {
            Self::Redirect { location, .. } => Some(location.as_str()),
            Self::Continue(_) => None,
        }
    }
}

/// Decides whether a raw `path?query` string should be redirected.
///
/// # Steps
///
/// 1. Look up the request's normalized key; no entry means [`PassThrough::NoRule`]
/// 2. Guard against redirecting to the requested path itself
/// 3. Guard against a two-way loop (`/a → /b`, `/b → /a`)
/// 4. Resolve the chain; an unsafe chain (cycle, too long) falls back to the
///    direct first hop
/// 5. Guard against a resolved target equal to the requested path
/// 6. Redirect to the target plus the query exactly as received
///
/// Path comparisons in the guards ignore case.
///
/// For tables built through [`RedirectTableBuilder`](super::table::RedirectTableBuilder)
/// steps 2 and 5 never fire: the builder already drops pairs whose target
/// normalizes to the source key. They still hold for any other table.
pub fn decide(table: &RedirectTable, raw: &str) -> Decision {
    let incoming_path = normalize_target(raw);
    let incoming_key = normalize_key(raw);

    let Some(direct_target) = table.get(&incoming_key) else {
        return Decision::Continue(PassThrough::NoRule);
    };

    let direct_target_path = strip_query_and_trailing_slash(direct_target);
    let direct_target_key = normalize_key(&direct_target_path);

    let original_query = raw.find('?').map_or("", |idx| &raw[idx..]);

    if points_at(&incoming_path, &direct_target_path) {
        return Decision::Continue(PassThrough::SelfRedirect);
    }

    let loops_back = table
        .get(&direct_target_key)
        .is_some_and(|back| points_at(&incoming_path, back));
    if loops_back {
        return Decision::Continue(PassThrough::TwoWayLoop);
    }

    let resolution = resolve(table, &incoming_key);
    let final_target = match &resolution {
        Resolution::Terminal(target) => target.as_str(),
        Resolution::Cycle | Resolution::TooLong | Resolution::NoMapping => direct_target,
    };

    if points_at(&incoming_path, final_target) {
        return Decision::Continue(PassThrough::Redundant);
    }

    Decision::Redirect {
        location: format!("{final_target}{original_query}"),
        resolution,
    }
}

/// Whether `target`, without query and trailing slashes, is `incoming_path`
/// ignoring case.
fn points_at(incoming_path: &str, target: &str) -> bool {
    let target = strip_query_and_trailing_slash(target);
    incoming_path == target || incoming_path.to_lowercase() == target.to_lowercase()
}
