//! Chain resolution over a [`RedirectTable`].
//!
//! Follows `key → target → normalize_key(target) → …` until it reaches a
//! target with no further entry, or gives up. The walk is bounded by
//! [`MAX_HOPS`], so malformed or adversarial tables cannot make it loop.

use std::collections::HashSet;

use super::normalize::normalize_key;
use super::table::RedirectTable;

/// Maximum number of hops followed before a chain is considered too long.
pub const MAX_HOPS: usize = 15;

/// Outcome of walking a redirect chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// The chain ends at this target; its key has no entry in the table.
    Terminal(String),
    /// The chain revisits a key.
    Cycle,
    /// The chain is still going after [`MAX_HOPS`] hops.
    TooLong,
    /// The starting key (or a key mid-chain) has no entry.
    NoMapping,
}

impl Resolution {
    /// Only [`Resolution::Terminal`] is safe to redirect to.
    pub fn is_safe(&self) -> bool {
        matches!(self, Self::Terminal(_))
    }

    /// Short label used in logs and metrics.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Terminal(_) => "terminal",
            Self::Cycle => "cycle",
            Self::TooLong => "too_long",
            Self::NoMapping => "no_mapping",
        }
    }
}

/// Walks the chain starting at a normalized key.
///
/// Runs in O([`MAX_HOPS`]) time and space. A cycle and an overlong chain are
/// reported separately but callers usually treat both as unsafe.
pub fn resolve(table: &RedirectTable, start_key: &str) -> Resolution {
    let mut seen: HashSet<String> = HashSet::with_capacity(MAX_HOPS);
    let mut key = start_key.to_string();

    for _ in 0..MAX_HOPS {
        if seen.contains(&key) {
            return Resolution::Cycle;
        }

        let Some(next) = table.get(&key) else {
            return Resolution::NoMapping;
        };

        let next_key = normalize_key(next);
        if !table.contains_key(&next_key) {
            return Resolution::Terminal(next.to_string());
        }

        seen.insert(key);
        key = next_key;
    }

    Resolution::TooLong
}
