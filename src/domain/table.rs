//! Immutable redirect table.

use std::collections::HashMap;

use super::normalize::{is_usable_target, normalize_key, normalize_target};
use super::resolver::{Resolution, resolve};

/// Why a candidate mapping was refused by [`RedirectTableBuilder::insert`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// The source normalizes to an empty key (e.g. `/`).
    EmptyKey,
    /// The destination does not normalize to a path starting with `/`.
    InvalidTarget,
    /// Source and destination normalize to the same key.
    SelfRedirect,
}

/// A single accepted mapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedirectEntry {
    /// Normalized lookup key.
    pub key: String,
    /// Normalized, case-preserved destination path.
    pub target: String,
}

/// Mapping from normalized key to redirect target.
///
/// A table is assembled once through [`RedirectTableBuilder`] and never
/// modified afterwards. Readers share it through an `Arc`; reloading builds a
/// new table instead of touching this one.
///
/// No entry's key equals `normalize_key(target)`.
#[derive(Debug, Clone, Default)]
pub struct RedirectTable {
    entries: HashMap<String, String>,
}

impl RedirectTable {
    /// Creates an empty table.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Starts building a new table.
    pub fn builder() -> RedirectTableBuilder {
        RedirectTableBuilder::default()
    }

    /// Returns the target stored for a normalized key.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Whether a normalized key has an entry.
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over all entries in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Resolves every key and returns the ones whose chains are unsafe.
    ///
    /// Findings are sorted by key so reports are stable between runs.
    pub fn audit(&self) -> Vec<AuditFinding> {
        let mut findings: Vec<AuditFinding> = self
            .entries
            .keys()
            .filter_map(|key| match resolve(self, key) {
                Resolution::Terminal(_) => None,
                resolution => Some(AuditFinding {
                    key: key.clone(),
                    resolution,
                }),
            })
            .collect();

        findings.sort_by(|a, b| a.key.cmp(&b.key));
        findings
    }

    /// Builds a table from pairs stored verbatim, skipping normalization and
    /// the self-redirect check.
    #[cfg(test)]
    pub(crate) fn from_raw_entries(pairs: &[(&str, &str)]) -> Self {
        Self {
            entries: pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }
}

/// An entry whose chain does not end in a terminal target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditFinding {
    pub key: String,
    pub resolution: Resolution,
}

/// Accumulates entries for a [`RedirectTable`].
#[derive(Debug, Default)]
pub struct RedirectTableBuilder {
    entries: HashMap<String, String>,
}

impl RedirectTableBuilder {
    /// Normalizes and inserts a raw source/destination pair.
    ///
    /// A later insert for the same key replaces the earlier one.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(previous))` when an existing entry was replaced
    /// - `Ok(None)` for a new key
    ///
    /// # Errors
    ///
    /// Returns a [`Rejection`] when the pair would produce an empty key, an
    /// unusable target or a self-redirect. Nothing is inserted in that case.
    pub fn insert(&mut self, source: &str, destination: &str) -> Result<Option<String>, Rejection> {
        let entry = Self::prepare(source, destination)?;
        Ok(self.entries.insert(entry.key, entry.target))
    }

    /// Normalizes a pair and checks it against the table invariants.
    pub fn prepare(source: &str, destination: &str) -> Result<RedirectEntry, Rejection> {
        let key = normalize_key(source);
        if key.is_empty() {
            return Err(Rejection::EmptyKey);
        }

        let target = normalize_target(destination);
        if !is_usable_target(&target) {
            return Err(Rejection::InvalidTarget);
        }

        if normalize_key(&target) == key {
            return Err(Rejection::SelfRedirect);
        }

        Ok(RedirectEntry { key, target })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Freezes the accumulated entries.
    pub fn build(self) -> RedirectTable {
        RedirectTable {
            entries: self.entries,
        }
    }
}

impl<S: AsRef<str>, D: AsRef<str>> FromIterator<(S, D)> for RedirectTable {
    /// Builds a table from raw pairs, silently dropping rejected ones.
    fn from_iter<I: IntoIterator<Item = (S, D)>>(iter: I) -> Self {
        let mut builder = Self::builder();
        for (source, destination) in iter {
            let _ = builder.insert(source.as_ref(), destination.as_ref());
        }
        builder.build()
    }
}
