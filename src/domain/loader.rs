//! Builds a [`RedirectTable`] from a stream of feed rows.
//!
//! The loader only sees rows: one header → value map at a time. Reading and
//! decoding the backing file is left to the feed (see
//! [`crate::infrastructure::feed`]), so rows are never buffered here.

use std::collections::HashMap;

use serde::Serialize;
use tracing::debug;

use super::table::{RedirectTable, Rejection};

/// A single feed record keyed by header name.
pub type Row = HashMap<String, String>;

/// Header names accepted for the legacy source column (case-insensitive).
pub const SOURCE_HEADERS: [&str; 2] = ["old url", "oldUrl"];

/// Header names accepted for the destination column (case-insensitive).
pub const DESTINATION_HEADERS: [&str; 2] = ["redirectTo", "redirect_to"];

/// Errors raised while reading the redirect feed.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("Failed to read redirect feed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed redirect feed: {0}")]
    Csv(#[from] csv::Error),

    #[error("Redirect loader task failed: {0}")]
    Task(String),
}

/// Tally of a completed load.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LoadReport {
    /// Rows that produced a table entry (including ones later overwritten).
    pub accepted: usize,
    /// Accepted rows that replaced an earlier entry for the same key.
    pub duplicates: usize,
    /// Rows missing the source or destination column, or with an empty value.
    pub skipped_missing_column: usize,
    pub skipped_empty_key: usize,
    pub skipped_invalid_target: usize,
    pub skipped_self_redirect: usize,
}

impl LoadReport {
    /// Total number of rows that were not loaded.
    pub fn skipped(&self) -> usize {
        self.skipped_missing_column
            + self.skipped_empty_key
            + self.skipped_invalid_target
            + self.skipped_self_redirect
    }

    /// Number of entries left in the table after duplicates collapsed.
    pub fn entries(&self) -> usize {
        self.accepted - self.duplicates
    }

    fn record_rejection(&mut self, rejection: Rejection) {
        match rejection {
            Rejection::EmptyKey => self.skipped_empty_key += 1,
            Rejection::InvalidTarget => self.skipped_invalid_target += 1,
            Rejection::SelfRedirect => self.skipped_self_redirect += 1,
        }
    }
}

/// Consumes rows and builds a table.
///
/// # Row Handling
///
/// 1. Source and destination are looked up by case-insensitive header match
///    against [`SOURCE_HEADERS`] and [`DESTINATION_HEADERS`], then trimmed
/// 2. Rows with a missing or empty column are skipped
/// 3. Rows with an empty key, a target not starting with `/`, or a
///    self-redirect are skipped
/// 4. Everything else is inserted; duplicate keys keep the last row
///
/// # Errors
///
/// Returns the first [`LoadError`] yielded by `rows`. Rows consumed before the
/// error are discarded along with the partial table.
pub fn load_rows<I>(rows: I) -> Result<(RedirectTable, LoadReport), LoadError>
where
    I: IntoIterator<Item = Result<Row, LoadError>>,
{
    let mut builder = RedirectTable::builder();
    let mut report = LoadReport::default();

    for (index, row) in rows.into_iter().enumerate() {
        let row = row?;

        let (Some(source), Some(destination)) = (
            column(&row, &SOURCE_HEADERS),
            column(&row, &DESTINATION_HEADERS),
        ) else {
            debug!(row = index + 1, "Skipping redirect row with missing column");
            report.skipped_missing_column += 1;
            continue;
        };

        match builder.insert(source, destination) {
            Ok(previous) => {
                report.accepted += 1;
                if previous.is_some() {
                    report.duplicates += 1;
                }
            }
            Err(rejection) => {
                debug!(
                    row = index + 1,
                    source,
                    destination,
                    reason = ?rejection,
                    "Skipping redirect row"
                );
                report.record_rejection(rejection);
            }
        }
    }

    Ok((builder.build(), report))
}

/// Returns the value of the first name in `names` that has a non-empty column.
///
/// Names are tried in order. Headers differing only in case resolve to the
/// lexicographically smallest header so the choice never depends on map order.
fn column<'r>(row: &'r Row, names: &[&str]) -> Option<&'r str> {
    names.iter().find_map(|name| {
        row.iter()
            .filter(|(header, value)| {
                header.trim().eq_ignore_ascii_case(name) && !value.trim().is_empty()
            })
            .min_by(|(a, _), (b, _)| a.cmp(b))
            .map(|(_, value)| value.trim())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(pairs: &[(&str, &str)]) -> Result<Row, LoadError> {
        Ok(pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect())
    }

    #[test]
    fn test_accepts_all_header_spellings() {
        let rows = vec![
            row(&[("old url", "/one"), ("redirectTo", "/uno")]),
            row(&[("OldUrl", "/two"), ("redirect_to", "/dos")]),
            row(&[("OLD URL", "/three"), ("REDIRECTTO", "/tres")]),
        ];

        let (table, report) = load_rows(rows).unwrap();

        assert_eq!(report.accepted, 3);
        assert_eq!(report.skipped(), 0);
        assert_eq!(table.get("/one"), Some("/uno"));
        assert_eq!(table.get("/two"), Some("/dos"));
        assert_eq!(table.get("/three"), Some("/tres"));
    }

    #[test]
    fn test_first_listed_alias_wins() {
        for _ in 0..50 {
            let rows = vec![
                row(&[("old url", "/a"), ("oldUrl", "/b"), ("redirectTo", "/x")]),
                row(&[("old url", "/c"), ("redirect_to", "/late"), ("redirectTo", "/early")]),
            ];

            let (table, report) = load_rows(rows).unwrap();

            assert_eq!(report.accepted, 2);
            assert_eq!(table.get("/a"), Some("/x"));
            assert!(table.get("/b").is_none());
            assert_eq!(table.get("/c"), Some("/early"));
        }
    }

    #[test]
    fn test_blank_alias_falls_through_to_next() {
        let rows = vec![row(&[("old url", "  "), ("oldUrl", "/b"), ("redirect_to", "/y")])];

        let (table, _) = load_rows(rows).unwrap();

        assert_eq!(table.get("/b"), Some("/y"));
    }

    #[test]
    fn test_case_variants_of_one_alias_pick_stably() {
        for _ in 0..50 {
            let rows = vec![row(&[("OLD URL", "/upper"), ("old url", "/lower"), ("redirectTo", "/x")])];

            let (table, _) = load_rows(rows).unwrap();

            assert_eq!(table.get("/upper"), Some("/x"));
            assert_eq!(table.len(), 1);
        }
    }

    #[test]
    fn test_skips_rows_with_missing_or_blank_columns() {
        let rows = vec![
            row(&[("old url", "/one")]),
            row(&[("redirectTo", "/uno")]),
            row(&[("old url", "   "), ("redirectTo", "/uno")]),
            row(&[("source", "/x"), ("dest", "/y")]),
        ];

        let (table, report) = load_rows(rows).unwrap();

        assert!(table.is_empty());
        assert_eq!(report.skipped_missing_column, 4);
        assert_eq!(report.skipped(), 4);
    }

    #[test]
    fn test_tallies_rejections_by_reason() {
        let rows = vec![
            row(&[("old url", "/a"), ("redirectTo", "/a")]),
            row(&[("old url", "/"), ("redirectTo", "/home")]),
            row(&[("old url", "/b"), ("redirectTo", "#top")]),
            row(&[("old url", "/c"), ("redirectTo", "/d")]),
        ];

        let (table, report) = load_rows(rows).unwrap();

        assert_eq!(table.len(), 1);
        assert!(table.get("/a").is_none());
        assert_eq!(report.skipped_self_redirect, 1);
        assert_eq!(report.skipped_empty_key, 1);
        assert_eq!(report.skipped_invalid_target, 1);
        assert_eq!(report.accepted, 1);
    }

    #[test]
    fn test_duplicates_keep_last_row() {
        let rows = vec![
            row(&[("old url", "/a"), ("redirectTo", "/first")]),
            row(&[("old url", "/A/"), ("redirectTo", "/second")]),
        ];

        let (table, report) = load_rows(rows).unwrap();

        assert_eq!(table.get("/a"), Some("/second"));
        assert_eq!(report.accepted, 2);
        assert_eq!(report.duplicates, 1);
        assert_eq!(report.entries(), 1);
    }

    #[test]
    fn test_propagates_stream_error() {
        let rows = vec![
            row(&[("old url", "/a"), ("redirectTo", "/b")]),
            Err(LoadError::Io(std::io::Error::other("disk went away"))),
            row(&[("old url", "/c"), ("redirectTo", "/d")]),
        ];

        let err = load_rows(rows).unwrap_err();
        assert!(matches!(err, LoadError::Io(_)));
    }

    #[test]
    fn test_empty_stream() {
        let (table, report) = load_rows(Vec::new()).unwrap();
        assert!(table.is_empty());
        assert_eq!(report, LoadReport::default());
    }
}
