//! Feed trait and shared types.

use async_trait::async_trait;
use std::time::SystemTime;

use crate::domain::{LoadError, LoadReport, RedirectTable};

/// A freshly built table together with its load tally.
pub type LoadOutcome = (RedirectTable, LoadReport);

/// Cheap identity of a feed's current content.
///
/// Two equal versions mean the feed has not changed in a way that warrants a
/// reload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedVersion {
    /// The backing resource does not exist.
    Missing,
    /// Last modification time and size of the backing file.
    File {
        modified: Option<SystemTime>,
        len: u64,
    },
    /// Content that never changes.
    Fixed,
}

/// Trait for loading redirect tables from an external source.
///
/// Implementations must be thread-safe. A missing source is not an error: it
/// loads as an empty table.
///
/// # Implementations
///
/// - [`crate::infrastructure::feed::CsvFileFeed`] - CSV file with a header row
/// - [`crate::infrastructure::feed::StaticFeed`] - Fixed in-memory pairs
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RedirectFeed: Send + Sync {
    /// Builds a brand-new table from the feed.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError`] when the source exists but cannot be read to the
    /// end. Callers keep whatever table they were serving before.
    async fn load(&self) -> Result<LoadOutcome, LoadError>;

    /// Reports the current version of the source without reading it.
    async fn version(&self) -> FeedVersion;

    /// Human-readable description for logs.
    fn describe(&self) -> String;
}
