//! Redirect table lifecycle and request-time lookups.

use arc_swap::ArcSwapOption;
use std::sync::Arc;
use tracing::{info, warn};

use crate::domain::{Decision, LoadError, LoadReport, RedirectTable, decide};
use crate::infrastructure::feed::{FeedVersion, RedirectFeed};
use crate::infrastructure::store::RedirectStore;

/// Service owning the live redirect table.
///
/// Loading goes through the configured [`RedirectFeed`]; every successful load
/// builds a new table and swaps it into the [`RedirectStore`]. A failed load
/// leaves the current table in place.
pub struct RedirectService {
    feed: Arc<dyn RedirectFeed>,
    store: RedirectStore,
    last_report: ArcSwapOption<LoadReport>,
}

impl RedirectService {
    /// Creates a service serving an empty table until [`Self::reload`] runs.
    pub fn new(feed: Arc<dyn RedirectFeed>) -> Self {
        Self::with_store(feed, RedirectStore::empty())
    }

    pub fn with_store(feed: Arc<dyn RedirectFeed>, store: RedirectStore) -> Self {
        Self {
            feed,
            store,
            last_report: ArcSwapOption::empty(),
        }
    }

    /// Loads the feed and swaps the new table in.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError`] if the feed cannot be read. The previously served
    /// table stays active.
    pub async fn reload(&self) -> Result<LoadReport, LoadError> {
        let (table, report) = self.feed.load().await.inspect_err(|e| {
            warn!("Redirect reload from {} failed: {}", self.feed.describe(), e);
            metrics::counter!("legacy_redirects_reload_failures_total").increment(1);
        })?;

        let entries = table.len();
        self.store.swap(table);
        self.last_report.store(Some(Arc::new(report.clone())));

        metrics::gauge!("legacy_redirects_entries").set(entries as f64);
        info!(
            entries,
            skipped = report.skipped(),
            "Redirect table loaded from {}",
            self.feed.describe()
        );

        Ok(report)
    }

    /// Decides the outcome for a raw `path?query` against the current table.
    pub fn decide(&self, raw: &str) -> Decision {
        decide(&self.store.snapshot(), raw)
    }

    /// Returns the table currently served.
    pub fn snapshot(&self) -> Arc<RedirectTable> {
        self.store.snapshot()
    }

    /// Report of the most recent successful load, if any.
    pub fn last_report(&self) -> Option<Arc<LoadReport>> {
        self.last_report.load_full()
    }

    pub async fn feed_version(&self) -> FeedVersion {
        self.feed.version().await
    }

    pub fn feed_description(&self) -> String {
        self.feed.describe()
    }
}
