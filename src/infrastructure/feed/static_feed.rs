//! In-memory redirect feed.

use async_trait::async_trait;
use tracing::debug;

use super::service::{FeedVersion, LoadOutcome, RedirectFeed};
use crate::domain::loader::{DESTINATION_HEADERS, SOURCE_HEADERS};
use crate::domain::{LoadError, Row, load_rows};

/// A feed serving a fixed list of source/destination pairs.
///
/// Pairs go through the same loader as CSV rows, so the same rows are
/// rejected. Useful for tests and for running without a feed file.
#[derive(Debug, Clone, Default)]
pub struct StaticFeed {
    pairs: Vec<(String, String)>,
}

impl StaticFeed {
    pub fn new<S, D>(pairs: impl IntoIterator<Item = (S, D)>) -> Self
    where
        S: Into<String>,
        D: Into<String>,
    {
        Self {
            pairs: pairs
                .into_iter()
                .map(|(s, d)| (s.into(), d.into()))
                .collect(),
        }
    }
}

#[async_trait]
impl RedirectFeed for StaticFeed {
    async fn load(&self) -> Result<LoadOutcome, LoadError> {
        debug!(pairs = self.pairs.len(), "Loading static redirect feed");
        let rows = self.pairs.iter().map(|(source, destination)| {
            let mut row = Row::new();
            row.insert(SOURCE_HEADERS[0].to_string(), source.clone());
            row.insert(DESTINATION_HEADERS[0].to_string(), destination.clone());
            Ok::<_, LoadError>(row)
        });

        load_rows(rows)
    }

    async fn version(&self) -> FeedVersion {
        FeedVersion::Fixed
    }

    fn describe(&self) -> String {
        format!("static:{} pairs", self.pairs.len())
    }
}
