//! Sources of redirect rows.
//!
//! Provides a [`RedirectFeed`] trait with two implementations:
//! - [`CsvFileFeed`] - Production CSV file on disk
//! - [`StaticFeed`] - In-memory pairs for tests and the disabled/empty case

mod csv_feed;
mod service;
mod static_feed;

pub use csv_feed::CsvFileFeed;
pub use service::{FeedVersion, LoadOutcome, RedirectFeed};

#[cfg(test)]
pub use service::MockRedirectFeed;
pub use static_feed::StaticFeed;
