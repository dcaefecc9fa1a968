//! # Legacy Redirects
//!
//! Permanent redirects from the storefront's legacy URLs to their current
//! paths, served as an Axum middleware.
//!
//! ## Architecture
//!
//! - **Domain Layer** ([`domain`]) - Path normalization, the redirect table,
//!   chain resolution and the per-request decision
//! - **Application Layer** ([`application`]) - Table lifecycle and hot reload
//! - **Infrastructure Layer** ([`infrastructure`]) - CSV feed and the swappable table store
//! - **API Layer** ([`api`]) - Redirect middleware, health and introspection handlers
//!
//! ## Guarantees
//!
//! - Never redirects a path to itself or into a two-way loop
//! - Chains are collapsed to their final target within
//!   [`domain::MAX_HOPS`] hops; cyclic or overlong chains redirect one hop only
//! - The query string is forwarded byte for byte
//! - Reloads swap whole tables; in-flight requests keep their snapshot
//!
//! ## Quick Start
//!
//! ```bash
//! export LEGACY_REDIRECTS_ENABLED=true
//! export REDIRECTS_CSV_PATH="data/redirects.csv"
//! cargo run
//! ```
//!
//! ## Configuration
//!
//! Service configuration is loaded from environment variables via [`config::Config`].
//! See [`config`] module for available options.

pub mod api;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod state;

pub mod config;
pub mod server;

pub mod routes;

pub use error::AppError;
pub use state::AppState;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::application::services::RedirectService;
    pub use crate::domain::{Decision, PassThrough, RedirectTable, Resolution};
    pub use crate::error::AppError;
    pub use crate::infrastructure::feed::{CsvFileFeed, RedirectFeed, StaticFeed};
    pub use crate::state::AppState;
}
