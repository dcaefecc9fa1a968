//! Domain layer containing the redirect rules and the request-time algorithm.
//!
//! Nothing in this layer performs I/O or knows about HTTP. The infrastructure
//! layer feeds it rows, the API layer feeds it raw request strings.
//!
//! # Architecture
//!
//! - [`normalize`] - Canonical lookup keys and redirect targets
//! - [`table`] - Immutable key → target mapping
//! - [`loader`] - Builds a table from feed rows
//! - [`resolver`] - Bounded chain walk with cycle detection
//! - [`decision`] - Per-request redirect decision and its guards
//!
//! # Request Flow
//!
//! 1. The raw `path?query` is normalized into a key
//! 2. [`decision::decide`] looks the key up in the current [`table::RedirectTable`]
//! 3. Guards reject self-redirects and two-way loops
//! 4. [`resolver::resolve`] collapses chains, falling back to one hop when unsafe

pub mod decision;
pub mod loader;
pub mod normalize;
pub mod resolver;
pub mod table;

pub use decision::{Decision, PassThrough, decide};
pub use loader::{LoadError, LoadReport, Row, load_rows};
pub use resolver::{MAX_HOPS, Resolution, resolve};
pub use table::{RedirectTable, Rejection};
