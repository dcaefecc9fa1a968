//! Infrastructure layer for external integrations.
//!
//! This layer feeds the domain layer with data from outside the process and
//! holds the shared, swappable state the request path reads from.
//!
//! # Modules
//!
//! - [`feed`] - Redirect row sources (CSV file and in-memory implementations)
//! - [`store`] - Lock-free holder for the live redirect table

pub mod feed;
pub mod store;
