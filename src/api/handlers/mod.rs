//! HTTP request handlers for API endpoints.
//!
//! Each handler module corresponds to a logical grouping of endpoints.

pub mod health;
pub mod not_found;
pub mod redirects;

pub use health::health_handler;
pub use not_found::not_found_handler;
pub use redirects::{redirect_summary_handler, resolve_handler};
