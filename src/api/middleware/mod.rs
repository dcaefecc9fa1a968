//! HTTP middleware for request processing.
//!
//! Provides the legacy redirect layer and request tracing.

pub mod legacy_redirect;
pub mod tracing;
