//! Application layer coordinating the domain and infrastructure layers.
//!
//! # Available Services
//!
//! - [`services::redirect_service::RedirectService`] - Table loading, hot swap and lookups
//! - [`reload_worker::run_reload_worker`] - Initial load and change-driven reloads

pub mod reload_worker;
pub mod services;
