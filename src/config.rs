//! Application configuration loaded from environment variables.
//!
//! Configuration is loaded once at startup and validated before the server starts.
//!
//! ```bash
//! export LEGACY_REDIRECTS_ENABLED=true
//! export REDIRECTS_CSV_PATH="data/redirects.csv"
//! export REDIRECTS_RELOAD_INTERVAL=30
//! ```
//!
//! ## Optional Variables
//!
//! - `LISTEN` - Bind address (default: `0.0.0.0:3000`)
//! - `RUST_LOG` - Log level (default: `info`)
//! - `LOG_FORMAT` - Log format: `text` or `json` (default: `text`)
//! - `LEGACY_REDIRECTS_ENABLED` - Turns the redirect middleware on (`true` or `1`, default: off)
//! - `REDIRECTS_CSV_PATH` - Redirect feed file (default: `data/redirects.csv`)
//! - `REDIRECTS_RELOAD_INTERVAL` - Seconds between feed change checks; `0` disables
//!   hot reload (default: `0`, max: 86400)

use anyhow::Result;
use std::env;
use std::path::PathBuf;
use std::time::Duration;

const MAX_RELOAD_INTERVAL_SECS: u64 = 86_400;

/// Service configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub listen_addr: String,
    pub log_level: String,
    pub log_format: String,
    /// When false the redirect middleware is inert; the table is still loaded
    /// so it can be inspected through the API.
    pub redirects_enabled: bool,
    pub redirects_csv_path: PathBuf,
    /// Seconds between feed change checks; 0 disables hot reload.
    pub reload_interval_secs: u64,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// Unparseable numeric values fall back to their defaults.
    pub fn from_env() -> Self {
        let listen_addr = env::var("LISTEN").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
        let log_level = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
        let log_format = env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

        let redirects_enabled = env::var("LEGACY_REDIRECTS_ENABLED")
            .map(|v| parse_flag(&v))
            .unwrap_or(false);

        let redirects_csv_path = env::var("REDIRECTS_CSV_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("data/redirects.csv"));

        let reload_interval_secs = env::var("REDIRECTS_RELOAD_INTERVAL")
            .ok()
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(0);

        Self {
            listen_addr,
            log_level,
            log_format,
            redirects_enabled,
            redirects_csv_path,
            reload_interval_secs,
        }
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `log_format` is not `text` or `json`
    /// - `listen_addr` is invalid
    /// - `redirects_csv_path` is empty
    /// - `reload_interval_secs` exceeds one day
    pub fn validate(&self) -> Result<()> {
        // Validate log format
        if self.log_format != "text" && self.log_format != "json" {
            anyhow::bail!(
                "LOG_FORMAT must be 'text' or 'json', got '{}'",
                self.log_format
            );
        }

        // Validate listen address format
        if !self.listen_addr.contains(':') {
            anyhow::bail!(
                "LISTEN must be in format 'host:port', got '{}'",
                self.listen_addr
            );
        }

        if self.redirects_csv_path.as_os_str().is_empty() {
            anyhow::bail!("REDIRECTS_CSV_PATH must not be empty");
        }

        if self.reload_interval_secs > MAX_RELOAD_INTERVAL_SECS {
            anyhow::bail!(
                "REDIRECTS_RELOAD_INTERVAL is too large (max: {}), got {}",
                MAX_RELOAD_INTERVAL_SECS,
                self.reload_interval_secs
            );
        }

        Ok(())
    }

    /// Hot reload period, or `None` when disabled.
    pub fn reload_interval(&self) -> Option<Duration> {
        (self.reload_interval_secs > 0).then(|| Duration::from_secs(self.reload_interval_secs))
    }

    /// Prints configuration summary.
    pub fn print_summary(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Listen address: {}", self.listen_addr);
        tracing::info!("  Log level: {}", self.log_level);
        tracing::info!("  Log format: {}", self.log_format);
        tracing::info!(
            "  Legacy redirects: {}",
            if self.redirects_enabled { "enabled" } else { "disabled" }
        );
        tracing::info!("  Redirect feed: {}", self.redirects_csv_path.display());

        match self.reload_interval() {
            Some(interval) => tracing::info!("  Hot reload: every {:?}", interval),
            None => tracing::info!("  Hot reload: disabled"),
        }
    }
}

fn parse_flag(value: &str) -> bool {
    let value = value.trim();
    value.eq_ignore_ascii_case("true") || value == "1"
}

/// Loads and validates configuration from environment variables.
///
/// # Errors
///
/// Returns an error if validation fails.
///
/// # Note
///
/// This function expects environment variables to be already loaded
/// (e.g., via `dotenvy::dotenv()` in `main.rs`).
pub fn load_from_env() -> Result<Config> {
    let config = Config::from_env();
    config.validate()?;
    Ok(config)
}
