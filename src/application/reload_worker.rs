//! Background loading of the redirect table.

use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info};

use super::services::RedirectService;

/// Performs the initial load and then watches the feed for changes.
///
/// # Behavior
///
/// 1. Records the feed version and loads the table once
/// 2. Returns if `interval` is `None` (hot reload disabled)
/// 3. Otherwise checks the feed version every `interval` and reloads when it
///    differs from the last successfully loaded one
///
/// Load failures are logged and the previous table keeps serving; a failed
/// version is retried on the next tick.
///
/// Requests handled before the initial load finishes see an empty table and
/// pass through.
pub async fn run_reload_worker(service: Arc<RedirectService>, interval: Option<Duration>) {
    let mut loaded_version = Some(service.feed_version().await);

    if let Err(e) = service.reload().await {
        error!("Initial redirect load failed, serving no redirects: {}", e);
        loaded_version = None;
    }

    let Some(interval) = interval else {
        debug!("Redirect hot reload disabled");
        return;
    };

    info!(
        "Watching {} for changes every {:?}",
        service.feed_description(),
        interval
    );

    loop {
        tokio::time::sleep(interval).await;

        let current = service.feed_version().await;
        if loaded_version.as_ref() == Some(&current) {
            continue;
        }

        debug!(version = ?current, "Redirect feed changed");
        match service.reload().await {
            Ok(_) => loaded_version = Some(current),
            Err(e) => error!("Redirect reload failed (keeping previous table): {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::feed::{CsvFileFeed, StaticFeed};
    use std::path::Path;

    async fn wait_for<F: Fn() -> bool>(condition: F) -> bool {
        for _ in 0..200 {
            if condition() {
                return true;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        false
    }

    fn write_csv(path: &Path, body: &str) {
        std::fs::write(path, format!("old url,redirectTo\n{body}")).unwrap();
    }

    #[tokio::test]
    async fn test_initial_load_without_watching() {
        let service = Arc::new(RedirectService::new(Arc::new(StaticFeed::new([(
            "/a", "/b",
        )]))));

        run_reload_worker(service.clone(), None).await;

        assert_eq!(service.snapshot().get("/a"), Some("/b"));
    }

    #[tokio::test]
    async fn test_reloads_when_file_changes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("redirects.csv");
        write_csv(&path, "/old,/new\n");

        let service = Arc::new(RedirectService::new(Arc::new(CsvFileFeed::new(&path))));
        let worker = tokio::spawn(run_reload_worker(
            service.clone(),
            Some(Duration::from_millis(20)),
        ));

        assert!(wait_for(|| service.snapshot().get("/old") == Some("/new")).await);

        write_csv(&path, "/old,/newer-target\n/extra,/page\n");

        assert!(wait_for(|| service.snapshot().len() == 2).await);
        assert_eq!(service.snapshot().get("/old"), Some("/newer-target"));

        worker.abort();
    }

    #[tokio::test]
    async fn test_file_appearing_later_is_picked_up() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("late.csv");

        let service = Arc::new(RedirectService::new(Arc::new(CsvFileFeed::new(&path))));
        let worker = tokio::spawn(run_reload_worker(
            service.clone(),
            Some(Duration::from_millis(20)),
        ));

        assert!(wait_for(|| service.last_report().is_some()).await);
        assert!(service.snapshot().is_empty());

        write_csv(&path, "/late,/arrival\n");

        assert!(wait_for(|| service.snapshot().get("/late").is_some()).await);

        worker.abort();
    }
}
