#![allow(dead_code)]

use axum_test::TestServer;
use legacy_redirects::application::services::RedirectService;
use legacy_redirects::infrastructure::feed::StaticFeed;
use legacy_redirects::routes::app_router;
use legacy_redirects::state::AppState;
use std::sync::Arc;

/// Builds state around a loaded in-memory table.
pub async fn create_test_state(pairs: &[(&str, &str)], enabled: bool) -> AppState {
    let service = Arc::new(RedirectService::new(Arc::new(StaticFeed::new(
        pairs.iter().copied(),
    ))));
    service.reload().await.unwrap();

    AppState::new(service, enabled)
}

/// Builds state whose table has never been loaded.
pub fn create_unloaded_state(pairs: &[(&str, &str)], enabled: bool) -> AppState {
    let service = Arc::new(RedirectService::new(Arc::new(StaticFeed::new(
        pairs.iter().copied(),
    ))));

    AppState::new(service, enabled)
}

pub async fn create_test_server(pairs: &[(&str, &str)], enabled: bool) -> TestServer {
    let state = create_test_state(pairs, enabled).await;
    TestServer::new(app_router(state)).unwrap()
}

/// A linear chain `/p0 → /p1 → … → /p{hops}`.
pub fn linear_chain(hops: usize) -> Vec<(String, String)> {
    (0..hops)
        .map(|i| (format!("/p{i}"), format!("/p{}", i + 1)))
        .collect()
}
