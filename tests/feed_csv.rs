use axum_test::TestServer;
use legacy_redirects::application::reload_worker::run_reload_worker;
use legacy_redirects::application::services::RedirectService;
use legacy_redirects::infrastructure::feed::CsvFileFeed;
use legacy_redirects::routes::app_router;
use legacy_redirects::state::AppState;
use std::sync::Arc;

const FEED: &str = "\
Old URL,RedirectTo,Owner
/shop/Old-Sofa/,/products/Sofa,catalog
/about-us,/About,
/loop-a,/loop-b,
/loop-b,/loop-a,
/self,/SELF/,
,/orphan,
/no-target,,
/2019-sale,/sale,marketing
/sale,/Offers,marketing
";

#[tokio::test]
async fn test_csv_feed_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("redirects.csv");
    std::fs::write(&path, FEED).unwrap();

    let service = Arc::new(RedirectService::new(Arc::new(CsvFileFeed::new(&path))));
    let report = service.reload().await.unwrap();

    assert_eq!(report.accepted, 6);
    assert_eq!(report.skipped_self_redirect, 1);
    assert_eq!(report.skipped_missing_column, 2);

    let server = TestServer::new(app_router(AppState::new(service, true))).unwrap();

    let response = server.get("/SHOP/old-sofa?color=red").await;
    assert_eq!(response.status_code(), 301);
    assert_eq!(response.header("location"), "/products/Sofa?color=red");

    let response = server.get("/2019-sale").await;
    assert_eq!(response.header("location"), "/Offers");

    server.get("/loop-a").await.assert_status_not_found();
    server.get("/self").await.assert_status_not_found();
}

#[tokio::test]
async fn test_missing_feed_serves_without_redirects() {
    let dir = tempfile::tempdir().unwrap();
    let service = Arc::new(RedirectService::new(Arc::new(CsvFileFeed::new(
        dir.path().join("missing.csv"),
    ))));

    run_reload_worker(service.clone(), None).await;

    assert!(service.snapshot().is_empty());
    assert_eq!(service.last_report().unwrap().accepted, 0);

    let server = TestServer::new(app_router(AppState::new(service, true))).unwrap();
    server.get("/about-us").await.assert_status_not_found();
    server.get("/health").await.assert_status_ok();
}
