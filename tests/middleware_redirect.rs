mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use tower::ServiceExt;

use legacy_redirects::routes::app_router;

#[tokio::test]
async fn test_redirect_success_keeps_query() {
    let server = common::create_test_server(&[("/old", "/new")], true).await;

    let response = server.get("/OLD/?q=1").await;

    assert_eq!(response.status_code(), 301);
    assert_eq!(response.header("location"), "/new?q=1");
}

#[tokio::test]
async fn test_unmatched_path_passes_through() {
    let server = common::create_test_server(&[("/old", "/new")], true).await;

    let response = server.get("/unrelated").await;

    response.assert_status_not_found();
    let json = response.json::<serde_json::Value>();
    assert_eq!(json["error"]["code"], "not_found");
}

#[tokio::test]
async fn test_key_variants_redirect_alike() {
    let server = common::create_test_server(&[("/a", "/target")], true).await;

    for path in ["/A", "/a/", "/a?x=1"] {
        let response = server.get(path).await;
        assert_eq!(response.status_code(), 301, "path {path}");
    }

    assert_eq!(server.get("/a?x=1").await.header("location"), "/target?x=1");
    assert_eq!(server.get("/A").await.header("location"), "/target");
}

#[tokio::test]
async fn test_self_redirect_row_is_dropped() {
    let server = common::create_test_server(&[("/a", "/a"), ("/b", "/B/")], true).await;

    server.get("/a").await.assert_status_not_found();
    server.get("/b").await.assert_status_not_found();
}

#[tokio::test]
async fn test_two_way_loop_passes_through() {
    let server = common::create_test_server(&[("/a", "/b"), ("/b", "/a")], true).await;

    server.get("/a").await.assert_status_not_found();
    server.get("/b").await.assert_status_not_found();
}

#[tokio::test]
async fn test_chain_collapses_to_final_target() {
    let server = common::create_test_server(&[("/a", "/b"), ("/b", "/c")], true).await;

    let response = server.get("/a").await;

    assert_eq!(response.status_code(), 301);
    assert_eq!(response.header("location"), "/c");
}

#[tokio::test]
async fn test_three_node_cycle_redirects_one_hop() {
    let server =
        common::create_test_server(&[("/a", "/b"), ("/b", "/c"), ("/c", "/a")], true).await;

    let response = server.get("/a").await;

    assert_eq!(response.status_code(), 301);
    assert_eq!(response.header("location"), "/b");
}

#[tokio::test]
async fn test_overlong_chain_redirects_one_hop() {
    let chain = common::linear_chain(20);
    let pairs: Vec<(&str, &str)> = chain
        .iter()
        .map(|(s, d)| (s.as_str(), d.as_str()))
        .collect();
    let server = common::create_test_server(&pairs, true).await;

    let response = server.get("/p0").await;

    assert_eq!(response.status_code(), 301);
    assert_eq!(response.header("location"), "/p1");

    // Fifteen hops from /p5 reach /p20, which has no entry.
    let response = server.get("/p5").await;
    assert_eq!(response.header("location"), "/p20");
}

#[tokio::test]
async fn test_flag_off_never_redirects() {
    let pairs = [("/old", "/new"), ("/a", "/b"), ("/b", "/c"), ("/x", "/y")];
    let server = common::create_test_server(&pairs, false).await;

    for path in ["/old", "/OLD/?q=1", "/a", "/b", "/x"] {
        let response = server.get(path).await;
        assert_ne!(response.status_code(), 301, "path {path}");
        response.assert_status_not_found();
    }
}

#[tokio::test]
async fn test_flag_off_keeps_routes_working() {
    let server = common::create_test_server(&[("/health", "/status")], false).await;

    server.get("/health").await.assert_status_ok();
}

#[tokio::test]
async fn test_rule_shadows_local_route() {
    let server = common::create_test_server(&[("/health", "/status")], true).await;

    let response = server.get("/health").await;

    assert_eq!(response.status_code(), 301);
    assert_eq!(response.header("location"), "/status");
}

#[tokio::test]
async fn test_unloaded_table_passes_through() {
    let state = common::create_unloaded_state(&[("/old", "/new")], true);
    let server = axum_test::TestServer::new(app_router(state)).unwrap();

    server.get("/old").await.assert_status_not_found();
}

#[tokio::test]
async fn test_query_string_is_byte_identical() {
    let state = common::create_test_state(&[("/old-shop/sofa", "/products/Sofa")], true).await;
    let app = app_router(state);

    let request = Request::builder()
        .uri("/Old-Shop/Sofa/?utm_source=news%20letter&q=%7e&empty=&plus=a+b")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::MOVED_PERMANENTLY);
    assert_eq!(
        response.headers()[header::LOCATION],
        "/products/Sofa?utm_source=news%20letter&q=%7e&empty=&plus=a+b"
    );
}

#[tokio::test]
async fn test_percent_encoded_request_path() {
    let state = common::create_test_state(&[("/café", "/Coffee Shop")], true).await;
    let app = app_router(state);

    let request = Request::builder()
        .uri("/CAF%C3%A9?x=1")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::MOVED_PERMANENTLY);
    assert_eq!(response.headers()[header::LOCATION], "/Coffee%20Shop?x=1");
}

#[tokio::test]
async fn test_literal_percent_in_target_is_escaped() {
    let server = common::create_test_server(&[("/sale", "/50%25off")], true).await;

    let response = server.get("/sale?ref=mail").await;

    assert_eq!(response.status_code(), 301);
    assert_eq!(response.header("location"), "/50%25off?ref=mail");
}

#[tokio::test]
async fn test_malformed_escape_keeps_request_undecoded() {
    let state =
        common::create_test_state(&[("/a b", "/decoded"), ("/a%20b%zz", "/raw")], true).await;
    let app = app_router(state);

    let request = Request::builder()
        .uri("/a%20b%zz")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::MOVED_PERMANENTLY);
    assert_eq!(response.headers()[header::LOCATION], "/raw");
}

#[tokio::test]
async fn test_post_requests_are_redirected_too() {
    let server = common::create_test_server(&[("/old", "/new")], true).await;

    let response = server.post("/old").await;

    assert_eq!(response.status_code(), 301);
}
