//! `/tools-images/*` local serving and upstream fallback.

mod common;

use axum::http::{HeaderName, HeaderValue, StatusCode};
use common::{HOST, server_with, test_config, value};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn upstream() -> MockServer {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/tools-logos/canva.png"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "image/png")
                .set_body_bytes(b"PNGDATA".to_vec()),
        )
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/tools-logos/cached.png"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("cache-control", "public, max-age=60")
                .set_body_bytes(b"CACHED".to_vec()),
        )
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/tools-logos/gone.png"))
        .respond_with(ResponseTemplate::new(404).set_body_string("missing"))
        .mount(&server)
        .await;

    server
}

fn server_for(upstream: &MockServer, static_dir: &std::path::Path) -> axum_test::TestServer {
    let mut config = test_config();
    config.assets.upstream_origin = Some(upstream.uri());
    config.assets.static_dir = static_dir.to_path_buf();
    server_with(config)
}

#[tokio::test]
async fn test_fallback_injects_immutable_cache() {
    let upstream = upstream().await;
    let dir = tempfile::tempdir().unwrap();
    let server = server_for(&upstream, dir.path());

    let response = server.get("/tools-images/canva.png").await;

    response.assert_status_ok();
    assert_eq!(response.as_bytes().as_ref(), b"PNGDATA");
    let headers = response.headers();
    assert_eq!(headers["content-type"], "image/png");
    assert_eq!(headers["cache-control"], "public, max-age=31536000, immutable");
}

#[tokio::test]
async fn test_fallback_keeps_upstream_cache_policy() {
    let upstream = upstream().await;
    let dir = tempfile::tempdir().unwrap();
    let server = server_for(&upstream, dir.path());

    let response = server.get("/tools-images/cached.png").await;

    response.assert_status_ok();
    assert_eq!(response.headers()["cache-control"], "public, max-age=60");
}

#[tokio::test]
async fn test_fallback_forwards_upstream_errors() {
    let upstream = upstream().await;
    let dir = tempfile::tempdir().unwrap();
    let server = server_for(&upstream, dir.path());

    let response = server.get("/tools-images/gone.png").await;

    response.assert_status(StatusCode::NOT_FOUND);
    response.assert_text("missing");
}

#[tokio::test]
async fn test_local_file_wins() {
    let upstream = upstream().await;
    let dir = tempfile::tempdir().unwrap();
    std::fs::create_dir_all(dir.path().join("tools-images")).unwrap();
    std::fs::write(dir.path().join("tools-images/canva.png"), b"LOCAL").unwrap();
    let server = server_for(&upstream, dir.path());

    let response = server.get("/tools-images/canva.png").await;

    response.assert_status_ok();
    assert_eq!(response.as_bytes().as_ref(), b"LOCAL");
    assert_eq!(upstream.received_requests().await.unwrap().len(), 0);
}

#[tokio::test]
async fn test_unreachable_upstream() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = test_config();
    config.assets.upstream_origin = Some("http://127.0.0.1:9".to_string());
    config.assets.static_dir = dir.path().to_path_buf();
    let server = server_with(config);

    let response = server.get("/tools-images/canva.png").await;

    response.assert_status(StatusCode::BAD_GATEWAY);
    let body: serde_json::Value = response.json();
    assert_eq!(body["error"], "upstream_unreachable");
}

#[tokio::test]
async fn test_traversal_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = test_config();
    config.assets.static_dir = dir.path().to_path_buf();
    let server = server_with(config);

    let response = server
        .get("/tools-images/a%5Csecret.png")
        .add_header(HOST, value("ee.test"))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_query_characters_rejected() {
    let upstream = upstream().await;
    let dir = tempfile::tempdir().unwrap();
    let server = server_for(&upstream, dir.path());

    for file in ["x%3Fy.png", "x%23y.png", "x%253Fy.png"] {
        let response = server.get(&format!("/tools-images/{file}")).await;
        response.assert_status(StatusCode::BAD_REQUEST);
    }
    assert_eq!(upstream.received_requests().await.unwrap().len(), 0);
}

#[tokio::test]
async fn test_forwarded_host_does_not_pick_the_upstream() {
    let attacker = upstream().await;
    let dir = tempfile::tempdir().unwrap();
    let mut config = test_config();
    config.listen_addr = "127.0.0.1:9".to_string();
    config.assets.upstream_origin = None;
    config.assets.static_dir = dir.path().to_path_buf();
    let server = server_with(config);

    let attacker_host = HeaderValue::from_str(&attacker.address().to_string()).unwrap();
    let response = server
        .get("/tools-images/canva.png")
        .add_header(
            HeaderName::from_static("x-forwarded-host"),
            attacker_host.clone(),
        )
        .add_header(HeaderName::from_static("x-forwarded-proto"), value("http"))
        .add_header(HOST, attacker_host)
        .await;

    response.assert_status(StatusCode::BAD_GATEWAY);
    assert_eq!(attacker.received_requests().await.unwrap().len(), 0);
}
