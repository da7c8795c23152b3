//! `/app/*` redirects back into the embedded tool.

mod common;

use axum::http::StatusCode;
use common::{HOST, REFERER, server, value};

fn location(response: &axum_test::TestResponse) -> String {
    response.headers()["location"].to_str().unwrap().to_string()
}

#[tokio::test]
async fn test_redirect_keeps_referring_session() {
    let server = server();

    let response = server
        .get("/app/foo?x=1")
        .add_header(HOST, value("ee.test"))
        .add_header(REFERER, value("https://ee.test/proxy/elevenlabs/s/12345/app/home"))
        .await;

    response.assert_status(StatusCode::FOUND);
    assert_eq!(location(&response), "https://ee.test/elevenlabs/s/12345/app/foo?x=1");
}

#[tokio::test]
async fn test_redirect_without_referer() {
    let server = server();

    let response = server
        .get("/app/foo")
        .add_header(HOST, value("ee.test"))
        .await;

    response.assert_status(StatusCode::FOUND);
    assert_eq!(location(&response), "https://ee.test/elevenlabs/app/foo");
}

#[tokio::test]
async fn test_wrong_digit_count_falls_back() {
    let server = server();

    for referer in [
        "https://ee.test/proxy/elevenlabs/s/1234/",
        "https://ee.test/proxy/elevenlabs/s/123456/",
        "definitely not a url",
    ] {
        let response = server
            .get("/app/foo")
            .add_header(HOST, value("ee.test"))
            .add_header(REFERER, value(referer))
            .await;

        response.assert_status(StatusCode::FOUND);
        assert_eq!(location(&response), "https://ee.test/elevenlabs/app/foo");
    }
}

#[tokio::test]
async fn test_empty_rest_targets_proxy_root() {
    let server = server();

    let response = server
        .get("/app")
        .add_header(HOST, value("ee.test"))
        .add_header(REFERER, value("https://ee.test/proxy/elevenlabs/s/54321/"))
        .await;

    response.assert_status(StatusCode::FOUND);
    assert_eq!(location(&response), "https://ee.test/elevenlabs/s/54321/app/");
}

#[tokio::test]
async fn test_forwarded_scheme_is_honoured() {
    let server = server();

    let response = server
        .get("/app/voices")
        .add_header(HOST, value("ee.test"))
        .add_header(
            axum::http::HeaderName::from_static("x-forwarded-proto"),
            value("http"),
        )
        .await;

    assert_eq!(location(&response), "http://ee.test/elevenlabs/app/voices");
}
