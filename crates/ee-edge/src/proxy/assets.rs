//! Streaming fallback for missing tool images.
//!
//! `/tools-images/<file>` is served from disk when present; otherwise the
//! same file is fetched from `/tools-logos/<file>` upstream and streamed back
//! with the upstream status and headers. Dropping the response body (client
//! disconnect) drops the upstream stream, which aborts the fetch.

use axum::{
    body::Body,
    http::{HeaderMap, HeaderValue, header},
    response::Response,
};
use futures::TryStreamExt;
use std::time::Duration;
use tracing::{debug, warn};

use ee_common::EdgeError;
use ee_common::constants::IMMUTABLE_CACHE_CONTROL;

/// Headers describing the upstream connection rather than the payload
const HOP_BY_HOP: [&str; 4] = ["connection", "keep-alive", "transfer-encoding", "upgrade"];

/// Fetches fallback assets from a fixed upstream origin
#[derive(Debug, Clone)]
pub struct AssetProxy {
    client: reqwest::Client,
    origin: String,
    fallback_prefix: String,
}

impl AssetProxy {
    pub fn new(
        origin: &str,
        fallback_prefix: &str,
        connect_timeout_secs: u64,
    ) -> Result<Self, EdgeError> {
        let client = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(connect_timeout_secs))
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .map_err(|e| EdgeError::Internal(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            origin: origin.trim_end_matches('/').to_string(),
            fallback_prefix: fallback_prefix.trim_matches('/').to_string(),
        })
    }

    pub fn origin(&self) -> &str {
        &self.origin
    }

    /// Upstream URL of a fallback asset
    pub fn upstream_url(&self, file: &str) -> String {
        format!("{}/{}/{}", self.origin, self.fallback_prefix, file)
    }

    /// Fetch `file` upstream and stream it back unmodified, apart from
    /// hop-by-hop headers and a default cache policy
    pub async fn fetch(&self, file: &str) -> Result<Response, EdgeError> {
        let url = self.upstream_url(file);

        let upstream = self.client.get(&url).send().await.map_err(|e| {
            warn!(url = %url, error = %e, "Fallback asset fetch failed");
            EdgeError::Upstream(e.to_string())
        })?;

        let status = upstream.status();
        debug!(url = %url, status = status.as_u16(), "Fallback asset fetched");

        let headers = forwarded_headers(upstream.headers());
        let stream = upstream.bytes_stream().inspect_err(move |e| {
            warn!(url = %url, error = %e, "Fallback asset stream aborted");
        });

        let mut response = Response::new(Body::from_stream(stream));
        *response.status_mut() = status;
        *response.headers_mut() = headers;
        Ok(response)
    }
}

/// Copy upstream headers, dropping hop-by-hop ones and adding a long-lived
/// cache policy when the upstream set none
fn forwarded_headers(upstream: &HeaderMap) -> HeaderMap {
    let mut headers = upstream.clone();
    for name in HOP_BY_HOP {
        headers.remove(name);
    }

    if !headers.contains_key(header::CACHE_CONTROL) {
        headers.insert(
            header::CACHE_CONTROL,
            HeaderValue::from_static(IMMUTABLE_CACHE_CONTROL),
        );
    }

    headers
}

/// Accept a relative asset path only if it cannot escape its directory
/// and reads as a plain path once pasted into the upstream URL
pub fn sanitize_asset_path(file: &str) -> Option<&str> {
    let safe = !file.is_empty()
        && !file.starts_with('/')
        && !file.contains(['\\', '\0', '?', '#', '%'])
        && file
            .split('/')
            .all(|segment| !segment.is_empty() && segment != "." && segment != "..");

    safe.then_some(file)
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::StreamExt;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_sanitize_asset_path() {
        assert_eq!(sanitize_asset_path("canva.png"), Some("canva.png"));
        assert_eq!(sanitize_asset_path("brand/canva.png"), Some("brand/canva.png"));
        assert!(sanitize_asset_path("").is_none());
        assert!(sanitize_asset_path("../secrets.env").is_none());
        assert!(sanitize_asset_path("a//b.png").is_none());
        assert!(sanitize_asset_path("/etc/passwd").is_none());
        assert!(sanitize_asset_path("a\\b.png").is_none());
        assert!(sanitize_asset_path("x?y.png").is_none());
        assert!(sanitize_asset_path("x.png#frag").is_none());
        assert!(sanitize_asset_path("x%2F..%2Fy.png").is_none());
    }

    #[test]
    fn test_cache_control_injected_only_when_absent() {
        let mut upstream = HeaderMap::new();
        upstream.insert(header::CONTENT_TYPE, HeaderValue::from_static("image/png"));
        upstream.insert(header::TRANSFER_ENCODING, HeaderValue::from_static("chunked"));

        let headers = forwarded_headers(&upstream);
        assert_eq!(headers[header::CACHE_CONTROL], IMMUTABLE_CACHE_CONTROL);
        assert_eq!(headers[header::CONTENT_TYPE], "image/png");
        assert!(!headers.contains_key(header::TRANSFER_ENCODING));

        upstream.insert(header::CACHE_CONTROL, HeaderValue::from_static("no-cache"));
        let headers = forwarded_headers(&upstream);
        assert_eq!(headers[header::CACHE_CONTROL], "no-cache");
    }

    #[test]
    fn test_upstream_url() {
        let proxy = AssetProxy::new("https://ee.com/", "/tools-logos/", 5).unwrap();
        assert_eq!(
            proxy.upstream_url("canva.png"),
            "https://ee.com/tools-logos/canva.png"
        );
    }

    #[tokio::test]
    async fn test_fetch_forwards_upstream_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/tools-logos/missing.png"))
            .respond_with(ResponseTemplate::new(404).insert_header("x-upstream", "logos"))
            .mount(&server)
            .await;

        let proxy = AssetProxy::new(&server.uri(), "tools-logos", 5).unwrap();
        let response = proxy.fetch("missing.png").await.unwrap();

        assert_eq!(response.status(), 404);
        assert_eq!(response.headers()["x-upstream"], "logos");
    }

    #[tokio::test]
    async fn test_unreachable_upstream_is_bad_gateway() {
        let proxy = AssetProxy::new("http://127.0.0.1:9", "tools-logos", 1).unwrap();
        let err = proxy.fetch("canva.png").await.unwrap_err();
        assert_eq!(err.status_code(), 502);
    }

    #[tokio::test]
    async fn test_dropping_body_closes_upstream_connection() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        // Sends one chunk of a body that never completes, then waits for the
        // client side to hang up
        let upstream = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = [0u8; 1024];
            socket.read(&mut buf).await.unwrap();
            socket
                .write_all(
                    b"HTTP/1.1 200 OK\r\ncontent-type: image/png\r\n\
                      transfer-encoding: chunked\r\n\r\n5\r\nfirst\r\n",
                )
                .await
                .unwrap();

            loop {
                match socket.read(&mut buf).await {
                    Ok(0) | Err(_) => return true,
                    Ok(_) => continue,
                }
            }
        });

        let proxy = AssetProxy::new(&format!("http://{addr}"), "tools-logos", 5).unwrap();
        let response = proxy.fetch("slow.png").await.unwrap();
        assert_eq!(response.status(), 200);

        let mut body = response.into_body().into_data_stream();
        let first = body.next().await.unwrap().unwrap();
        assert_eq!(first.as_ref(), b"first");
        drop(body);

        let closed = tokio::time::timeout(Duration::from_secs(5), upstream).await;
        assert!(matches!(closed, Ok(Ok(true))), "upstream connection left open");
    }
}
