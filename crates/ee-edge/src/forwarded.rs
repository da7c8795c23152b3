//! Host and scheme of the original request, honouring proxy headers.

use axum::http::{HeaderMap, Uri, header::HOST};

use ee_common::constants::headers::{X_FORWARDED_HOST, X_FORWARDED_PROTO};

/// Host the client addressed: `X-Forwarded-Host`, then `Host`, then the URI authority
pub fn request_host(headers: &HeaderMap, uri: &Uri) -> Option<String> {
    first_value(headers, X_FORWARDED_HOST)
        .or_else(|| first_value(headers, HOST.as_str()))
        .or_else(|| uri.authority().map(|a| a.as_str().to_string()))
}

/// Scheme the client used: `X-Forwarded-Proto`, else `fallback`
pub fn request_scheme(headers: &HeaderMap, fallback: &str) -> String {
    first_value(headers, X_FORWARDED_PROTO)
        .filter(|s| s == "http" || s == "https")
        .unwrap_or_else(|| fallback.to_string())
}

/// `{scheme}://{host}` for the current request, if the host is known
pub fn request_origin(headers: &HeaderMap, uri: &Uri, fallback_scheme: &str) -> Option<String> {
    let host = request_host(headers, uri)?;
    Some(format!("{}://{}", request_scheme(headers, fallback_scheme), host))
}

fn first_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(|v| v.trim().to_ascii_lowercase())
        .filter(|v| !v.is_empty())
}
