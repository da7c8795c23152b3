//! Coarse geolocation from edge-provider headers.

use axum::http::HeaderMap;

use ee_common::GeoInfo;
use ee_common::constants::headers::COUNTRY_HEADERS;

/// Cloudflare placeholders for "unknown" and "Tor"
const UNKNOWN_COUNTRIES: [&str; 2] = ["XX", "T1"];

/// Visitor country from the first usable country header.
///
/// Anything unusable falls back to an unknown, non-EU, USD visitor.
pub fn locate(headers: &HeaderMap) -> GeoInfo {
    COUNTRY_HEADERS
        .iter()
        .find_map(|name| country_code(headers, name))
        .map(|code| GeoInfo::for_country(&code))
        .unwrap_or_default()
}

fn country_code(headers: &HeaderMap, name: &str) -> Option<String> {
    let code = headers.get(name)?.to_str().ok()?.trim().to_ascii_uppercase();

    let valid = code.len() == 2
        && code.bytes().all(|b| b.is_ascii_alphabetic())
        && !UNKNOWN_COUNTRIES.contains(&code.as_str());
    valid.then_some(code)
}
