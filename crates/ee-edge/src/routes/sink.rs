//! No-op sink for beacons and webhooks.
//!
//! Every method answers 204 with an empty body. The request body is never
//! read, so malformed payloads cannot fail the call.

use axum::{
    http::{Method, StatusCode, header},
    response::IntoResponse,
};

use ee_common::constants::NO_STORE;

const ALLOW_METHODS: &str = "GET, POST, PUT, PATCH, DELETE, OPTIONS";

pub async fn absorb(method: Method) -> impl IntoResponse {
    tracing::trace!(method = %method, "Absorbed sink request");

    (
        StatusCode::NO_CONTENT,
        [
            (header::CACHE_CONTROL, NO_STORE),
            (header::ACCESS_CONTROL_ALLOW_ORIGIN, "*"),
            (header::ACCESS_CONTROL_ALLOW_METHODS, ALLOW_METHODS),
            (header::ACCESS_CONTROL_ALLOW_HEADERS, "*"),
        ],
    )
}
