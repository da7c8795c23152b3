//! Auth-hint cookie endpoints.

use axum::{
    Json,
    extract::State,
    http::{HeaderMap, HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use tracing::{debug, warn};

use ee_common::AuthStatus;
use ee_common::constants::NO_STORE;

use crate::state::AppState;

/// Set the hint cookie after a successful external login (GET, HEAD, POST).
///
/// Always 204; a cookie that cannot be encoded is logged and skipped.
pub async fn set_flag(State(state): State<AppState>) -> Response {
    let mut response = (StatusCode::NO_CONTENT, [(header::CACHE_CONTROL, NO_STORE)]).into_response();

    match HeaderValue::from_str(&state.auth.hint_set_cookie()) {
        Ok(cookie) => {
            response.headers_mut().insert(header::SET_COOKIE, cookie);
            debug!(cookie = %state.auth.hint_cookie(), "Auth hint set");
        }
        Err(e) => {
            warn!(cookie = %state.auth.hint_cookie(), error = %e, "Auth hint cookie not set");
        }
    }

    response
}

/// Logged-in check from session cookies, then the hint
pub async fn status(State(state): State<AppState>, headers: HeaderMap) -> impl IntoResponse {
    let status: AuthStatus = state.auth.check(&headers);
    debug!(logged_in = status.logged_in, source = ?status.source, "Auth status checked");

    ([(header::CACHE_CONTROL, NO_STORE)], Json(status))
}

/// Plain `OPTIONS` without a preflight request
pub async fn status_preflight() -> StatusCode {
    StatusCode::NO_CONTENT
}
