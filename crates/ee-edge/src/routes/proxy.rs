//! Redirect shim for the embedded tool.

use axum::{
    extract::{OriginalUri, State},
    http::{HeaderMap, HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use tracing::debug;

use ee_common::EdgeError;

use crate::error::ApiError;
use crate::forwarded::request_origin;
use crate::proxy::redirect_target;
use crate::state::AppState;

/// 302 from `/app/<rest>` back into the tool, keeping the referring session
pub async fn redirect_to_tool(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    headers: HeaderMap,
) -> Result<Response, ApiError> {
    let referer = headers.get(header::REFERER).and_then(|v| v.to_str().ok());
    let session = state.sessions.from_referer(referer);

    let rest = uri.path().strip_prefix("/app").unwrap_or_default();
    let target = redirect_target(state.sessions.tool(), session.as_ref(), rest, uri.query());

    let location = match request_origin(&headers, &uri, &state.config.tool_proxy.public_scheme) {
        Some(origin) => format!("{origin}{target}"),
        None => target,
    };

    debug!(session = ?session, location = %location, "Redirecting to tool");

    let location = HeaderValue::try_from(location)
        .map_err(|_| EdgeError::InvalidInput("invalid_redirect_target"))?;

    Ok((StatusCode::FOUND, [(header::LOCATION, location)]).into_response())
}
