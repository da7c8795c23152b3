//! Customer billing portal endpoint.

use axum::{
    Json,
    body::Bytes,
    extract::{OriginalUri, State},
    http::HeaderMap,
};
use serde::{Deserialize, Serialize};

use ee_common::EdgeError;
use ee_common::constants::headers::X_CUSTOMER_ID;

use crate::error::ApiError;
use crate::forwarded::request_origin;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PortalRequest {
    customer_id: Option<String>,
    return_url: Option<String>,
}

#[derive(Serialize)]
pub struct PortalResponse {
    url: String,
}

/// Create a payments portal session for the customer named in
/// `X-Customer-Id` (or the JSON body)
pub async fn create_portal_session(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<PortalResponse>, ApiError> {
    if !state.billing.is_configured() {
        return Err(EdgeError::Config("stripe_not_configured").into());
    }

    // An empty or malformed body just means "no body fields"
    let request: PortalRequest = serde_json::from_slice(&body).unwrap_or_default();

    let customer_id = headers
        .get(X_CUSTOMER_ID)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(String::from)
        .or(request.customer_id)
        .ok_or(EdgeError::InvalidInput("missing_customer_id"))?;

    let origin = request_origin(&headers, &uri, &state.config.tool_proxy.public_scheme);
    let return_url = request
        .return_url
        .or_else(|| state.billing.return_url(origin.as_deref()));

    let url = state
        .billing
        .create_session(&customer_id, return_url.as_deref())
        .await?;

    Ok(Json(PortalResponse { url }))
}
