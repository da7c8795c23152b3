//! Event tracking endpoint.

use axum::{
    body::Bytes,
    extract::State,
    http::{StatusCode, header},
    response::IntoResponse,
};

use ee_common::constants::NO_STORE;

use crate::events::TrackEvent;
use crate::state::AppState;
use crate::tenant::Tenant;

/// Accept an event and forward it in the background. Always 204.
pub async fn track(State(state): State<AppState>, tenant: Tenant, body: Bytes) -> impl IntoResponse {
    match serde_json::from_slice::<TrackEvent>(&body) {
        Ok(event) => {
            state.events.dispatch(event, tenant.slug());
        }
        Err(e) => {
            tracing::debug!(error = %e, "Ignoring malformed tracking event");
        }
    }

    (StatusCode::NO_CONTENT, [(header::CACHE_CONTROL, NO_STORE)])
}
