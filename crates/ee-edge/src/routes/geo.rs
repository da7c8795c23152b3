//! Visitor geolocation endpoint.

use axum::{
    Json,
    http::{HeaderMap, header},
    response::IntoResponse,
};

use ee_common::constants::NO_STORE;

pub async fn geolocate(headers: HeaderMap) -> impl IntoResponse {
    let geo = crate::geo::locate(&headers);
    tracing::debug!(country = ?geo.country, is_eu = geo.is_eu, "Geolocated visitor");

    ([(header::CACHE_CONTROL, NO_STORE)], Json(geo))
}
