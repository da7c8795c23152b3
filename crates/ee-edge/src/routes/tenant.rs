//! Current tenant branding.

use axum::{Json, extract::State};
use serde::Serialize;

use ee_common::TenantConfig;

use crate::state::AppState;
use crate::tenant::Tenant;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TenantResponse {
    #[serde(flatten)]
    tenant: TenantConfig,
    white_label: bool,
}

/// Branding for the requested hostname
pub async fn current_tenant(State(state): State<AppState>, tenant: Tenant) -> Json<TenantResponse> {
    Json(TenantResponse {
        white_label: !state.tenants.is_default(&tenant.0),
        tenant: (*tenant.0).clone(),
    })
}
