//! Request-scoped tenant context.
//!
//! The middleware resolves the tenant once per request and stores it in the
//! request extensions; handlers receive it through the [`Tenant`] extractor.

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{HeaderValue, request::Parts},
    middleware::Next,
    response::Response,
};
use std::convert::Infallible;
use std::sync::Arc;
use tracing::debug;

use ee_common::TenantConfig;
use ee_common::constants::headers::X_TENANT;

use crate::forwarded::request_host;
use crate::state::AppState;

/// Axum extractor for the current request's tenant
#[derive(Debug, Clone)]
pub struct Tenant(pub Arc<TenantConfig>);

impl Tenant {
    pub fn slug(&self) -> &str {
        &self.0.slug
    }
}

impl std::ops::Deref for Tenant {
    type Target = TenantConfig;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequestParts<AppState> for Tenant {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        if let Some(tenant) = parts.extensions.get::<Tenant>() {
            return Ok(tenant.clone());
        }

        // Middleware not installed on this route
        let host = request_host(&parts.headers, &parts.uri);
        Ok(Tenant(state.tenants.resolve(host.as_deref())))
    }
}

/// Middleware resolving the tenant and echoing its slug in `X-Tenant`
pub async fn tenant_context(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let host = request_host(request.headers(), request.uri());
    let tenant = state.tenants.resolve(host.as_deref());

    debug!(host = ?host, tenant = %tenant.slug, "Resolved tenant");

    request.extensions_mut().insert(Tenant(tenant.clone()));
    let mut response = next.run(request).await;

    if let Ok(value) = HeaderValue::from_str(&tenant.slug) {
        response.headers_mut().insert(X_TENANT, value);
    }

    response
}
