//! HTTP route handlers for the edge service.

use axum::{
    Router, middleware,
    http::{Method, header},
    routing::{any, get, post},
};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};

use crate::state::AppState;
use crate::tenant::tenant_context;

mod assets;
mod auth;
mod billing;
mod events;
mod geo;
mod health;
mod proxy;
mod sink;
mod tenant;

/// Create the main application router
pub fn create_router(state: AppState) -> Router {
    let static_files = ServeDir::new(&state.config.assets.static_dir);

    Router::new()
        // Health & Status
        .route("/health", get(health::health_check))
        .route("/ready", get(health::ready_check))

        // Tenant branding
        .route("/api/tenant", get(tenant::current_tenant))

        // Auth hint
        .route("/api/auth/flag", get(auth::set_flag).post(auth::set_flag))
        .merge(auth_status_routes())

        // Geolocation
        .route("/api/geo", get(geo::geolocate))

        // External collaborators
        .route("/api/billing/portal", post(billing::create_portal_session))
        .route("/api/track", post(events::track))

        // No-op sink for beacons and webhooks
        .route("/api/webhook", any(sink::absorb))
        .route("/api/webhook/{*rest}", any(sink::absorb))

        // Embedded tool shim
        .route("/app", get(proxy::redirect_to_tool))
        .route("/app/", get(proxy::redirect_to_tool))
        .route("/app/{*rest}", get(proxy::redirect_to_tool))

        // Image fallback
        .route(
            &format!("/{}/{{*file}}", state.config.assets.images_prefix.trim_matches('/')),
            get(assets::tools_image),
        )

        // Everything else is a static file
        .fallback_service(static_files)

        .layer(middleware::from_fn_with_state(state.clone(), tenant_context))
        .layer(TraceLayer::new_for_http())

        // Add shared state
        .with_state(state)
}

/// The status check is called cross-origin with credentials, so the CORS
/// layer mirrors the caller's origin instead of answering `*`
fn auth_status_routes() -> Router<AppState> {
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::mirror_request())
        .allow_credentials(true)
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    Router::new()
        .route(
            "/api/auth/status",
            get(auth::status).options(auth::status_preflight),
        )
        .layer(cors)
}
