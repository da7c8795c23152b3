//! # EE Edge - Ecom Efficiency edge service
//!
//! Tenant-aware request router in front of the Ecom Efficiency pages.
//! Resolves white-label branding from the hostname, bounces the embedded
//! tool's `/app/*` requests back into the right proxy session, streams
//! fallback tool images, and answers the small cookie/header endpoints the
//! pages call.
//!
//! ## Architecture
//! ```text
//! Request → Tenant context → Route
//!                              ├─ /app/*          302 into /<tool>[/s/<id>]/app/*
//!                              ├─ /tools-images/* local file or streamed fallback
//!                              ├─ /api/*          auth hint, geo, billing, events, sink
//!                              └─ *               static files
//! ```

pub mod auth;
pub mod billing;
pub mod config;
pub mod error;
pub mod events;
pub mod forwarded;
pub mod geo;
pub mod proxy;
pub mod routes;
pub mod state;
pub mod tenant;

pub use config::AppConfig;
pub use routes::create_router;
pub use state::AppState;
