//! Shared helpers for HTTP integration tests.

#![allow(dead_code)]

use axum::http::{HeaderName, HeaderValue};
use axum_test::TestServer;

use ee_common::BrandColors;
use ee_edge::config::{AppConfig, TenantEntry};
use ee_edge::{AppState, create_router};

pub const HOST: HeaderName = HeaderName::from_static("host");
pub const REFERER: HeaderName = HeaderName::from_static("referer");
pub const COOKIE: HeaderName = HeaderName::from_static("cookie");
pub const ORIGIN: HeaderName = HeaderName::from_static("origin");

/// Configuration with one white-label partner and no external services
pub fn test_config() -> AppConfig {
    AppConfig {
        tenants: vec![TenantEntry {
            hostnames: vec!["partner.com".to_string()],
            slug: "partner".to_string(),
            title: "Partner Tools".to_string(),
            logo_url: Some("https://cdn.partner.com/logo.png".to_string()),
            colors: Some(BrandColors {
                main: "#112233".to_string(),
                accent: "#ffcc00".to_string(),
            }),
        }],
        ..AppConfig::default()
    }
}

pub fn server_with(config: AppConfig) -> TestServer {
    let state = AppState::new(config).expect("Failed to build state");
    TestServer::new(create_router(state)).expect("Failed to create test server")
}

pub fn server() -> TestServer {
    server_with(test_config())
}

pub fn value(v: &'static str) -> HeaderValue {
    HeaderValue::from_static(v)
}
