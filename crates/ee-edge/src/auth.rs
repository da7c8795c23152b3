//! Auth-hint cookie gate.
//!
//! The hint cookie only caches "this browser logged in recently". Real
//! session cookies are authoritative and are always consulted first.

use axum::http::{HeaderMap, header::COOKIE};

use ee_common::constants::cookies::AUTH_HINT_VALUE;
use ee_common::{AuthSource, AuthStatus};

use crate::config::AuthConfig;

/// Cookie-based logged-in check
#[derive(Debug, Clone)]
pub struct AuthGate {
    hint_cookie: String,
    session_cookies: Vec<String>,
}

impl AuthGate {
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            hint_cookie: config.hint_cookie.clone(),
            session_cookies: config.session_cookies.clone(),
        }
    }

    pub fn hint_cookie(&self) -> &str {
        &self.hint_cookie
    }

    /// Priority-ordered lookup: session cookies in order, then the hint
    pub fn check(&self, headers: &HeaderMap) -> AuthStatus {
        let jar = CookieJar::from_headers(headers);

        for name in &self.session_cookies {
            if jar.get(name).is_some_and(|value| !value.is_empty()) {
                tracing::debug!(cookie = %name, "Session cookie present");
                return AuthStatus::from_source(AuthSource::Session);
            }
        }

        if jar.get(&self.hint_cookie) == Some(AUTH_HINT_VALUE) {
            return AuthStatus::from_source(AuthSource::Hint);
        }

        AuthStatus::logged_out()
    }

    /// `Set-Cookie` value for the hint
    pub fn hint_set_cookie(&self) -> String {
        format!("{}={}; Path=/; SameSite=Lax", self.hint_cookie, AUTH_HINT_VALUE)
    }
}

/// Read-only view over every `Cookie` header of a request
struct CookieJar<'a> {
    pairs: Vec<(&'a str, &'a str)>,
}

impl<'a> CookieJar<'a> {
    fn from_headers(headers: &'a HeaderMap) -> Self {
        let pairs = headers
            .get_all(COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .flat_map(|value| value.split(';'))
            .filter_map(|pair| pair.split_once('='))
            .map(|(name, value)| (name.trim(), value.trim().trim_matches('"')))
            .collect();

        Self { pairs }
    }

    /// First value of a cookie
    fn get(&self, name: &str) -> Option<&'a str> {
        self.pairs
            .iter()
            .find(|(candidate, _)| *candidate == name)
            .map(|(_, value)| *value)
    }
}
