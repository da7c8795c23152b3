//! Application state and shared resources.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use std::sync::Arc;

use crate::auth::AuthGate;
use crate::billing::BillingPortal;
use crate::config::AppConfig;
use crate::events::EventForwarder;
use crate::proxy::{AssetProxy, SessionMatcher};
use crate::tenant::TenantResolver;

/// Shared application state.
///
/// Everything here is built at start-up and read-only afterwards.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<AppConfig>,

    /// Hostname → branding table
    pub tenants: Arc<TenantResolver>,

    /// Referer session extraction for the tool shim
    pub sessions: Arc<SessionMatcher>,

    /// Image fallback fetcher
    pub assets: AssetProxy,

    /// Logged-in cookie check
    pub auth: Arc<AuthGate>,

    /// Customer billing portal
    pub billing: BillingPortal,

    /// Event tracking forwarder
    pub events: EventForwarder,

    /// Process start time
    pub started_at: DateTime<Utc>,
}

impl AppState {
    /// Build state from configuration, validating the tenant table
    pub fn new(config: AppConfig) -> Result<Self> {
        let tenants = TenantResolver::new(&config.default_tenant, &config.tenants)
            .context("Invalid tenant table")?;

        let sessions = SessionMatcher::new(&config.tool_proxy.tool)
            .context("Invalid tool proxy name")?;

        let assets = AssetProxy::new(
            &config.assets.fallback_origin(&config.listen_addr),
            &config.assets.fallback_prefix,
            config.assets.connect_timeout_secs,
        )?;

        let client = reqwest::Client::builder()
            .user_agent(concat!("ee-edge/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to build HTTP client")?;

        let billing = BillingPortal::new(client.clone(), &config.billing);
        let events = EventForwarder::new(client, config.events.endpoint.clone());
        let auth = Arc::new(AuthGate::new(&config.auth));

        Ok(Self {
            config: Arc::new(config),
            tenants: Arc::new(tenants),
            sessions: Arc::new(sessions),
            assets,
            auth,
            billing,
            events,
            started_at: Utc::now(),
        })
    }

    /// Seconds since start-up
    pub fn uptime_secs(&self) -> u64 {
        (Utc::now() - self.started_at).num_seconds().max(0) as u64
    }
}
