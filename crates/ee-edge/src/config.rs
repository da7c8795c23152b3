//! Configuration management for the edge service.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use ee_common::constants::{
    DEFAULT_LISTEN_ADDR, DEFAULT_PROXY_TOOL, DEFAULT_TENANT_SLUG, DEFAULT_TENANT_TITLE, cookies,
};
use ee_common::{BrandColors, TenantConfig};

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// HTTP listen address
    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,

    /// Branding served when the hostname matches no partner
    #[serde(default)]
    pub default_tenant: TenantEntry,

    /// White-label partners
    #[serde(default)]
    pub tenants: Vec<TenantEntry>,

    /// Tool redirect shim
    #[serde(default)]
    pub tool_proxy: ToolProxyConfig,

    /// Static files and asset fallback
    #[serde(default)]
    pub assets: AssetConfig,

    /// Customer billing portal
    #[serde(default)]
    pub billing: BillingConfig,

    /// Event tracking forwarder
    #[serde(default)]
    pub events: EventsConfig,

    /// Auth-hint cookie gate
    #[serde(default)]
    pub auth: AuthConfig,
}

/// One branding entry, keyed by one or more hostnames
#[derive(Debug, Clone, Deserialize)]
pub struct TenantEntry {
    /// Hostnames served with this branding (normalized on load)
    #[serde(default)]
    pub hostnames: Vec<String>,

    pub slug: String,

    pub title: String,

    #[serde(default)]
    pub logo_url: Option<String>,

    #[serde(default)]
    pub colors: Option<BrandColors>,
}

impl TenantEntry {
    pub fn to_tenant(&self) -> TenantConfig {
        TenantConfig {
            slug: self.slug.clone(),
            title: self.title.clone(),
            logo_url: self.logo_url.clone(),
            colors: self.colors.clone(),
        }
    }
}

impl Default for TenantEntry {
    fn default() -> Self {
        Self {
            hostnames: Vec::new(),
            slug: DEFAULT_TENANT_SLUG.to_string(),
            title: DEFAULT_TENANT_TITLE.to_string(),
            logo_url: None,
            colors: None,
        }
    }
}

/// Redirect shim for the embedded third-party tool
#[derive(Debug, Clone, Deserialize)]
pub struct ToolProxyConfig {
    /// Tool name used in both the referring and the target paths
    #[serde(default = "default_tool")]
    pub tool: String,

    /// Scheme for absolute redirects when no X-Forwarded-Proto is present
    #[serde(default = "default_scheme")]
    pub public_scheme: String,
}

impl Default for ToolProxyConfig {
    fn default() -> Self {
        Self {
            tool: default_tool(),
            public_scheme: default_scheme(),
        }
    }
}

/// Static file serving and the image fallback proxy
#[derive(Debug, Clone, Deserialize)]
pub struct AssetConfig {
    /// Directory served as the site root
    #[serde(default = "default_static_dir")]
    pub static_dir: PathBuf,

    /// Path prefix of the images that may fall back upstream
    #[serde(default = "default_images_prefix")]
    pub images_prefix: String,

    /// Path prefix fetched when the local image is absent
    #[serde(default = "default_fallback_prefix")]
    pub fallback_prefix: String,

    /// Origin to fetch from; this service's own listen address when unset.
    /// Never taken from request headers.
    #[serde(default)]
    pub upstream_origin: Option<String>,

    /// Upstream connect timeout in seconds
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
}

impl AssetConfig {
    /// Local path of an image under the images prefix
    pub fn local_image(&self, file: &str) -> PathBuf {
        self.static_dir.join(&self.images_prefix).join(file)
    }

    /// Fixed origin the fallback fetches from
    pub fn fallback_origin(&self, listen_addr: &str) -> String {
        match self.upstream_origin.as_deref().filter(|o| !o.is_empty()) {
            Some(origin) => origin.trim_end_matches('/').to_string(),
            None => self_origin(listen_addr),
        }
    }
}

/// Loopback origin of this service, mapping wildcard binds to loopback
fn self_origin(listen_addr: &str) -> String {
    let addr = if let Some(port) = listen_addr.strip_prefix("0.0.0.0:") {
        format!("127.0.0.1:{port}")
    } else if let Some(port) = listen_addr.strip_prefix("[::]:") {
        format!("[::1]:{port}")
    } else {
        listen_addr.to_string()
    };
    format!("http://{addr}")
}

impl Default for AssetConfig {
    fn default() -> Self {
        Self {
            static_dir: default_static_dir(),
            images_prefix: default_images_prefix(),
            fallback_prefix: default_fallback_prefix(),
            upstream_origin: None,
            connect_timeout_secs: default_connect_timeout(),
        }
    }
}

/// Payments provider settings
#[derive(Debug, Clone, Deserialize)]
pub struct BillingConfig {
    /// Secret API key; the portal endpoint answers 500 while unset
    #[serde(default)]
    pub stripe_secret_key: Option<String>,

    #[serde(default = "default_stripe_api_base")]
    pub api_base: String,

    /// Where the portal sends customers back; `{origin}/account` when unset
    #[serde(default)]
    pub return_url: Option<String>,
}

impl Default for BillingConfig {
    fn default() -> Self {
        Self {
            stripe_secret_key: None,
            api_base: default_stripe_api_base(),
            return_url: None,
        }
    }
}

/// Event tracking settings
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EventsConfig {
    /// Collector URL; events are dropped while unset
    #[serde(default)]
    pub endpoint: Option<String>,
}

/// Auth-hint cookie settings
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    #[serde(default = "default_hint_cookie")]
    pub hint_cookie: String,

    /// Real session cookies, highest priority first
    #[serde(default = "default_session_cookies")]
    pub session_cookies: Vec<String>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            hint_cookie: default_hint_cookie(),
            session_cookies: default_session_cookies(),
        }
    }
}

// Default value functions
fn default_listen_addr() -> String { DEFAULT_LISTEN_ADDR.to_string() }
fn default_tool() -> String { DEFAULT_PROXY_TOOL.to_string() }
fn default_scheme() -> String { "https".to_string() }
fn default_static_dir() -> PathBuf { PathBuf::from("public") }
fn default_images_prefix() -> String { "tools-images".to_string() }
fn default_fallback_prefix() -> String { "tools-logos".to_string() }
fn default_connect_timeout() -> u64 { 10 }
fn default_stripe_api_base() -> String { "https://api.stripe.com".to_string() }
fn default_hint_cookie() -> String { cookies::AUTH_HINT.to_string() }

fn default_session_cookies() -> Vec<String> {
    cookies::SESSION_COOKIES.iter().map(|c| c.to_string()).collect()
}

/// Values given on the command line, applied over the file
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub listen: Option<String>,
    pub stripe_secret_key: Option<String>,
}

impl AppConfig {
    /// Load configuration from file and `EE_*` environment, with CLI overrides
    pub fn load(config_path: &str, overrides: &Overrides) -> Result<Self> {
        let mut builder = config::Config::builder();

        if Path::new(config_path).exists() {
            builder = builder.add_source(config::File::from(Path::new(config_path)));
        } else {
            tracing::warn!(path = %config_path, "Config file not found, using defaults");
        }

        let settings = builder
            .add_source(config::Environment::with_prefix("EE").separator("__"))
            .build()
            .context("Failed to load config")?;

        let mut config: Self = settings
            .try_deserialize()
            .context("Failed to parse config")?;

        if let Some(ref listen) = overrides.listen {
            config.listen_addr = listen.clone();
        }
        if let Some(ref key) = overrides.stripe_secret_key {
            config.billing.stripe_secret_key = Some(key.clone());
        }

        Ok(config)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            listen_addr: default_listen_addr(),
            default_tenant: TenantEntry::default(),
            tenants: Vec::new(),
            tool_proxy: ToolProxyConfig::default(),
            assets: AssetConfig::default(),
            billing: BillingConfig::default(),
            events: EventsConfig::default(),
            auth: AuthConfig::default(),
        }
    }
}
