//! Shared constants for the edge service.

/// Default HTTP listen address
pub const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:3000";

/// Slug of the non-white-labeled brand
pub const DEFAULT_TENANT_SLUG: &str = "default";

/// Display name of the non-white-labeled brand
pub const DEFAULT_TENANT_TITLE: &str = "Ecom Efficiency";

/// Third-party tool served behind the redirect shim
pub const DEFAULT_PROXY_TOOL: &str = "elevenlabs";

/// Length of a proxy session id (ASCII digits)
pub const SESSION_ID_LEN: usize = 5;

/// Cache policy injected on fallback assets lacking one
pub const IMMUTABLE_CACHE_CONTROL: &str = "public, max-age=31536000, immutable";

/// Cache policy for side-channel endpoints
pub const NO_STORE: &str = "no-store";

/// Cookie names
pub mod cookies {
    /// Best-effort logged-in hint set after an external auth event
    pub const AUTH_HINT: &str = "ee-auth";

    /// Value the hint cookie carries when set
    pub const AUTH_HINT_VALUE: &str = "1";

    /// Real session cookies, highest priority first
    pub const SESSION_COOKIES: [&str; 3] = ["sb-access-token", "sb:token", "sb-refresh-token"];
}

/// HTTP header names
pub mod headers {
    /// Cloudflare country header (highest priority)
    pub const CF_IPCOUNTRY: &str = "cf-ipcountry";

    /// Vercel edge country header
    pub const X_VERCEL_IP_COUNTRY: &str = "x-vercel-ip-country";

    /// Generic country header (lowest priority)
    pub const X_COUNTRY: &str = "x-country";

    /// Country headers in lookup order
    pub const COUNTRY_HEADERS: [&str; 3] = [CF_IPCOUNTRY, X_VERCEL_IP_COUNTRY, X_COUNTRY];

    /// Payments customer id passed by the account pages
    pub const X_CUSTOMER_ID: &str = "x-customer-id";

    /// Resolved tenant slug echoed on every response
    pub const X_TENANT: &str = "x-tenant";

    /// Original host when running behind a load balancer
    pub const X_FORWARDED_HOST: &str = "x-forwarded-host";

    /// Original scheme when running behind a load balancer
    pub const X_FORWARDED_PROTO: &str = "x-forwarded-proto";
}

/// EU member states (ISO 3166-1 alpha-2)
pub const EU_COUNTRIES: [&str; 27] = [
    "AT", "BE", "BG", "HR", "CY", "CZ", "DK", "EE", "FI", "FR", "DE", "GR", "HU", "IE", "IT", "LV",
    "LT", "LU", "MT", "NL", "PL", "PT", "RO", "SK", "SI", "ES", "SE",
];
