//! Core types shared across edge components.

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_TENANT_SLUG, DEFAULT_TENANT_TITLE, EU_COUNTRIES};

/// Brand palette for a white-label tenant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrandColors {
    /// Primary CSS color
    pub main: String,
    /// Accent CSS color
    pub accent: String,
}

/// Branding for one tenant.
///
/// Resolved per request from a read-only table keyed by hostname. Never
/// mutated after start-up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TenantConfig {
    /// Unique partner identifier
    pub slug: String,

    /// Display name
    pub title: String,

    /// Logo asset URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo_url: Option<String>,

    /// Brand palette
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub colors: Option<BrandColors>,
}

impl Default for TenantConfig {
    fn default() -> Self {
        Self {
            slug: DEFAULT_TENANT_SLUG.to_string(),
            title: DEFAULT_TENANT_TITLE.to_string(),
            logo_url: None,
            colors: None,
        }
    }
}

/// Session affinity inferred from a referring proxy URL.
///
/// Always exactly five ASCII digits; construct with [`ProxySessionHint::parse`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProxySessionHint(String);

impl ProxySessionHint {
    /// Accepts a path segment only if it is exactly five ASCII digits
    pub fn parse(segment: &str) -> Option<Self> {
        let valid = segment.len() == crate::constants::SESSION_ID_LEN
            && segment.bytes().all(|b| b.is_ascii_digit());
        valid.then(|| Self(segment.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ProxySessionHint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Which cookie decided the logged-in answer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthSource {
    /// A real session cookie from the auth provider
    Session,
    /// Only the best-effort hint cookie
    Hint,
}

/// Result of the auth-status check
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthStatus {
    pub logged_in: bool,
    #[serde(skip)]
    pub source: Option<AuthSource>,
}

impl AuthStatus {
    pub fn logged_out() -> Self {
        Self {
            logged_in: false,
            source: None,
        }
    }

    pub fn from_source(source: AuthSource) -> Self {
        Self {
            logged_in: true,
            source: Some(source),
        }
    }
}

/// Display currency offered to a visitor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    Eur,
    Usd,
}

impl Default for Currency {
    fn default() -> Self {
        Self::Usd
    }
}

/// Coarse visitor geolocation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeoInfo {
    /// Upper-case ISO country code, `null` when unknown
    pub country: Option<String>,
    #[serde(rename = "isEU")]
    pub is_eu: bool,
    pub currency: Currency,
}

impl GeoInfo {
    /// Builds the answer for a known country code
    pub fn for_country(code: &str) -> Self {
        let country = code.to_ascii_uppercase();
        let is_eu = is_eu_country(&country);
        Self {
            country: Some(country),
            is_eu,
            currency: if is_eu { Currency::Eur } else { Currency::Usd },
        }
    }
}

/// Returns true if `code` (upper-case alpha-2) is an EU member state
pub fn is_eu_country(code: &str) -> bool {
    EU_COUNTRIES.contains(&code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_hint_requires_five_ascii_digits() {
        assert_eq!(ProxySessionHint::parse("12345").unwrap().as_str(), "12345");
        assert!(ProxySessionHint::parse("1234").is_none());
        assert!(ProxySessionHint::parse("123456").is_none());
        assert!(ProxySessionHint::parse("12a45").is_none());
        assert!(ProxySessionHint::parse("١٢٣٤٥").is_none());
    }

    #[test]
    fn test_geo_serializes_wire_names() {
        let geo = GeoInfo::for_country("de");
        let json = serde_json::to_value(&geo).unwrap();
        assert_eq!(json["country"], "DE");
        assert_eq!(json["isEU"], true);
        assert_eq!(json["currency"], "EUR");
    }
}
