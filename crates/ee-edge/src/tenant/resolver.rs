//! Hostname → tenant branding lookup.
//!
//! The table is built once at start-up and only read afterwards, so a
//! resolver can be shared across concurrent requests behind an `Arc`.

use anyhow::{Result, bail};
use std::collections::HashMap;
use std::sync::Arc;

use ee_common::TenantConfig;

use crate::config::TenantEntry;

/// Resolves request hostnames to tenant branding
#[derive(Debug)]
pub struct TenantResolver {
    by_host: HashMap<String, Arc<TenantConfig>>,
    default: Arc<TenantConfig>,
}

impl TenantResolver {
    /// Build the table, rejecting hostnames claimed by two different entries
    pub fn new(default: &TenantEntry, entries: &[TenantEntry]) -> Result<Self> {
        let mut by_host = HashMap::new();

        for entry in entries {
            let tenant = Arc::new(entry.to_tenant());
            for hostname in &entry.hostnames {
                let key = normalize_host(hostname);
                if key.is_empty() {
                    bail!("Tenant '{}' has an empty hostname", entry.slug);
                }
                let previous = by_host.insert(key.clone(), tenant.clone());
                if let Some(existing) = previous.filter(|p| !Arc::ptr_eq(p, &tenant)) {
                    bail!(
                        "Hostname '{}' claimed by both '{}' and '{}'",
                        key,
                        existing.slug,
                        entry.slug
                    );
                }
            }
        }

        Ok(Self {
            by_host,
            default: Arc::new(default.to_tenant()),
        })
    }

    /// Look up the branding for a hostname, falling back to the default brand
    pub fn resolve(&self, host: Option<&str>) -> Arc<TenantConfig> {
        host.map(normalize_host)
            .and_then(|key| self.by_host.get(&key).cloned())
            .unwrap_or_else(|| self.default.clone())
    }

    pub fn default_tenant(&self) -> Arc<TenantConfig> {
        self.default.clone()
    }

    /// Whether a resolved tenant is the default brand rather than a partner
    pub fn is_default(&self, tenant: &Arc<TenantConfig>) -> bool {
        Arc::ptr_eq(tenant, &self.default)
    }

    /// Number of distinct hostnames mapped to a partner
    pub fn len(&self) -> usize {
        self.by_host.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_host.is_empty()
    }
}

/// Canonical form of a hostname: lower-case, no port, no trailing dot, no `www.`
pub fn normalize_host(host: &str) -> String {
    let host = host.trim();

    let host = if let Some(rest) = host.strip_prefix('[') {
        // IPv6 literal, keep the brackets' content only
        rest.split(']').next().unwrap_or(rest)
    } else {
        host.rsplit_once(':')
            .filter(|(_, port)| port.bytes().all(|b| b.is_ascii_digit()))
            .map(|(name, _)| name)
            .unwrap_or(host)
    };

    let host = host.trim_end_matches('.').to_ascii_lowercase();
    match host.strip_prefix("www.") {
        Some(stripped) => stripped.to_string(),
        None => host,
    }
}
