//! Hostname-driven tenant resolution.
//!
//! - `resolver` - Read-only hostname → branding table
//! - `context` - Per-request middleware and extractor

mod context;
mod resolver;

pub use context::{Tenant, tenant_context};
pub use resolver::{TenantResolver, normalize_host};
