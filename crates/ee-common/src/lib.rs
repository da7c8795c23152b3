//! # EE Common
//!
//! Shared types, constants, and errors used by the Ecom Efficiency edge
//! service.
//!
//! ## Modules
//! - `types` - Core data structures (TenantConfig, GeoInfo, AuthStatus, etc.)
//! - `error` - Common error types
//! - `constants` - Cookie names, header names, cache policies, EU country set

pub mod constants;
pub mod error;
pub mod types;

pub use error::EdgeError;
pub use types::*;
