//! Common error types for the edge service.

use thiserror::Error;

/// Common errors across edge components
#[derive(Debug, Error)]
pub enum EdgeError {
    /// Required configuration is absent (payment key, upstream origin, ...)
    #[error("Configuration error: {0}")]
    Config(&'static str),

    /// Required request input is absent or malformed
    #[error("Invalid input: {0}")]
    InvalidInput(&'static str),

    /// Upstream could not be reached
    #[error("Upstream error: {0}")]
    Upstream(String),

    /// Upstream answered with a non-success status
    #[error("Upstream returned status {status}")]
    UpstreamStatus { code: &'static str, status: u16 },

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl EdgeError {
    /// Returns the HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Config(_) => 500,
            Self::InvalidInput(_) => 400,
            Self::Upstream(_) => 502,
            Self::UpstreamStatus { .. } => 502,
            Self::Internal(_) => 500,
        }
    }

    /// Short machine-readable code rendered in error bodies
    pub fn code(&self) -> &'static str {
        match self {
            Self::Config(code) | Self::InvalidInput(code) => *code,
            Self::UpstreamStatus { code, .. } => *code,
            Self::Upstream(_) => "upstream_unreachable",
            Self::Internal(_) => "internal_error",
        }
    }
}
