//! Customer billing portal sessions.

use serde::Deserialize;
use tracing::{info, warn};

use ee_common::EdgeError;

use crate::config::BillingConfig;

#[derive(Deserialize)]
struct PortalSession {
    url: String,
}

/// Creates customer-portal sessions with the payments provider
#[derive(Debug, Clone)]
pub struct BillingPortal {
    client: reqwest::Client,
    api_base: String,
    secret_key: Option<String>,
    return_url: Option<String>,
}

impl BillingPortal {
    pub fn new(client: reqwest::Client, config: &BillingConfig) -> Self {
        Self {
            client,
            api_base: config.api_base.trim_end_matches('/').to_string(),
            secret_key: config.stripe_secret_key.clone().filter(|k| !k.is_empty()),
            return_url: config.return_url.clone(),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.secret_key.is_some()
    }

    /// Configured return URL, else `{origin}/account`
    pub fn return_url(&self, origin: Option<&str>) -> Option<String> {
        self.return_url
            .clone()
            .or_else(|| origin.map(|o| format!("{o}/account")))
    }

    /// Create a portal session and return its URL
    pub async fn create_session(
        &self,
        customer_id: &str,
        return_url: Option<&str>,
    ) -> Result<String, EdgeError> {
        let key = self
            .secret_key
            .as_deref()
            .ok_or(EdgeError::Config("stripe_not_configured"))?;

        if customer_id.trim().is_empty() {
            return Err(EdgeError::InvalidInput("missing_customer_id"));
        }

        let mut form = vec![("customer", customer_id.trim())];
        if let Some(url) = return_url {
            form.push(("return_url", url));
        }

        let response = self
            .client
            .post(format!("{}/v1/billing_portal/sessions", self.api_base))
            .bearer_auth(key)
            .form(&form)
            .send()
            .await
            .map_err(|e| EdgeError::Upstream(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            warn!(status = status.as_u16(), customer = %customer_id, "Portal session rejected");
            return Err(EdgeError::UpstreamStatus {
                code: "stripe_error",
                status: status.as_u16(),
            });
        }

        let session: PortalSession = response
            .json()
            .await
            .map_err(|e| EdgeError::Upstream(format!("Invalid portal response: {e}")))?;

        info!(customer = %customer_id, "Billing portal session created");
        Ok(session.url)
    }
}
