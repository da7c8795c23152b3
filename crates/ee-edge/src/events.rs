//! Fire-and-forget event tracking.
//!
//! Events are forwarded on a detached task. Failures are logged and
//! dropped; the caller's response never waits on the collector.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// Event posted by the pages
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TrackEvent {
    pub name: String,
    #[serde(default)]
    pub metadata: Value,
}

/// Event as sent to the collector
#[derive(Debug, Serialize)]
struct ForwardedEvent<'a> {
    name: &'a str,
    metadata: &'a Value,
    tenant: &'a str,
    timestamp: i64,
}

/// Forwards events to the configured collector
#[derive(Debug, Clone)]
pub struct EventForwarder {
    client: reqwest::Client,
    endpoint: Option<String>,
}

impl EventForwarder {
    pub fn new(client: reqwest::Client, endpoint: Option<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.filter(|e| !e.is_empty()),
        }
    }

    /// Spawn delivery of one event; `None` when no collector is configured
    pub fn dispatch(&self, event: TrackEvent, tenant: &str) -> Option<JoinHandle<()>> {
        let Some(endpoint) = self.endpoint.clone() else {
            debug!(event = %event.name, "No event collector configured, dropping");
            return None;
        };

        let client = self.client.clone();
        let tenant = tenant.to_string();

        Some(tokio::spawn(async move {
            let payload = ForwardedEvent {
                name: &event.name,
                metadata: &event.metadata,
                tenant: &tenant,
                timestamp: chrono::Utc::now().timestamp_millis(),
            };

            match client.post(&endpoint).json(&payload).send().await {
                Ok(response) if response.status().is_success() => {
                    debug!(event = %event.name, "Event forwarded");
                }
                Ok(response) => {
                    warn!(event = %event.name, status = response.status().as_u16(), "Event collector rejected event");
                }
                Err(e) => {
                    warn!(event = %event.name, error = %e, "Event forwarding failed");
                }
            }
        }))
    }
}
