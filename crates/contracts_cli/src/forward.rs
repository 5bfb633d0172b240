//! Best-effort delivery of validation events to the event store.
//!
//! [`EventForwarder`] POSTs a JSON-encoded [`ValidationEvent`] to
//! `<base>/events` once. The outcome is recorded on the event and never
//! turns into a command failure.

use contracts_core::{ForwardStatus, ValidationEvent};
use std::time::Duration;
use tracing::{info, warn};

/// HTTP request timeout for the single delivery attempt.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(3);

/// Delivers validation events to an event store endpoint.
pub struct EventForwarder {
    client: reqwest::Client,
    endpoint: String,
}

impl EventForwarder {
    /// Creates a forwarder posting to the `/events` route under `base_url`.
    pub fn new(base_url: &str) -> reqwest::Result<Self> {
        let client = reqwest::Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            client,
            endpoint: events_endpoint(base_url),
        })
    }

    /// Posts `event` and returns what happened.
    ///
    /// Any HTTP response counts as delivered and carries its status code.
    pub async fn forward(&self, event: &ValidationEvent) -> ForwardStatus {
        match self.client.post(&self.endpoint).json(event).send().await {
            Ok(response) => {
                let status = response.status();
                if status.is_success() {
                    info!(url = %self.endpoint, status = status.as_u16(), "Event forwarded");
                } else {
                    warn!(url = %self.endpoint, status = status.as_u16(), "Event store rejected event");
                }
                ForwardStatus::Delivered(status.as_u16())
            }
            Err(e) => {
                warn!(url = %self.endpoint, error = %e, "Event forwarding failed");
                ForwardStatus::Failed(e.to_string())
            }
        }
    }
}

/// Forwards `event` when a base URL is configured, recording the outcome.
pub async fn forward_event(base_url: Option<&str>, event: &mut ValidationEvent) {
    let Some(base_url) = base_url.map(str::trim).filter(|url| !url.is_empty()) else {
        return;
    };

    let status = match EventForwarder::new(base_url) {
        Ok(forwarder) => forwarder.forward(event).await,
        Err(e) => ForwardStatus::Failed(e.to_string()),
    };
    event.record_forwarding(status);
}

fn events_endpoint(base_url: &str) -> String {
    format!("{}/events", base_url.trim_end_matches('/'))
}
