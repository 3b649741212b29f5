use anyhow::Context;
use serde::Deserialize;

use crate::models::Signal;

const DEFAULT_BASE_URL: &str = "http://localhost:5000";

/// Confirmation body returned by the accept/cancel endpoints.
#[derive(Debug, Deserialize)]
struct ActionResponse {
    message: String,
}

/// HTTP gateway to the distress API. Holds no local state; the server is the
/// single authority, and every call is one request with no retry or cache.
pub struct SignalGateway {
    client: reqwest::Client,
    base_url: String,
}

impl SignalGateway {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    /// Reads the API host from the environment: `DISTRESS_ENV=production`
    /// selects `DISTRESS_PROD_URL`, anything else `DISTRESS_DEV_URL`, with a
    /// localhost fallback when the variable is unset.
    pub fn from_env() -> Self {
        Self::new(base_url_from_env())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetches the full signal collection in server order.
    pub async fn list_signals(&self) -> anyhow::Result<Vec<Signal>> {
        let url = format!("{}/distress", self.base_url);
        log::debug!("GET {url}");

        let signals = self
            .client
            .get(&url)
            .send()
            .await
            .context("failed to reach the distress API")?
            .error_for_status()
            .context("distress API rejected the signal fetch")?
            .json::<Vec<Signal>>()
            .await
            .context("failed to decode the signal collection")?;

        Ok(signals)
    }

    /// Accepts a signal on behalf of the operator; returns the server's
    /// confirmation message.
    pub async fn accept_signal(&self, id: i64) -> anyhow::Result<String> {
        self.post_action("accept", id).await
    }

    /// Cancels a signal; returns the server's confirmation message.
    pub async fn cancel_signal(&self, id: i64) -> anyhow::Result<String> {
        self.post_action("cancel", id).await
    }

    async fn post_action(&self, action: &str, id: i64) -> anyhow::Result<String> {
        let url = format!("{}{}", self.base_url, action_path(action, id));
        log::debug!("POST {url}");

        let response = self
            .client
            .post(&url)
            .send()
            .await
            .with_context(|| format!("failed to {action} signal {id}"))?
            .error_for_status()
            .with_context(|| format!("distress API rejected the {action} of signal {id}"))?
            .json::<ActionResponse>()
            .await
            .with_context(|| format!("failed to decode the {action} confirmation"))?;

        Ok(response.message)
    }
}

fn action_path(action: &str, id: i64) -> String {
    format!("/distress/{action}/{id}")
}

fn base_url_from_env() -> String {
    let selected = if std::env::var("DISTRESS_ENV").as_deref() == Ok("production") {
        std::env::var("DISTRESS_PROD_URL")
    } else {
        std::env::var("DISTRESS_DEV_URL")
    };

    selected.unwrap_or_else(|_| DEFAULT_BASE_URL.to_string())
}
