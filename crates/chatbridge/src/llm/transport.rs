//! Outbound HTTP execution.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use super::error::DispatchError;
use super::types::{OutboundCall, RawResponse};

/// Executes one outbound call and returns the response with its body as text.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn execute(&self, call: OutboundCall) -> Result<RawResponse, DispatchError>;
}

/// `reqwest`-backed transport. Every call is a `POST` with a JSON body.
#[derive(Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    #[must_use]
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Build a client with an overall per-request timeout.
    pub fn with_timeout(timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self::new(client))
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn execute(&self, call: OutboundCall) -> Result<RawResponse, DispatchError> {
        let mut req = self.client.post(&call.url);
        for (name, value) in &call.headers {
            req = req.header(name, value);
        }

        let response = req.json(&call.body).send().await?;

        let status = response.status();
        let body = response.text().await?;

        Ok(RawResponse {
            status: status.as_u16(),
            status_text: status.canonical_reason().unwrap_or_default().to_string(),
            body,
        })
    }
}
