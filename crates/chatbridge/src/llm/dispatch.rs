//! Provider dispatch: normalize, select adapter, call out, normalize back.

use std::fmt;
use std::sync::Arc;

use serde_json::Value;
use tracing::{Instrument, debug, info_span, warn};
use ulid::Ulid;

use super::error::DispatchError;
use super::normalize::ChatRequestBody;
use super::registry::ProviderRegistry;
use super::transport::Transport;
use super::types::CanonicalResponse;

/// Lifecycle of a single dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchState {
    Pending,
    Dispatched,
    Resolved,
    Failed,
}

impl fmt::Display for DispatchState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            DispatchState::Pending => "pending",
            DispatchState::Dispatched => "dispatched",
            DispatchState::Resolved => "resolved",
            DispatchState::Failed => "failed",
        };
        f.write_str(s)
    }
}

/// Routes chat requests to provider adapters.
///
/// Stateless across calls: one outbound request per dispatch, no retries.
#[derive(Clone)]
pub struct Dispatcher {
    registry: ProviderRegistry,
    transport: Arc<dyn Transport>,
}

impl Dispatcher {
    pub fn new(registry: ProviderRegistry, transport: Arc<dyn Transport>) -> Self {
        Self {
            registry,
            transport,
        }
    }

    /// Dispatch a caller request and fold every outcome into a canonical response.
    pub async fn dispatch(&self, body: ChatRequestBody) -> CanonicalResponse {
        let span = info_span!("dispatch", request_id = %Ulid::new(), provider = %body.provider);

        async move {
            debug!(state = %DispatchState::Pending, "Chat request received");
            match self.try_dispatch(body).await {
                Ok(content) => {
                    debug!(state = %DispatchState::Resolved, "Provider reply extracted");
                    CanonicalResponse::content(content)
                }
                Err(e) => {
                    warn!(state = %DispatchState::Failed, error = %e, "Dispatch failed");
                    CanonicalResponse::from(e)
                }
            }
        }
        .instrument(span)
        .await
    }

    /// Fold a failure that happened before dispatch into a canonical response.
    pub fn reject(&self, err: DispatchError) -> CanonicalResponse {
        warn!(state = %DispatchState::Failed, error = %err, "Chat request rejected");
        CanonicalResponse::from(err)
    }

    /// Dispatch and return the reply text, or the typed failure.
    pub async fn try_dispatch(&self, body: ChatRequestBody) -> Result<String, DispatchError> {
        let request = body.normalize()?;
        let adapter = self.registry.resolve(request.provider)?;
        let call = adapter.build_call(&request)?;

        debug!(
            state = %DispatchState::Dispatched,
            messages = request.messages.len(),
            "Calling provider"
        );
        let response = self.transport.execute(call).await?;

        if !response.is_success() {
            return Err(DispatchError::ProviderHttp {
                provider: adapter.name(),
                status: response.status,
                status_text: response.status_text,
                body: response.body,
            });
        }

        let json: Value =
            serde_json::from_str(&response.body).map_err(|source| DispatchError::Parse {
                provider: adapter.name(),
                source,
            })?;

        adapter.extract_reply(&json)
    }
}
