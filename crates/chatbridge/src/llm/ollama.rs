//! Ollama chat adapter, for both local servers and Ollama Cloud.

use serde::Serialize;
use serde_json::Value;

use super::error::DispatchError;
use super::provider::{MAX_OUTPUT_TOKENS, ProviderAdapter, TEMPERATURE, join_url, reply_at};
use super::types::{ChatMessage, OutboundCall, UnifiedRequest};

/// Ollama `/api/chat` adapter.
///
/// The base URL and model come from the request when supplied, else from the
/// adapter defaults.
pub struct OllamaAdapter {
    name: &'static str,
    default_url: String,
    authenticated: bool,
}

impl OllamaAdapter {
    pub const DEFAULT_LOCAL_URL: &'static str = "http://localhost:11434";
    pub const DEFAULT_CLOUD_URL: &'static str = "https://ollama.com";
    pub const DEFAULT_MODEL: &'static str = "llama3.3:latest";

    /// Unauthenticated local server.
    pub fn local(default_url: impl Into<String>) -> Self {
        Self {
            name: "Ollama",
            default_url: default_url.into(),
            authenticated: false,
        }
    }

    /// Hosted endpoint with bearer auth.
    pub fn cloud(default_url: impl Into<String>) -> Self {
        Self {
            name: "Ollama Cloud",
            default_url: default_url.into(),
            authenticated: true,
        }
    }
}

#[derive(Serialize)]
struct Request<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    stream: bool,
    options: Options,
}

#[derive(Serialize)]
struct Options {
    temperature: f64,
    num_predict: u32,
}

impl ProviderAdapter for OllamaAdapter {
    fn name(&self) -> &'static str {
        self.name
    }

    fn build_call(&self, request: &UnifiedRequest) -> Result<OutboundCall, DispatchError> {
        let credentials = &request.credentials;
        let model = credentials
            .model_override
            .as_deref()
            .unwrap_or(Self::DEFAULT_MODEL);

        let body = serde_json::to_value(Request {
            model,
            messages: &request.messages,
            stream: false,
            options: Options {
                temperature: TEMPERATURE,
                num_predict: MAX_OUTPUT_TOKENS,
            },
        })
        .map_err(DispatchError::Encode)?;

        let base_url = credentials.base_url.as_deref().unwrap_or(&self.default_url);
        let call = OutboundCall::new(join_url(base_url, "/api/chat"), body);

        if self.authenticated {
            Ok(call.header(
                "Authorization",
                format!("Bearer {}", credentials.api_key_or_empty()),
            ))
        } else {
            Ok(call)
        }
    }

    fn extract_reply(&self, body: &Value) -> Result<String, DispatchError> {
        reply_at(body, "/message/content", self.name, "message.content")
    }
}
