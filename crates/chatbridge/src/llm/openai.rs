//! OpenAI chat completions adapter.

use serde::Serialize;
use serde_json::Value;

use super::error::DispatchError;
use super::provider::{MAX_OUTPUT_TOKENS, ProviderAdapter, TEMPERATURE, join_url, reply_at};
use super::types::{ChatMessage, OutboundCall, UnifiedRequest};

/// OpenAI adapter. Forwards the windowed history with roles untouched.
pub struct OpenAIAdapter {
    base_url: String,
}

impl OpenAIAdapter {
    pub const DEFAULT_BASE_URL: &'static str = "https://api.openai.com";
    pub const MODEL: &'static str = "gpt-4";

    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }
}

impl Default for OpenAIAdapter {
    fn default() -> Self {
        Self::new(Self::DEFAULT_BASE_URL)
    }
}

#[derive(Serialize)]
struct Request<'a> {
    model: &'static str,
    messages: &'a [ChatMessage],
    max_tokens: u32,
    temperature: f64,
}

impl ProviderAdapter for OpenAIAdapter {
    fn name(&self) -> &'static str {
        "OpenAI"
    }

    fn build_call(&self, request: &UnifiedRequest) -> Result<OutboundCall, DispatchError> {
        let body = serde_json::to_value(Request {
            model: Self::MODEL,
            messages: &request.messages,
            max_tokens: MAX_OUTPUT_TOKENS,
            temperature: TEMPERATURE,
        })
        .map_err(DispatchError::Encode)?;

        let url = join_url(&self.base_url, "/v1/chat/completions");
        Ok(OutboundCall::new(url, body).header(
            "Authorization",
            format!("Bearer {}", request.credentials.api_key_or_empty()),
        ))
    }

    fn extract_reply(&self, body: &Value) -> Result<String, DispatchError> {
        reply_at(
            body,
            "/choices/0/message/content",
            self.name(),
            "choices[0].message.content",
        )
    }
}
