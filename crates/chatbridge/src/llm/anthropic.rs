//! Anthropic messages adapter, served under both `anthropic` and `claude`.

use serde::Serialize;
use serde_json::Value;

use super::error::DispatchError;
use super::provider::{MAX_OUTPUT_TOKENS, ProviderAdapter, TEMPERATURE, join_url, reply_at};
use super::types::{OutboundCall, Role, UnifiedRequest};

/// Anthropic adapter with native API format.
pub struct AnthropicAdapter {
    base_url: String,
    api_version: String,
}

impl AnthropicAdapter {
    pub const DEFAULT_BASE_URL: &'static str = "https://api.anthropic.com";
    pub const DEFAULT_API_VERSION: &'static str = "2023-06-01";
    pub const MODEL: &'static str = "claude-3-5-sonnet-20241022";

    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_version: Self::DEFAULT_API_VERSION.to_string(),
        }
    }
}

impl Default for AnthropicAdapter {
    fn default() -> Self {
        Self::new(Self::DEFAULT_BASE_URL)
    }
}

// ============================================================================
// Request Types
// ============================================================================

#[derive(Serialize)]
struct Request<'a> {
    model: &'static str,
    max_tokens: u32,
    messages: Vec<RequestMessage<'a>>,
    temperature: f64,
}

#[derive(Serialize)]
struct RequestMessage<'a> {
    role: Role,
    content: &'a str,
}

// ============================================================================
// Adapter
// ============================================================================

impl ProviderAdapter for AnthropicAdapter {
    fn name(&self) -> &'static str {
        "Anthropic"
    }

    fn build_call(&self, request: &UnifiedRequest) -> Result<OutboundCall, DispatchError> {
        // The messages API only knows `user` and `assistant`.
        let messages = request
            .messages
            .iter()
            .map(|msg| RequestMessage {
                role: msg.role.coerce_binary(),
                content: &msg.content,
            })
            .collect();

        let body = serde_json::to_value(Request {
            model: Self::MODEL,
            max_tokens: MAX_OUTPUT_TOKENS,
            messages,
            temperature: TEMPERATURE,
        })
        .map_err(DispatchError::Encode)?;

        let url = join_url(&self.base_url, "/v1/messages");
        Ok(OutboundCall::new(url, body)
            .header("x-api-key", request.credentials.api_key_or_empty())
            .header("anthropic-version", &self.api_version))
    }

    fn extract_reply(&self, body: &Value) -> Result<String, DispatchError> {
        reply_at(body, "/content/0/text", self.name(), "content[0].text")
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::llm::normalize::ChatRequestBody;
    use crate::llm::types::ChatMessage;

    fn request(provider: &str, messages: Vec<ChatMessage>) -> UnifiedRequest {
        ChatRequestBody {
            provider: provider.to_string(),
            messages,
            context_message: "Summarize.".to_string(),
            api_key: Some(crate::llm::ApiKey::new("ak-test")),
            ..Default::default()
        }
        .normalize()
        .unwrap()
    }

    #[test]
    fn build_call_sets_auth_and_version_headers() {
        let call = AnthropicAdapter::default()
            .build_call(&request("anthropic", vec![]))
            .unwrap();

        assert_eq!(call.url, "https://api.anthropic.com/v1/messages");
        assert_eq!(call.headers["x-api-key"], "ak-test");
        assert_eq!(call.headers["anthropic-version"], "2023-06-01");
        assert!(!call.headers.contains_key("Authorization"));
        assert_eq!(call.body["model"], "claude-3-5-sonnet-20241022");
        assert_eq!(call.body["max_tokens"], 1000);
        assert_eq!(call.body["temperature"], 0.7);
    }

    #[test]
    fn build_call_coerces_roles() {
        let call = AnthropicAdapter::default()
            .build_call(&request(
                "claude",
                vec![
                    ChatMessage {
                        role: Role::Other("system".to_string()),
                        content: "rules".to_string(),
                    },
                    ChatMessage::assistant("ok"),
                    ChatMessage {
                        role: Role::Other("tool".to_string()),
                        content: "42".to_string(),
                    },
                ],
            ))
            .unwrap();

        assert_eq!(
            call.body["messages"],
            json!([
                {"role": "user", "content": "rules"},
                {"role": "assistant", "content": "ok"},
                {"role": "user", "content": "42"},
                {"role": "user", "content": "Summarize."}
            ])
        );
    }

    #[test]
    fn extract_reply_reads_first_text_block() {
        let body = json!({
            "id": "msg_01",
            "type": "message",
            "content": [{"type": "text", "text": "hi"}],
            "stop_reason": "end_turn"
        });
        assert_eq!(AnthropicAdapter::default().extract_reply(&body).unwrap(), "hi");
    }

    #[test]
    fn extract_reply_fails_on_empty_content() {
        let body = json!({"content": []});
        let err = AnthropicAdapter::default().extract_reply(&body).unwrap_err();
        assert_eq!(err.to_string(), "Anthropic response missing content[0].text");
    }
}
