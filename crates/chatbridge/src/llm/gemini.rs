//! Gemini generateContent adapter.
//!
//! Only the context message is forwarded; prior turns are not sent.

use serde::Serialize;
use serde_json::Value;
use url::Url;

use super::error::DispatchError;
use super::provider::{MAX_OUTPUT_TOKENS, ProviderAdapter, TEMPERATURE, join_url, reply_at};
use super::types::{OutboundCall, UnifiedRequest};

pub struct GeminiAdapter {
    base_url: String,
}

impl GeminiAdapter {
    pub const DEFAULT_BASE_URL: &'static str = "https://generativelanguage.googleapis.com";
    pub const MODEL: &'static str = "gemini-2.5-flash";

    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }
}

impl Default for GeminiAdapter {
    fn default() -> Self {
        Self::new(Self::DEFAULT_BASE_URL)
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Request<'a> {
    contents: [Content<'a>; 1],
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct Content<'a> {
    parts: [Part<'a>; 1],
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f64,
    max_output_tokens: u32,
}

impl ProviderAdapter for GeminiAdapter {
    fn name(&self) -> &'static str {
        "Gemini"
    }

    fn build_call(&self, request: &UnifiedRequest) -> Result<OutboundCall, DispatchError> {
        let body = serde_json::to_value(Request {
            contents: [Content {
                parts: [Part {
                    text: &request.context_message,
                }],
            }],
            generation_config: GenerationConfig {
                temperature: TEMPERATURE,
                max_output_tokens: MAX_OUTPUT_TOKENS,
            },
        })
        .map_err(DispatchError::Encode)?;

        // Key travels in the query string; no auth header.
        let path = format!("/v1beta/models/{}:generateContent", Self::MODEL);
        let mut url = Url::parse(&join_url(&self.base_url, &path)).map_err(|source| {
            DispatchError::InvalidUrl {
                provider: self.name(),
                source,
            }
        })?;
        url.query_pairs_mut()
            .append_pair("key", request.credentials.api_key_or_empty());

        Ok(OutboundCall::new(url.as_str(), body))
    }

    fn extract_reply(&self, body: &Value) -> Result<String, DispatchError> {
        reply_at(
            body,
            "/candidates/0/content/parts/0/text",
            self.name(),
            "candidates[0].content.parts[0].text",
        )
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::llm::normalize::ChatRequestBody;
    use crate::llm::types::ChatMessage;

    #[test]
    fn test_build_call_sends_only_context_message() {
        let request = ChatRequestBody {
            provider: "gemini".to_string(),
            messages: vec![
                ChatMessage::user("earlier question"),
                ChatMessage::assistant("earlier answer"),
            ],
            context_message: "current turn".to_string(),
            api_key: Some(crate::llm::ApiKey::new("g-key")),
            ..Default::default()
        }
        .normalize()
        .unwrap();

        let call = GeminiAdapter::default().build_call(&request).unwrap();

        assert_eq!(
            call.url,
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.5-flash:generateContent?key=g-key"
        );
        assert_eq!(call.headers.len(), 1);
        assert_eq!(
            call.body,
            json!({
                "contents": [{"parts": [{"text": "current turn"}]}],
                "generationConfig": {"temperature": 0.7, "maxOutputTokens": 1000}
            })
        );

        let serialized = call.body.to_string();
        assert!(!serialized.contains("earlier question"));
        assert!(!serialized.contains("earlier answer"));
    }

    #[test]
    fn test_build_call_encodes_key() {
        let request = ChatRequestBody {
            provider: "gemini".to_string(),
            api_key: Some(crate::llm::ApiKey::new("ab&c#d")),
            ..Default::default()
        }
        .normalize()
        .unwrap();

        let call = GeminiAdapter::default().build_call(&request).unwrap();
        assert!(call.url.ends_with(":generateContent?key=ab%26c%23d"), "{}", call.url);

        let parsed = Url::parse(&call.url).unwrap();
        let pairs: Vec<_> = parsed.query_pairs().into_owned().collect();
        assert_eq!(pairs, vec![("key".to_string(), "ab&c#d".to_string())]);
    }

    #[test]
    fn test_build_call_rejects_unusable_base_url() {
        let request = ChatRequestBody {
            provider: "gemini".to_string(),
            ..Default::default()
        }
        .normalize()
        .unwrap();

        let err = GeminiAdapter::new("not a url").build_call(&request).unwrap_err();
        assert!(matches!(err, DispatchError::InvalidUrl { provider: "Gemini", .. }));
        assert_eq!(err.status_code(), 500);
    }

    #[test]
    fn test_extract_reply() {
        let body = json!({
            "candidates": [{
                "content": {"role": "model", "parts": [{"text": "hi"}]},
                "finishReason": "STOP"
            }]
        });
        assert_eq!(GeminiAdapter::default().extract_reply(&body).unwrap(), "hi");
    }

    #[test]
    fn test_extract_reply_blocked_prompt() {
        // Safety-blocked prompts come back with no candidates.
        let body = json!({"promptFeedback": {"blockReason": "SAFETY"}});
        assert!(GeminiAdapter::default().extract_reply(&body).is_err());
    }
}
