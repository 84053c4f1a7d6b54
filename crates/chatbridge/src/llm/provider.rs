//! Provider identifiers and the adapter trait.

use std::fmt;
use std::str::FromStr;

use serde_json::Value;

use super::error::DispatchError;
use super::types::{OutboundCall, UnifiedRequest};

/// Output token cap sent to every provider that accepts one.
pub const MAX_OUTPUT_TOKENS: u32 = 1000;

/// Sampling temperature sent to every provider that accepts one.
pub const TEMPERATURE: f64 = 0.7;

/// Supported provider identifiers, as spelled by callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderId {
    OpenAI,
    Anthropic,
    /// Alias of [`ProviderId::Anthropic`].
    Claude,
    Gemini,
    Ollama,
    OllamaCloud,
}

impl ProviderId {
    pub const ALL: [ProviderId; 6] = [
        ProviderId::OpenAI,
        ProviderId::Anthropic,
        ProviderId::Claude,
        ProviderId::Gemini,
        ProviderId::Ollama,
        ProviderId::OllamaCloud,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderId::OpenAI => "openai",
            ProviderId::Anthropic => "anthropic",
            ProviderId::Claude => "claude",
            ProviderId::Gemini => "gemini",
            ProviderId::Ollama => "ollama",
            ProviderId::OllamaCloud => "ollamaCloud",
        }
    }
}

impl fmt::Display for ProviderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProviderId {
    type Err = DispatchError;

    /// Exact, case-sensitive match.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ProviderId::ALL
            .into_iter()
            .find(|id| id.as_str() == s)
            .ok_or_else(|| DispatchError::UnsupportedProvider(s.to_string()))
    }
}

/// Translates between the unified request and one provider's wire format.
pub trait ProviderAdapter: Send + Sync {
    /// Human-readable provider name used in error messages.
    fn name(&self) -> &'static str;

    /// Build the provider HTTP request for a normalized chat request.
    fn build_call(&self, request: &UnifiedRequest) -> Result<OutboundCall, DispatchError>;

    /// Pull the assistant reply text out of a provider success body.
    fn extract_reply(&self, body: &Value) -> Result<String, DispatchError>;
}

/// Read a string at a JSON pointer, failing with an extraction error naming `path`.
pub(crate) fn reply_at(
    body: &Value,
    pointer: &str,
    provider: &'static str,
    path: &'static str,
) -> Result<String, DispatchError> {
    body.pointer(pointer)
        .and_then(Value::as_str)
        .map(str::to_owned)
        .ok_or(DispatchError::Extraction { provider, path })
}

/// Join a base URL and an absolute path without doubling the slash.
pub(crate) fn join_url(base: &str, path: &str) -> String {
    format!("{}{}", base.trim_end_matches('/'), path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_known_identifier() {
        for id in ProviderId::ALL {
            assert_eq!(id.as_str().parse::<ProviderId>().unwrap(), id);
        }
    }

    #[test]
    fn parsing_is_exact() {
        for raw in ["OpenAI", "ollamacloud", " openai", "mistral", ""] {
            let err = raw.parse::<ProviderId>().unwrap_err();
            assert!(matches!(err, DispatchError::UnsupportedProvider(ref s) if s == raw));
        }
    }

    #[test]
    fn reply_at_requires_a_string() {
        let body = serde_json::json!({"message": {"content": "hi", "n": 3}});
        assert_eq!(
            reply_at(&body, "/message/content", "Ollama", "message.content").unwrap(),
            "hi"
        );
        assert!(reply_at(&body, "/message/n", "Ollama", "message.n").is_err());
        assert!(reply_at(&body, "/message/missing", "Ollama", "message.missing").is_err());
    }

    #[test]
    fn join_url_trims_trailing_slash() {
        assert_eq!(
            join_url("http://localhost:11434/", "/api/chat"),
            "http://localhost:11434/api/chat"
        );
        assert_eq!(
            join_url("http://localhost:11434", "/api/chat"),
            "http://localhost:11434/api/chat"
        );
    }
}
