//! Inbound request shape and history windowing.

use serde::Deserialize;

use super::error::DispatchError;
use super::provider::ProviderId;
use super::types::{ApiKey, ChatMessage, Credentials, UnifiedRequest, null_as_default};

/// Number of prior turns forwarded to a provider.
pub const HISTORY_WINDOW: usize = 10;

/// The chat request body as sent by callers.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequestBody {
    #[serde(default, deserialize_with = "null_as_default")]
    pub provider: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub messages: Vec<ChatMessage>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub context_message: String,
    #[serde(default)]
    pub api_key: Option<ApiKey>,
    #[serde(default)]
    pub ollama_url: Option<String>,
    #[serde(default)]
    pub ollama_model: Option<String>,
}

impl ChatRequestBody {
    /// Resolve the provider and window the history.
    ///
    /// Fails only when the provider identifier is unknown; nothing else about
    /// the body is validated here.
    pub fn normalize(self) -> Result<UnifiedRequest, DispatchError> {
        let provider: ProviderId = self.provider.parse()?;

        Ok(UnifiedRequest {
            provider,
            messages: window_history(&self.messages, &self.context_message),
            context_message: self.context_message,
            credentials: Credentials {
                api_key: self.api_key,
                base_url: non_empty(self.ollama_url),
                model_override: non_empty(self.ollama_model),
            },
        })
    }
}

/// Keep the last [`HISTORY_WINDOW`] messages in order and append the context
/// message as a `user` turn.
pub fn window_history(messages: &[ChatMessage], context_message: &str) -> Vec<ChatMessage> {
    let start = messages.len().saturating_sub(HISTORY_WINDOW);
    let mut windowed = Vec::with_capacity(messages.len() - start + 1);
    windowed.extend_from_slice(&messages[start..]);
    windowed.push(ChatMessage::user(context_message));
    windowed
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
