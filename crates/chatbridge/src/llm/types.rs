//! Common types for provider dispatch.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

use super::provider::ProviderId;

/// The role of a message sender.
///
/// Callers normally send `user` or `assistant`. Any other label is kept as-is
/// so that adapters which accept it can forward it untouched. A missing or
/// null role becomes an empty label; the provider decides whether to accept it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Option<String>", into = "String")]
pub enum Role {
    User,
    Assistant,
    Other(String),
}

impl Role {
    pub fn as_str(&self) -> &str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
            Role::Other(label) => label.as_str(),
        }
    }

    /// Collapse to the two-role set: everything but `assistant` becomes `user`.
    pub fn coerce_binary(&self) -> Role {
        match self {
            Role::Assistant => Role::Assistant,
            _ => Role::User,
        }
    }
}

impl From<String> for Role {
    fn from(label: String) -> Self {
        match label.as_str() {
            "user" => Role::User,
            "assistant" => Role::Assistant,
            _ => Role::Other(label),
        }
    }
}

impl From<Option<String>> for Role {
    fn from(label: Option<String>) -> Self {
        Role::from(label.unwrap_or_default())
    }
}

impl Default for Role {
    fn default() -> Self {
        Role::Other(String::new())
    }
}

impl From<Role> for String {
    fn from(role: Role) -> Self {
        match role {
            Role::Other(label) => label,
            other => other.as_str().to_string(),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A message in a chat conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    #[serde(default)]
    pub role: Role,
    #[serde(default, deserialize_with = "null_as_default")]
    pub content: String,
}

/// Deserialize `null` the same way as an absent field.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// A provider API key.
///
/// Opaque: `Debug` is redacted and the value is only read when a header or
/// URL is assembled.
#[derive(Clone, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(<redacted>)")
    }
}

/// Per-request provider credentials and endpoint overrides.
#[derive(Debug, Clone, Default)]
pub struct Credentials {
    pub api_key: Option<ApiKey>,
    pub base_url: Option<String>,
    pub model_override: Option<String>,
}

impl Credentials {
    /// The API key, or an empty string when the caller sent none.
    ///
    /// A missing key is not rejected locally; the provider's refusal is what
    /// reaches the caller.
    pub fn api_key_or_empty(&self) -> &str {
        self.api_key.as_ref().map(ApiKey::expose).unwrap_or_default()
    }
}

/// A normalized chat request, ready for an adapter.
#[derive(Debug, Clone)]
pub struct UnifiedRequest {
    pub provider: ProviderId,
    /// Windowed history with the context message already appended.
    pub messages: Vec<ChatMessage>,
    pub context_message: String,
    pub credentials: Credentials,
}

/// A provider-specific HTTP request, built and consumed within one dispatch.
#[derive(Clone, PartialEq)]
pub struct OutboundCall {
    pub url: String,
    pub headers: BTreeMap<String, String>,
    pub body: serde_json::Value,
}

impl OutboundCall {
    pub fn new(url: impl Into<String>, body: serde_json::Value) -> Self {
        let mut headers = BTreeMap::new();
        headers.insert("Content-Type".to_string(), "application/json".to_string());
        Self {
            url: url.into(),
            headers,
            body,
        }
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }
}

// URLs may carry a key in the query and headers may carry credentials,
// so only the path and header names are printed.
impl fmt::Debug for OutboundCall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let url = self.url.split('?').next().unwrap_or_default();
        f.debug_struct("OutboundCall")
            .field("url", &url)
            .field("headers", &self.headers.keys().collect::<Vec<_>>())
            .finish_non_exhaustive()
    }
}

/// A provider HTTP response with the body read as text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub status_text: String,
    pub body: String,
}

impl RawResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// The single output shape returned to callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum CanonicalBody {
    Content { content: String },
    Error { error: String },
}

/// A canonical body paired with its HTTP status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanonicalResponse {
    pub status: u16,
    pub body: CanonicalBody,
}

impl CanonicalResponse {
    pub fn content(content: impl Into<String>) -> Self {
        Self {
            status: 200,
            body: CanonicalBody::Content {
                content: content.into(),
            },
        }
    }

    pub fn error(status: u16, error: impl Into<String>) -> Self {
        Self {
            status,
            body: CanonicalBody::Error {
                error: error.into(),
            },
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self.body, CanonicalBody::Content { .. })
    }
}
