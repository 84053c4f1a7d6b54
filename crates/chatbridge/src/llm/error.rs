//! Dispatch error types.

use thiserror::Error;

use super::types::CanonicalResponse;

/// Message used when a failure carries no text of its own.
pub const UNKNOWN_ERROR: &str = "An unknown error occurred";

/// Errors that can occur while dispatching a chat request to a provider.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// The requested provider identifier is not in the adapter table.
    #[error("Unsupported provider: {0}")]
    UnsupportedProvider(String),

    /// The provider answered with a non-success status.
    ///
    /// `body` is the raw response text, never re-parsed.
    #[error("{provider} API error: {status_text} - {body}")]
    ProviderHttp {
        provider: &'static str,
        status: u16,
        status_text: String,
        body: String,
    },

    /// The provider's success body did not hold a reply at the expected path.
    #[error("{provider} response missing {path}")]
    Extraction {
        provider: &'static str,
        path: &'static str,
    },

    /// The provider's success body was not valid JSON.
    #[error("invalid {provider} response body: {source}")]
    Parse {
        provider: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// The inbound body could not be read into a chat request at all.
    #[error("invalid request body: {0}")]
    MalformedRequest(String),

    /// The outbound request body could not be encoded.
    #[error("failed to encode request body: {0}")]
    Encode(#[source] serde_json::Error),

    /// A provider URL could not be assembled.
    #[error("invalid {provider} URL: {source}")]
    InvalidUrl {
        provider: &'static str,
        #[source]
        source: url::ParseError,
    },

    /// HTTP request failed before a response was received.
    #[error("http request failed: {0}")]
    Request(#[source] reqwest::Error),
}

// Request URLs can carry an API key in the query string.
impl From<reqwest::Error> for DispatchError {
    fn from(err: reqwest::Error) -> Self {
        DispatchError::Request(err.without_url())
    }
}

impl DispatchError {
    /// HTTP status the caller sees for this failure.
    pub fn status_code(&self) -> u16 {
        match self {
            DispatchError::UnsupportedProvider(_) => 400,
            _ => 500,
        }
    }

    /// Caller-visible message, falling back to [`UNKNOWN_ERROR`] when empty.
    pub fn public_message(&self) -> String {
        let message = self.to_string();
        if message.trim().is_empty() {
            UNKNOWN_ERROR.to_string()
        } else {
            message
        }
    }
}

impl From<DispatchError> for CanonicalResponse {
    fn from(err: DispatchError) -> Self {
        CanonicalResponse::error(err.status_code(), err.public_message())
    }
}
