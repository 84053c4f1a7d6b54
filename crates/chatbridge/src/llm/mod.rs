//! Provider dispatch and response normalization.

mod anthropic;
mod dispatch;
mod error;
mod gemini;
mod normalize;
mod ollama;
mod openai;
mod provider;
mod registry;
mod transport;
mod types;

pub use anthropic::AnthropicAdapter;
pub use dispatch::{DispatchState, Dispatcher};
pub use error::{DispatchError, UNKNOWN_ERROR};
pub use gemini::GeminiAdapter;
pub use normalize::{ChatRequestBody, HISTORY_WINDOW, window_history};
pub use ollama::OllamaAdapter;
pub use openai::OpenAIAdapter;
pub use provider::{MAX_OUTPUT_TOKENS, ProviderAdapter, ProviderId, TEMPERATURE};
pub use registry::ProviderRegistry;
pub use transport::{HttpTransport, Transport};
pub use types::{
    ApiKey, CanonicalBody, CanonicalResponse, ChatMessage, Credentials, OutboundCall,
    RawResponse, Role, UnifiedRequest,
};
