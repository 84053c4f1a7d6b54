//! Chat dispatch HTTP handler.

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::response::{IntoResponse, Response};

use crate::llm::{ChatRequestBody, DispatchError};
use crate::server::AppState;

/// POST /api/ai
///
/// Request body: `{"provider", "messages", "contextMessage", "apiKey"?, "ollamaUrl"?, "ollamaModel"?}`
///
/// Always answers with either `{"content": "..."}` (200) or `{"error": "..."}`.
/// Only an unknown provider is a 400; a body that cannot be read at all is a 500.
pub async fn chat(
    State(state): State<AppState>,
    payload: Result<Json<ChatRequestBody>, JsonRejection>,
) -> Response {
    let Json(body) = match payload {
        Ok(body) => body,
        Err(rejection) => {
            let err = DispatchError::MalformedRequest(rejection.body_text());
            return state.dispatcher.reject(err).into_response();
        }
    };

    state.dispatcher.dispatch(body).await.into_response()
}
