//! Chat assistant endpoint.

use axum::{extract::State, routing::post, Json, Router};
use atelier_common::AppResult;
use serde::{Deserialize, Serialize};

use crate::middleware::AppState;

/// Create assistant router.
pub fn router() -> Router<AppState> {
    Router::new().route("/chat", post(chat))
}

/// Chat request.
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub message: Option<String>,
}

/// Chat reply response.
#[derive(Debug, Serialize)]
pub struct ChatReplyResponse {
    pub reply: String,
}

/// Relay a message to the assistant and return the generated reply.
async fn chat(
    State(state): State<AppState>,
    Json(req): Json<ChatRequest>,
) -> AppResult<Json<ChatReplyResponse>> {
    let reply = state
        .assistant_service
        .reply(req.message.as_deref().unwrap_or(""))
        .await?;

    Ok(Json(ChatReplyResponse { reply }))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_reply_serialization() {
        let response = ChatReplyResponse {
            reply: "Set your role from the profile page.".to_string(),
        };

        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("\"reply\":\"Set your role"));
    }
}
