//! Messaging endpoints and the buyer side of the project workflow.
//!
//! Chats are addressed by the other participant's user id, never by a chat
//! id: the thread for a pair is found (or created) on every call.

use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use chrono::{DateTime, Utc};
use atelier_common::AppResult;
use atelier_core::{display_name, CreateProjectRequestInput};
use atelier_db::entities::user::Role;
use atelier_db::entities::{message, user};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{extractors::AuthUser, middleware::AppState};

use super::project_requests::ProjectRequestResponse;

/// Create chats router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/chats", get(list_chats))
        .route(
            "/chats/{user_id}/messages",
            get(list_messages).post(send_message),
        )
        .route(
            "/chats/{user_id}/project-requests",
            post(create_project_request),
        )
}

/// A chat partner.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatPartnerResponse {
    pub id: String,
    pub name: String,
    pub role: Option<Role>,
    pub domain: Option<String>,
}

/// Every user the caller shares a chat with.
async fn list_chats(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<ChatPartnerResponse>>> {
    let partners = state.chat_service.partners(&user.id).await?;

    Ok(Json(
        partners
            .into_iter()
            .map(|u| ChatPartnerResponse {
                name: display_name(&u),
                id: u.id,
                role: u.role,
                domain: u.domain,
            })
            .collect(),
    ))
}

/// A message annotated for the caller.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageResponse {
    pub id: String,
    pub text: String,
    pub created_at: DateTime<Utc>,
    pub from_me: bool,
    pub sender_name: String,
}

impl MessageResponse {
    /// Annotate a message from the caller's perspective.
    ///
    /// The sender is always one of the two chat participants.
    pub(super) fn annotate(msg: message::Model, me: &user::Model, other: &user::Model) -> Self {
        let from_me = msg.sender_id == me.id;
        let sender_name = if from_me {
            display_name(me)
        } else {
            display_name(other)
        };
        Self {
            id: msg.id,
            text: msg.text,
            created_at: msg.created_at.into(),
            from_me,
            sender_name,
        }
    }
}

/// The full thread with another user, oldest first.
async fn list_messages(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Path(other_id): Path<String>,
) -> AppResult<Json<Vec<MessageResponse>>> {
    let (other, messages) = state.chat_service.conversation(&user.id, &other_id).await?;

    Ok(Json(
        messages
            .into_iter()
            .map(|m| MessageResponse::annotate(m, &user, &other))
            .collect(),
    ))
}

/// Send message request.
#[derive(Debug, Deserialize)]
pub struct SendMessageRequest {
    pub text: Option<String>,
}

/// Send a message to another user.
async fn send_message(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Path(other_id): Path<String>,
    Json(req): Json<SendMessageRequest>,
) -> AppResult<Json<MessageResponse>> {
    info!(sender = %user.id, recipient = %other_id, "Sending message");

    let message = state
        .chat_service
        .send_message(&user.id, &other_id, req.text.as_deref().unwrap_or(""))
        .await?;

    Ok(Json(MessageResponse {
        id: message.id,
        text: message.text,
        created_at: message.created_at.into(),
        from_me: true,
        sender_name: display_name(&user),
    }))
}

/// Project request creation response: the request plus the summary message
/// appended to the chat.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProjectRequestResponse {
    pub project_request: ProjectRequestResponse,
    pub message: MessageResponse,
}

/// Buyer sends a project request to the artist behind this chat.
async fn create_project_request(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Path(artist_id): Path<String>,
    Json(input): Json<CreateProjectRequestInput>,
) -> AppResult<Json<CreateProjectRequestResponse>> {
    info!(buyer = %user.id, artist = %artist_id, "Creating project request");

    let (request, message) = state
        .project_request_service
        .create(&user, &artist_id, input)
        .await?;

    Ok(Json(CreateProjectRequestResponse {
        project_request: ProjectRequestResponse::from(request),
        message: MessageResponse {
            id: message.id,
            text: message.text,
            created_at: message.created_at.into(),
            from_me: true,
            sender_name: display_name(&user),
        },
    }))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn test_user(id: &str, alias: &str) -> user::Model {
        user::Model {
            id: id.to_string(),
            external_id: format!("idp|{id}"),
            email: None,
            name: None,
            alias: Some(alias.to_string()),
            role: None,
            country: None,
            domain: None,
            languages: None,
            avatar_url: None,
            wallet_address: "aa".repeat(32),
            created_at: Utc::now().into(),
            updated_at: None,
        }
    }

    #[test]
    fn test_message_annotation() {
        let me = test_user("u1", "me");
        let other = test_user("u2", "them");
        let msg = message::Model {
            id: "m1".to_string(),
            chat_id: "c1".to_string(),
            sender_id: "u2".to_string(),
            text: "hello".to_string(),
            created_at: Utc::now().into(),
        };

        let annotated = MessageResponse::annotate(msg, &me, &other);

        assert!(!annotated.from_me);
        assert_eq!(annotated.sender_name, "them");
    }

    #[test]
    fn test_message_response_serialization() {
        let response = MessageResponse {
            id: "m1".to_string(),
            text: "hello".to_string(),
            created_at: Utc::now(),
            from_me: true,
            sender_name: "me".to_string(),
        };

        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("\"fromMe\":true"));
        assert!(json.contains("\"senderName\":\"me\""));
    }
}
