//! Chat service: canonical two-party threads and their messages.

use std::collections::HashMap;

use atelier_common::{AppError, AppResult, IdGenerator};
use atelier_db::{
    entities::{chat, message, user},
    repositories::{ChatRepository, MessageRepository, UserRepository},
};
use chrono::Utc;
use sea_orm::Set;

/// Order a participant pair canonically (smaller id first).
///
/// Chats are stored under the sorted pair, so lookup and creation are
/// independent of which side initiates.
#[must_use]
pub fn canonical_pair<'a>(a: &'a str, b: &'a str) -> (&'a str, &'a str) {
    if a <= b { (a, b) } else { (b, a) }
}

/// Chat service for business logic.
#[derive(Clone)]
pub struct ChatService {
    chat_repo: ChatRepository,
    message_repo: MessageRepository,
    user_repo: UserRepository,
    id_gen: IdGenerator,
}

impl ChatService {
    /// Create a new chat service.
    #[must_use]
    pub const fn new(
        chat_repo: ChatRepository,
        message_repo: MessageRepository,
        user_repo: UserRepository,
    ) -> Self {
        Self {
            chat_repo,
            message_repo,
            user_repo,
            id_gen: IdGenerator::new(),
        }
    }

    /// Find or create the chat for a user pair.
    ///
    /// Insert-then-recover: a concurrent creation for the same pair hits
    /// the unique index and is resolved by re-reading.
    pub async fn get_or_create_chat(&self, me_id: &str, other_id: &str) -> AppResult<chat::Model> {
        if me_id == other_id {
            return Err(AppError::BadRequest("Invalid user id".to_string()));
        }

        let (a, b) = canonical_pair(me_id, other_id);

        if let Some(chat) = self.chat_repo.find_by_pair(a, b).await? {
            return Ok(chat);
        }

        let model = chat::ActiveModel {
            id: Set(self.id_gen.generate()),
            user_a_id: Set(a.to_string()),
            user_b_id: Set(b.to_string()),
            created_at: Set(Utc::now().into()),
        };

        match self.chat_repo.create(model).await {
            Ok(chat) => Ok(chat),
            Err(AppError::Conflict(_)) => self
                .chat_repo
                .find_by_pair(a, b)
                .await?
                .ok_or_else(|| AppError::Internal("Chat vanished after creation conflict".to_string())),
            Err(e) => Err(e),
        }
    }

    /// Send a message to another user, creating the chat when needed.
    pub async fn send_message(
        &self,
        me_id: &str,
        other_id: &str,
        text: &str,
    ) -> AppResult<message::Model> {
        if me_id == other_id {
            return Err(AppError::BadRequest("Invalid user id".to_string()));
        }

        let text = text.trim();
        if text.is_empty() {
            return Err(AppError::BadRequest("Text is required".to_string()));
        }

        // The recipient must exist before we create a thread toward them
        let _other = self.user_repo.get_by_id(other_id).await?;

        let chat = self.get_or_create_chat(me_id, other_id).await?;

        self.append_message(&chat.id, me_id, text).await
    }

    /// Append a line to an existing chat (also used for workflow notices).
    pub async fn append_message(
        &self,
        chat_id: &str,
        sender_id: &str,
        text: &str,
    ) -> AppResult<message::Model> {
        let model = message::ActiveModel {
            id: Set(self.id_gen.generate()),
            chat_id: Set(chat_id.to_string()),
            sender_id: Set(sender_id.to_string()),
            text: Set(text.to_string()),
            created_at: Set(Utc::now().into()),
        };

        self.message_repo.create(model).await
    }

    /// The full thread with another user, oldest first, plus the partner.
    pub async fn conversation(
        &self,
        me_id: &str,
        other_id: &str,
    ) -> AppResult<(user::Model, Vec<message::Model>)> {
        if me_id == other_id {
            return Err(AppError::BadRequest("Invalid user id".to_string()));
        }

        let other = self.user_repo.get_by_id(other_id).await?;
        let chat = self.get_or_create_chat(me_id, other_id).await?;
        let messages = self.message_repo.find_by_chat(&chat.id).await?;

        Ok((other, messages))
    }

    /// Every user the caller shares a chat with.
    pub async fn partners(&self, me_id: &str) -> AppResult<Vec<user::Model>> {
        let chats = self.chat_repo.find_for_user(me_id).await?;
        let partner_ids: Vec<String> = chats
            .iter()
            .map(|c| c.other_participant(me_id).to_string())
            .collect();

        let mut users: HashMap<String, user::Model> = self
            .user_repo
            .find_by_ids(&partner_ids)
            .await?
            .into_iter()
            .map(|u| (u.id.clone(), u))
            .collect();

        Ok(partner_ids
            .iter()
            .filter_map(|id| users.remove(id))
            .collect())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use sea_orm::{DatabaseBackend, DatabaseConnection, MockDatabase};
    use std::sync::Arc;

    fn mock_db() -> DatabaseConnection {
        MockDatabase::new(DatabaseBackend::Postgres).into_connection()
    }

    fn service(
        chat_db: DatabaseConnection,
        message_db: DatabaseConnection,
        user_db: DatabaseConnection,
    ) -> ChatService {
        ChatService::new(
            ChatRepository::new(Arc::new(chat_db)),
            MessageRepository::new(Arc::new(message_db)),
            UserRepository::new(Arc::new(user_db)),
        )
    }

    #[test]
    fn test_canonical_pair_is_symmetric() {
        assert_eq!(canonical_pair("a", "b"), ("a", "b"));
        assert_eq!(canonical_pair("b", "a"), ("a", "b"));
        assert_eq!(canonical_pair("a", "b"), canonical_pair("b", "a"));
    }

    #[tokio::test]
    async fn test_chat_with_self_rejected() {
        let service = service(mock_db(), mock_db(), mock_db());

        let result = service.get_or_create_chat("u1", "u1").await;

        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }

    #[tokio::test]
    async fn test_send_message_requires_text() {
        let service = service(mock_db(), mock_db(), mock_db());

        let result = service.send_message("u1", "u2", "   ").await;

        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }

    #[tokio::test]
    async fn test_get_or_create_reuses_existing_chat() {
        let existing = chat::Model {
            id: "c1".to_string(),
            user_a_id: "u1".to_string(),
            user_b_id: "u2".to_string(),
            created_at: Utc::now().into(),
        };

        let chat_db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[existing]])
            .into_connection();

        let service = service(chat_db, mock_db(), mock_db());
        // Reversed argument order resolves to the same row
        let chat = service.get_or_create_chat("u2", "u1").await.unwrap();

        assert_eq!(chat.id, "c1");
    }
}
