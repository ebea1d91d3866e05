//! Message repository.

use std::sync::Arc;

use crate::entities::{message, Message};
use atelier_common::{AppError, AppResult};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
};

use super::map_insert_err;

/// Message repository for database operations.
#[derive(Clone)]
pub struct MessageRepository {
    db: Arc<DatabaseConnection>,
}

impl MessageRepository {
    /// Create a new message repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Append a message to a chat.
    pub async fn create(&self, model: message::ActiveModel) -> AppResult<message::Model> {
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| map_insert_err(&e))
    }

    /// List a chat's messages, oldest first.
    ///
    /// Ordering is whatever the timestamp column yields; concurrent sends
    /// within the same millisecond have no defined relative order.
    pub async fn find_by_chat(&self, chat_id: &str) -> AppResult<Vec<message::Model>> {
        Message::find()
            .filter(message::Column::ChatId.eq(chat_id))
            .order_by_asc(message::Column::CreatedAt)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::Utc;
    use sea_orm::{DatabaseBackend, MockDatabase};

    fn create_test_message(id: &str, chat_id: &str, sender_id: &str) -> message::Model {
        message::Model {
            id: id.to_string(),
            chat_id: chat_id.to_string(),
            sender_id: sender_id.to_string(),
            text: "hello".to_string(),
            created_at: Utc::now().into(),
        }
    }

    #[tokio::test]
    async fn test_find_by_chat() {
        let m1 = create_test_message("m1", "c1", "u1");
        let m2 = create_test_message("m2", "c1", "u2");

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[m1, m2]])
                .into_connection(),
        );

        let repo = MessageRepository::new(db);
        let result = repo.find_by_chat("c1").await.unwrap();

        assert_eq!(result.len(), 2);
        assert_eq!(result[0].id, "m1");
    }
}
