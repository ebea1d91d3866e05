//! Chat repository.

use std::sync::Arc;

use crate::entities::{chat, Chat};
use atelier_common::{AppError, AppResult};
use sea_orm::{ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, QueryFilter};

use super::map_insert_err;

/// Chat repository for database operations.
///
/// Rows store the participant pair sorted (`user_a_id < user_b_id`), so a
/// single lookup covers both argument orders once the caller canonicalizes.
#[derive(Clone)]
pub struct ChatRepository {
    db: Arc<DatabaseConnection>,
}

impl ChatRepository {
    /// Create a new chat repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find the chat for a canonical (sorted) participant pair.
    pub async fn find_by_pair(&self, user_a_id: &str, user_b_id: &str) -> AppResult<Option<chat::Model>> {
        Chat::find()
            .filter(chat::Column::UserAId.eq(user_a_id))
            .filter(chat::Column::UserBId.eq(user_b_id))
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Insert a chat row.
    ///
    /// A concurrent creation for the same pair surfaces as
    /// [`AppError::Conflict`]; callers recover by re-reading.
    pub async fn create(&self, model: chat::ActiveModel) -> AppResult<chat::Model> {
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| map_insert_err(&e))
    }

    /// List every chat a user participates in.
    pub async fn find_for_user(&self, user_id: &str) -> AppResult<Vec<chat::Model>> {
        Chat::find()
            .filter(
                Condition::any()
                    .add(chat::Column::UserAId.eq(user_id))
                    .add(chat::Column::UserBId.eq(user_id)),
            )
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

    fn create_test_chat(id: &str, a: &str, b: &str) -> chat::Model {
        chat::Model {
            id: id.to_string(),
            user_a_id: a.to_string(),
            user_b_id: b.to_string(),
            created_at: Utc::now().into(),
        }
    }

    #[tokio::test]
    async fn test_find_by_pair_found() {
        let chat = create_test_chat("c1", "u1", "u2");

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[chat]])
                .into_connection(),
        );

        let repo = ChatRepository::new(db);
        let result = repo.find_by_pair("u1", "u2").await.unwrap();

        assert!(result.is_some());
    }

    #[tokio::test]
    async fn test_find_for_user() {
        let c1 = create_test_chat("c1", "u1", "u2");
        let c2 = create_test_chat("c2", "u1", "u3");

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[c1, c2]])
                .into_connection(),
        );

        let repo = ChatRepository::new(db);
        let result = repo.find_for_user("u1").await.unwrap();

        assert_eq!(result.len(), 2);
    }

    #[test]
    fn test_other_participant() {
        let chat = create_test_chat("c1", "u1", "u2");
        assert_eq!(chat.other_participant("u1"), "u2");
        assert_eq!(chat.other_participant("u2"), "u1");
    }
}
