//! Creation repository.

use std::sync::Arc;

use crate::entities::{creation, Creation};
use atelier_common::{AppError, AppResult};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait, QueryFilter,
    QueryOrder,
};

use super::map_insert_err;

/// Creation repository for database operations.
#[derive(Clone)]
pub struct CreationRepository {
    db: Arc<DatabaseConnection>,
}

impl CreationRepository {
    /// Create a new creation repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Insert a creation row.
    pub async fn create(&self, model: creation::ActiveModel) -> AppResult<creation::Model> {
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| map_insert_err(&e))
    }

    /// Update a creation row.
    pub async fn update(&self, model: creation::ActiveModel) -> AppResult<creation::Model> {
        model
            .update(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// List a user's creations, newest first.
    pub async fn find_by_owner(&self, user_id: &str) -> AppResult<Vec<creation::Model>> {
        Creation::find()
            .filter(creation::Column::UserId.eq(user_id))
            .order_by_desc(creation::Column::CreatedAt)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Find a creation only if it belongs to the given owner.
    pub async fn find_owned(&self, id: &str, user_id: &str) -> AppResult<Option<creation::Model>> {
        Creation::find()
            .filter(creation::Column::Id.eq(id))
            .filter(creation::Column::UserId.eq(user_id))
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Delete a creation row.
    pub async fn delete(&self, model: creation::Model) -> AppResult<()> {
        model
            .delete(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::Utc;
    use sea_orm::{DatabaseBackend, MockDatabase};

    fn create_test_creation(id: &str, user_id: &str) -> creation::Model {
        creation::Model {
            id: id.to_string(),
            user_id: user_id.to_string(),
            title: "Poster series".to_string(),
            link: None,
            image_url: None,
            description: None,
            created_at: Utc::now().into(),
        }
    }

    #[tokio::test]
    async fn test_find_owned_wrong_owner() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<creation::Model>::new()])
                .into_connection(),
        );

        let repo = CreationRepository::new(db);
        let result = repo.find_owned("cr1", "intruder").await.unwrap();

        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_find_by_owner() {
        let c1 = create_test_creation("cr1", "u1");

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[c1]])
                .into_connection(),
        );

        let repo = CreationRepository::new(db);
        let result = repo.find_by_owner("u1").await.unwrap();

        assert_eq!(result.len(), 1);
    }
}
