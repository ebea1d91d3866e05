//! User badge repository.

use std::sync::Arc;

use crate::entities::{user_badge, UserBadge};
use atelier_common::{AppError, AppResult};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
};

use super::map_insert_err;

/// User badge repository for database operations.
#[derive(Clone)]
pub struct UserBadgeRepository {
    db: Arc<DatabaseConnection>,
}

impl UserBadgeRepository {
    /// Create a new user badge repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Insert a badge row.
    pub async fn create(&self, model: user_badge::ActiveModel) -> AppResult<user_badge::Model> {
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| map_insert_err(&e))
    }

    /// List a user's badges, newest first.
    pub async fn find_by_user(&self, user_id: &str) -> AppResult<Vec<user_badge::Model>> {
        UserBadge::find()
            .filter(user_badge::Column::UserId.eq(user_id))
            .order_by_desc(user_badge::Column::CreatedAt)
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

    #[tokio::test]
    async fn test_find_by_user() {
        let badge = user_badge::Model {
            id: "b1".to_string(),
            user_id: "u1".to_string(),
            badge_type: "artist_verified".to_string(),
            tx_signature: "SIMULATED_TX_1".to_string(),
            created_at: Utc::now().into(),
        };

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[badge]])
                .into_connection(),
        );

        let repo = UserBadgeRepository::new(db);
        let result = repo.find_by_user("u1").await.unwrap();

        assert_eq!(result.len(), 1);
        assert_eq!(result[0].badge_type, "artist_verified");
    }
}
