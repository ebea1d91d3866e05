//! Follow repository.

use std::sync::Arc;

use crate::entities::{follow, Follow};
use atelier_common::{AppError, AppResult};
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder};

use super::map_insert_err;

/// Follow repository for database operations.
#[derive(Clone)]
pub struct FollowRepository {
    db: Arc<DatabaseConnection>,
}

impl FollowRepository {
    /// Create a new follow repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Insert a follow edge.
    ///
    /// The unique (follower, followee) index guards the toggle: a conflict
    /// means the edge exists and the caller flips to a delete. A missing
    /// followee surfaces through the foreign key as [`AppError::NotFound`].
    pub async fn create(&self, model: follow::ActiveModel) -> AppResult<follow::Model> {
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| map_insert_err(&e))
    }

    /// Delete the edge for a (follower, followee) pair. Idempotent.
    pub async fn delete_by_pair(&self, follower_id: &str, followee_id: &str) -> AppResult<u64> {
        let result = Follow::delete_many()
            .filter(follow::Column::FollowerId.eq(follower_id))
            .filter(follow::Column::FolloweeId.eq(followee_id))
            .exec(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(result.rows_affected)
    }

    /// List the users a user follows, newest edge first.
    pub async fn find_following(&self, follower_id: &str) -> AppResult<Vec<follow::Model>> {
        Follow::find()
            .filter(follow::Column::FollowerId.eq(follower_id))
            .order_by_desc(follow::Column::CreatedAt)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Find which of `followee_ids` a user follows (feed annotation).
    pub async fn find_followees_in(
        &self,
        follower_id: &str,
        followee_ids: &[String],
    ) -> AppResult<Vec<follow::Model>> {
        if followee_ids.is_empty() {
            return Ok(Vec::new());
        }

        Follow::find()
            .filter(follow::Column::FollowerId.eq(follower_id))
            .filter(follow::Column::FolloweeId.is_in(followee_ids.iter().cloned()))
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
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};

    fn create_test_follow(id: &str, follower_id: &str, followee_id: &str) -> follow::Model {
        follow::Model {
            id: id.to_string(),
            follower_id: follower_id.to_string(),
            followee_id: followee_id.to_string(),
            created_at: Utc::now().into(),
        }
    }

    #[tokio::test]
    async fn test_find_following() {
        let f1 = create_test_follow("f1", "u1", "u2");
        let f2 = create_test_follow("f2", "u1", "u3");

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[f1, f2]])
                .into_connection(),
        );

        let repo = FollowRepository::new(db);
        let result = repo.find_following("u1").await.unwrap();

        assert_eq!(result.len(), 2);
        assert_eq!(result[0].followee_id, "u2");
    }

    #[tokio::test]
    async fn test_delete_by_pair_missing_edge() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_exec_results([MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 0,
                }])
                .into_connection(),
        );

        let repo = FollowRepository::new(db);
        let deleted = repo.delete_by_pair("u1", "u9").await.unwrap();

        assert_eq!(deleted, 0);
    }

    #[tokio::test]
    async fn test_find_followees_in_empty_skips_query() {
        let db = Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection());

        let repo = FollowRepository::new(db);
        let result = repo.find_followees_in("u1", &[]).await.unwrap();

        assert!(result.is_empty());
    }
}
