//! Post like repository.

use std::sync::Arc;

use crate::entities::{post_like, PostLike};
use atelier_common::{AppError, AppResult};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
};

use super::map_insert_err;

/// Post like repository for database operations.
#[derive(Clone)]
pub struct PostLikeRepository {
    db: Arc<DatabaseConnection>,
}

impl PostLikeRepository {
    /// Create a new post like repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Insert a like row.
    ///
    /// The unique (post, user) index guards the toggle: inserting an
    /// existing like surfaces as [`AppError::Conflict`], which callers treat
    /// as "already liked" and flip to a delete. No existence pre-check.
    pub async fn create(&self, model: post_like::ActiveModel) -> AppResult<post_like::Model> {
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| map_insert_err(&e))
    }

    /// Delete the like for a (post, user) pair. Idempotent.
    pub async fn delete_by_pair(&self, post_id: &str, user_id: &str) -> AppResult<u64> {
        let result = PostLike::delete_many()
            .filter(post_like::Column::PostId.eq(post_id))
            .filter(post_like::Column::UserId.eq(user_id))
            .exec(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(result.rows_affected)
    }

    /// Count likes on a post.
    pub async fn count_by_post(&self, post_id: &str) -> AppResult<u64> {
        PostLike::find()
            .filter(post_like::Column::PostId.eq(post_id))
            .count(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Find a user's likes among a set of posts (feed annotation).
    pub async fn find_by_user_for_posts(
        &self,
        user_id: &str,
        post_ids: &[String],
    ) -> AppResult<Vec<post_like::Model>> {
        if post_ids.is_empty() {
            return Ok(Vec::new());
        }

        PostLike::find()
            .filter(post_like::Column::UserId.eq(user_id))
            .filter(post_like::Column::PostId.is_in(post_ids.iter().cloned()))
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

    fn create_test_like(id: &str, post_id: &str, user_id: &str) -> post_like::Model {
        post_like::Model {
            id: id.to_string(),
            post_id: post_id.to_string(),
            user_id: user_id.to_string(),
            created_at: Utc::now().into(),
        }
    }

    #[tokio::test]
    async fn test_delete_by_pair_reports_rows() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_exec_results([MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 1,
                }])
                .into_connection(),
        );

        let repo = PostLikeRepository::new(db);
        let deleted = repo.delete_by_pair("p1", "u1").await.unwrap();

        assert_eq!(deleted, 1);
    }

    #[tokio::test]
    async fn test_find_by_user_for_posts() {
        let like = create_test_like("l1", "p1", "u1");

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[like]])
                .into_connection(),
        );

        let repo = PostLikeRepository::new(db);
        let result = repo
            .find_by_user_for_posts("u1", &["p1".to_string(), "p2".to_string()])
            .await
            .unwrap();

        assert_eq!(result.len(), 1);
        assert_eq!(result[0].post_id, "p1");
    }

    #[tokio::test]
    async fn test_find_by_user_for_posts_empty_skips_query() {
        let db = Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection());

        let repo = PostLikeRepository::new(db);
        let result = repo.find_by_user_for_posts("u1", &[]).await.unwrap();

        assert!(result.is_empty());
    }
}
