//! Project request repository.

use std::sync::Arc;

use crate::entities::{project_request, ProjectRequest};
use crate::entities::project_request::ProjectRequestStatus;
use atelier_common::{AppError, AppResult};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
};

use super::map_insert_err;

/// Project request repository for database operations.
#[derive(Clone)]
pub struct ProjectRequestRepository {
    db: Arc<DatabaseConnection>,
}

impl ProjectRequestRepository {
    /// Create a new project request repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Insert a project request row.
    pub async fn create(
        &self,
        model: project_request::ActiveModel,
    ) -> AppResult<project_request::Model> {
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| map_insert_err(&e))
    }

    /// Update a project request row.
    pub async fn update(
        &self,
        model: project_request::ActiveModel,
    ) -> AppResult<project_request::Model> {
        model
            .update(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Find the most recent PENDING request from a buyer to an artist.
    pub async fn find_latest_pending(
        &self,
        buyer_id: &str,
        artist_id: &str,
    ) -> AppResult<Option<project_request::Model>> {
        ProjectRequest::find()
            .filter(project_request::Column::BuyerId.eq(buyer_id))
            .filter(project_request::Column::ArtistId.eq(artist_id))
            .filter(project_request::Column::Status.eq(ProjectRequestStatus::Pending))
            .order_by_desc(project_request::Column::CreatedAt)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Find the most recent ACCEPTED request from a buyer to an artist that
    /// has not been delivered yet.
    pub async fn find_latest_accepted_undelivered(
        &self,
        buyer_id: &str,
        artist_id: &str,
    ) -> AppResult<Option<project_request::Model>> {
        ProjectRequest::find()
            .filter(project_request::Column::BuyerId.eq(buyer_id))
            .filter(project_request::Column::ArtistId.eq(artist_id))
            .filter(project_request::Column::Status.eq(ProjectRequestStatus::Accepted))
            .filter(project_request::Column::DeliveryLink.is_null())
            .order_by_desc(project_request::Column::CreatedAt)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// List an artist's ACCEPTED requests, newest first.
    pub async fn find_accepted_for_artist(
        &self,
        artist_id: &str,
    ) -> AppResult<Vec<project_request::Model>> {
        ProjectRequest::find()
            .filter(project_request::Column::ArtistId.eq(artist_id))
            .filter(project_request::Column::Status.eq(ProjectRequestStatus::Accepted))
            .order_by_desc(project_request::Column::CreatedAt)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// List a buyer's ACCEPTED requests, newest first.
    pub async fn find_accepted_for_buyer(
        &self,
        buyer_id: &str,
    ) -> AppResult<Vec<project_request::Model>> {
        ProjectRequest::find()
            .filter(project_request::Column::BuyerId.eq(buyer_id))
            .filter(project_request::Column::Status.eq(ProjectRequestStatus::Accepted))
            .order_by_desc(project_request::Column::CreatedAt)
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

    fn create_test_request(id: &str, status: ProjectRequestStatus) -> project_request::Model {
        project_request::Model {
            id: id.to_string(),
            buyer_id: "buyer".to_string(),
            artist_id: "artist".to_string(),
            chat_id: Some("c1".to_string()),
            budget: "500 EUR".to_string(),
            deadline: None,
            notes: None,
            status,
            delivery_link: None,
            delivered_at: None,
            created_at: Utc::now().into(),
        }
    }

    #[tokio::test]
    async fn test_find_latest_pending_found() {
        let request = create_test_request("pr1", ProjectRequestStatus::Pending);

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[request]])
                .into_connection(),
        );

        let repo = ProjectRequestRepository::new(db);
        let result = repo.find_latest_pending("buyer", "artist").await.unwrap();

        assert!(result.is_some());
        assert_eq!(result.unwrap().status, ProjectRequestStatus::Pending);
    }

    #[tokio::test]
    async fn test_find_latest_pending_none() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<project_request::Model>::new()])
                .into_connection(),
        );

        let repo = ProjectRequestRepository::new(db);
        let result = repo.find_latest_pending("buyer", "artist").await.unwrap();

        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_find_accepted_for_artist() {
        let r1 = create_test_request("pr1", ProjectRequestStatus::Accepted);
        let r2 = create_test_request("pr2", ProjectRequestStatus::Accepted);

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[r1, r2]])
                .into_connection(),
        );

        let repo = ProjectRequestRepository::new(db);
        let result = repo.find_accepted_for_artist("artist").await.unwrap();

        assert_eq!(result.len(), 2);
    }
}
