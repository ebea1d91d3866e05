//! Creation service: ownership-scoped portfolio CRUD.

use atelier_common::{AppError, AppResult, IdGenerator};
use atelier_db::{
    entities::creation,
    repositories::CreationRepository,
};
use chrono::Utc;
use sea_orm::Set;
use serde::Deserialize;
use validator::Validate;

/// Input for creating or updating a creation.
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreationInput {
    #[validate(length(max = 512))]
    pub title: Option<String>,

    #[validate(length(max = 1024))]
    pub link: Option<String>,

    #[validate(length(max = 1024))]
    pub image_url: Option<String>,

    #[validate(length(max = 4096))]
    pub description: Option<String>,
}

impl CreationInput {
    /// Required, trimmed title.
    fn title(&self) -> AppResult<String> {
        let title = self.title.as_deref().unwrap_or("").trim().to_string();
        if title.is_empty() {
            return Err(AppError::BadRequest("Title is required".to_string()));
        }
        Ok(title)
    }

    fn optional(value: Option<&str>) -> Option<String> {
        value
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(ToString::to_string)
    }
}

/// Creation service for business logic.
#[derive(Clone)]
pub struct CreationService {
    creation_repo: CreationRepository,
    id_gen: IdGenerator,
}

impl CreationService {
    /// Create a new creation service.
    #[must_use]
    pub const fn new(creation_repo: CreationRepository) -> Self {
        Self {
            creation_repo,
            id_gen: IdGenerator::new(),
        }
    }

    /// The caller's creations, newest first.
    pub async fn list(&self, owner_id: &str) -> AppResult<Vec<creation::Model>> {
        self.creation_repo.find_by_owner(owner_id).await
    }

    /// Create a portfolio item.
    pub async fn create(&self, owner_id: &str, input: CreationInput) -> AppResult<creation::Model> {
        input.validate()?;
        let title = input.title()?;

        let model = creation::ActiveModel {
            id: Set(self.id_gen.generate()),
            user_id: Set(owner_id.to_string()),
            title: Set(title),
            link: Set(CreationInput::optional(input.link.as_deref())),
            image_url: Set(CreationInput::optional(input.image_url.as_deref())),
            description: Set(CreationInput::optional(input.description.as_deref())),
            created_at: Set(Utc::now().into()),
        };

        self.creation_repo.create(model).await
    }

    /// Replace a creation's fields. Only the owner's rows are reachable.
    pub async fn update(
        &self,
        owner_id: &str,
        id: &str,
        input: CreationInput,
    ) -> AppResult<creation::Model> {
        input.validate()?;
        let title = input.title()?;

        let existing = self
            .creation_repo
            .find_owned(id, owner_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Creation not found".to_string()))?;

        let mut active: creation::ActiveModel = existing.into();
        active.title = Set(title);
        active.link = Set(CreationInput::optional(input.link.as_deref()));
        active.image_url = Set(CreationInput::optional(input.image_url.as_deref()));
        active.description = Set(CreationInput::optional(input.description.as_deref()));

        self.creation_repo.update(active).await
    }

    /// Delete a creation. Only the owner's rows are reachable.
    pub async fn delete(&self, owner_id: &str, id: &str) -> AppResult<()> {
        let existing = self
            .creation_repo
            .find_owned(id, owner_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Creation not found".to_string()))?;

        self.creation_repo.delete(existing).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use sea_orm::{DatabaseBackend, DatabaseConnection, MockDatabase};
    use std::sync::Arc;

    fn service(db: DatabaseConnection) -> CreationService {
        CreationService::new(CreationRepository::new(Arc::new(db)))
    }

    #[tokio::test]
    async fn test_create_requires_title() {
        let service = service(MockDatabase::new(DatabaseBackend::Postgres).into_connection());

        let result = service
            .create(
                "u1",
                CreationInput {
                    title: Some("  ".to_string()),
                    description: Some("nice".to_string()),
                    ..Default::default()
                },
            )
            .await;

        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }

    #[tokio::test]
    async fn test_update_unowned_creation() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<creation::Model>::new()])
            .into_connection();

        let service = service(db);
        let result = service
            .update(
                "intruder",
                "cr1",
                CreationInput {
                    title: Some("Stolen".to_string()),
                    ..Default::default()
                },
            )
            .await;

        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_delete_unowned_creation() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<creation::Model>::new()])
            .into_connection();

        let service = service(db);
        let result = service.delete("intruder", "cr1").await;

        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[test]
    fn test_optional_fields_blank_to_none() {
        assert_eq!(CreationInput::optional(Some("  ")), None);
        assert_eq!(
            CreationInput::optional(Some(" x ")),
            Some("x".to_string())
        );
        assert_eq!(CreationInput::optional(None), None);
    }
}
