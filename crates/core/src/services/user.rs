//! User service: identity resolution, profile edits, public surfaces.

use atelier_common::{generate_wallet_address, AppError, AppResult, IdGenerator};
use atelier_db::{
    entities::user::{self, Role},
    entities::{creation, post},
    repositories::{CreationRepository, PostRepository, UserRepository},
};
use chrono::Utc;
use sea_orm::Set;
use serde::Deserialize;
use validator::Validate;

use crate::services::auth::Claims;

/// Render a user the way other users see them named.
#[must_use]
pub fn display_name(user: &user::Model) -> String {
    user.alias
        .clone()
        .or_else(|| user.name.clone())
        .or_else(|| user.email.clone())
        .unwrap_or_else(|| "Unknown".to_string())
}

/// Input for a partial profile update.
///
/// Only fields present in the request body are applied.
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileInput {
    #[validate(length(max = 128))]
    pub alias: Option<String>,

    pub role: Option<Role>,

    #[validate(length(max = 128))]
    pub country: Option<String>,

    /// Applied only when `role` is set to ARTIST in the same request.
    #[validate(length(max = 128))]
    pub domain: Option<String>,

    #[validate(length(max = 512))]
    pub languages: Option<String>,

    #[validate(length(max = 320))]
    pub email: Option<String>,

    #[validate(length(max = 256))]
    pub name: Option<String>,

    #[validate(length(max = 1024))]
    pub avatar_url: Option<String>,
}

/// A user's public profile with their posts and portfolio.
pub struct PublicProfile {
    pub user: user::Model,
    pub posts: Vec<post::Model>,
    pub creations: Vec<creation::Model>,
}

/// User service for business logic.
#[derive(Clone)]
pub struct UserService {
    user_repo: UserRepository,
    post_repo: PostRepository,
    creation_repo: CreationRepository,
    id_gen: IdGenerator,
}

impl UserService {
    /// Create a new user service.
    #[must_use]
    pub const fn new(
        user_repo: UserRepository,
        post_repo: PostRepository,
        creation_repo: CreationRepository,
    ) -> Self {
        Self {
            user_repo,
            post_repo,
            creation_repo,
            id_gen: IdGenerator::new(),
        }
    }

    /// Map verified identity claims to the local user, creating one on
    /// first sight.
    ///
    /// Creation inserts directly and recovers from a unique-constraint
    /// conflict by re-reading: two concurrent first logins for the same
    /// subject id converge on a single row. New users get a placeholder
    /// wallet address.
    pub async fn resolve_external(&self, claims: &Claims) -> AppResult<user::Model> {
        if let Some(user) = self.user_repo.find_by_external_id(&claims.sub).await? {
            return Ok(user);
        }

        let model = user::ActiveModel {
            id: Set(self.id_gen.generate()),
            external_id: Set(claims.sub.clone()),
            email: Set(claims.email.clone()),
            name: Set(claims.display_name()),
            alias: Set(None),
            role: Set(None),
            country: Set(None),
            domain: Set(None),
            languages: Set(None),
            avatar_url: Set(None),
            wallet_address: Set(generate_wallet_address()),
            created_at: Set(Utc::now().into()),
            updated_at: Set(None),
        };

        match self.user_repo.create(model).await {
            Ok(user) => {
                tracing::info!(user = %user.id, "Created user on first login");
                Ok(user)
            }
            // Someone else won the creation race; the row exists now
            Err(AppError::Conflict(_)) => self
                .user_repo
                .find_by_external_id(&claims.sub)
                .await?
                .ok_or_else(|| {
                    AppError::Internal("User vanished after creation conflict".to_string())
                }),
            Err(e) => Err(e),
        }
    }

    /// Apply a partial profile update to the caller's own record.
    ///
    /// Setting role to BUYER clears the domain; setting role to ARTIST
    /// allows the domain to be set in the same request.
    pub async fn update_profile(
        &self,
        user_id: &str,
        input: UpdateProfileInput,
    ) -> AppResult<user::Model> {
        input.validate()?;

        let user = self.user_repo.get_by_id(user_id).await?;
        let mut active: user::ActiveModel = user.into();

        if let Some(alias) = input.alias {
            active.alias = Set(Some(alias));
        }
        if let Some(role) = input.role {
            active.role = Set(Some(role));
            match role {
                Role::Artist => {
                    if let Some(domain) = input.domain {
                        active.domain = Set(Some(domain));
                    }
                }
                Role::Buyer => {
                    active.domain = Set(None);
                }
            }
        }
        if let Some(country) = input.country {
            active.country = Set(Some(country));
        }
        if let Some(languages) = input.languages {
            active.languages = Set(Some(languages));
        }
        if let Some(email) = input.email {
            active.email = Set(Some(email));
        }
        if let Some(name) = input.name {
            active.name = Set(Some(name));
        }
        if let Some(avatar_url) = input.avatar_url {
            active.avatar_url = Set(Some(avatar_url));
        }
        active.updated_at = Set(Some(Utc::now().into()));

        self.user_repo.update(active).await
    }

    /// Public directory of all users, newest first.
    pub async fn directory(&self) -> AppResult<Vec<user::Model>> {
        self.user_repo.find_all().await
    }

    /// Public profile by alias (exact match), with posts and creations.
    pub async fn public_profile(&self, alias: &str) -> AppResult<PublicProfile> {
        let user = self
            .user_repo
            .find_by_alias(alias)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("No profile with alias: {alias}")))?;

        let posts = self.post_repo.find_by_author(&user.id).await?;
        let creations = self.creation_repo.find_by_owner(&user.id).await?;

        Ok(PublicProfile {
            user,
            posts,
            creations,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use sea_orm::{DatabaseBackend, MockDatabase};
    use std::sync::Arc;

    fn create_test_user(id: &str, external_id: &str) -> user::Model {
        user::Model {
            id: id.to_string(),
            external_id: external_id.to_string(),
            email: Some("artist@example.com".to_string()),
            name: Some("Test Artist".to_string()),
            alias: None,
            role: None,
            country: None,
            domain: None,
            languages: None,
            avatar_url: None,
            wallet_address: "ab".repeat(32),
            created_at: chrono::Utc::now().into(),
            updated_at: None,
        }
    }

    fn service_with(user_db: sea_orm::DatabaseConnection) -> UserService {
        let user_repo = UserRepository::new(Arc::new(user_db));
        let post_repo = PostRepository::new(Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres).into_connection(),
        ));
        let creation_repo = CreationRepository::new(Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres).into_connection(),
        ));
        UserService::new(user_repo, post_repo, creation_repo)
    }

    #[tokio::test]
    async fn test_resolve_external_existing_user() {
        let user = create_test_user("u1", "idp|123");
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[user.clone()]])
            .into_connection();

        let service = service_with(db);
        let claims = Claims {
            sub: "idp|123".to_string(),
            email: None,
            name: None,
            nickname: None,
        };

        let resolved = service.resolve_external(&claims).await.unwrap();
        assert_eq!(resolved.id, "u1");
    }

    #[tokio::test]
    async fn test_resolve_external_creates_user() {
        let created = create_test_user("u2", "idp|456");
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            // First lookup finds nothing, then the insert returns the row
            .append_query_results([Vec::<user::Model>::new()])
            .append_query_results([[created.clone()]])
            .into_connection();

        let service = service_with(db);
        let claims = Claims {
            sub: "idp|456".to_string(),
            email: Some("new@example.com".to_string()),
            name: None,
            nickname: Some("newbie".to_string()),
        };

        let resolved = service.resolve_external(&claims).await.unwrap();
        assert_eq!(resolved.id, "u2");
    }

    #[tokio::test]
    async fn test_public_profile_unknown_alias() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<user::Model>::new()])
            .into_connection();

        let service = service_with(db);
        let result = service.public_profile("ghost").await;

        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[test]
    fn test_display_name_fallback_chain() {
        let mut user = create_test_user("u1", "idp|123");
        user.alias = Some("inkwell".to_string());
        assert_eq!(display_name(&user), "inkwell");

        user.alias = None;
        assert_eq!(display_name(&user), "Test Artist");

        user.name = None;
        assert_eq!(display_name(&user), "artist@example.com");

        user.email = None;
        assert_eq!(display_name(&user), "Unknown");
    }
}
