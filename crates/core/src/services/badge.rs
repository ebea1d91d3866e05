//! Badge service: simulated mints recorded as badge rows.

use atelier_common::{simulate_badge_mint, AppError, AppResult, IdGenerator};
use atelier_db::{
    entities::{user, user_badge},
    repositories::UserBadgeRepository,
};
use chrono::Utc;
use sea_orm::Set;

/// A freshly awarded badge with its simulated mint address.
pub struct AwardedBadge {
    pub badge: user_badge::Model,
    pub mint_address: String,
}

/// Badge service for business logic.
#[derive(Clone)]
pub struct BadgeService {
    badge_repo: UserBadgeRepository,
    id_gen: IdGenerator,
}

impl BadgeService {
    /// Create a new badge service.
    #[must_use]
    pub const fn new(badge_repo: UserBadgeRepository) -> Self {
        Self {
            badge_repo,
            id_gen: IdGenerator::new(),
        }
    }

    /// Award a badge to a user.
    ///
    /// Synthesizes mint/transaction identifiers and records the badge row.
    /// No ledger is contacted.
    pub async fn award(&self, user: &user::Model, badge_type: &str) -> AppResult<AwardedBadge> {
        let badge_type = badge_type.trim();
        if badge_type.is_empty() {
            return Err(AppError::BadRequest("badgeType is required".to_string()));
        }

        if user.wallet_address.is_empty() {
            return Err(AppError::BadRequest(
                "User has no wallet address configured".to_string(),
            ));
        }

        let mint = simulate_badge_mint(&user.wallet_address, badge_type);

        let model = user_badge::ActiveModel {
            id: Set(self.id_gen.generate()),
            user_id: Set(user.id.clone()),
            badge_type: Set(badge_type.to_string()),
            tx_signature: Set(mint.tx_signature),
            created_at: Set(Utc::now().into()),
        };

        let badge = self.badge_repo.create(model).await?;

        tracing::info!(
            user = %user.id,
            badge = %badge.badge_type,
            mint = %mint.mint_address,
            "Awarded badge (simulated mint)"
        );

        Ok(AwardedBadge {
            badge,
            mint_address: mint.mint_address,
        })
    }

    /// The user's badges, newest first.
    pub async fn list(&self, user_id: &str) -> AppResult<Vec<user_badge::Model>> {
        self.badge_repo.find_by_user(user_id).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use sea_orm::{DatabaseBackend, MockDatabase};
    use std::sync::Arc;

    fn test_user() -> user::Model {
        user::Model {
            id: "u1".to_string(),
            external_id: "idp|u1".to_string(),
            email: None,
            name: None,
            alias: None,
            role: None,
            country: None,
            domain: None,
            languages: None,
            avatar_url: None,
            wallet_address: "0011".repeat(16),
            created_at: Utc::now().into(),
            updated_at: None,
        }
    }

    #[tokio::test]
    async fn test_award_requires_badge_type() {
        let service = BadgeService::new(UserBadgeRepository::new(Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres).into_connection(),
        )));

        let result = service.award(&test_user(), "  ").await;

        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }

    #[tokio::test]
    async fn test_award_records_badge() {
        let badge = user_badge::Model {
            id: "b1".to_string(),
            user_id: "u1".to_string(),
            badge_type: "artist_verified".to_string(),
            tx_signature: "SIMULATED_TX_1".to_string(),
            created_at: Utc::now().into(),
        };

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[badge]])
            .into_connection();

        let service = BadgeService::new(UserBadgeRepository::new(Arc::new(db)));
        let awarded = service.award(&test_user(), "artist_verified").await.unwrap();

        assert_eq!(awarded.badge.badge_type, "artist_verified");
        assert!(awarded.mint_address.starts_with("SIMULATED_MINT_artist_verified_"));
    }
}
