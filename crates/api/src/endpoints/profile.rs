//! Profile and badge endpoints for the authenticated user.

use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use chrono::{DateTime, Utc};
use atelier_common::AppResult;
use atelier_core::UpdateProfileInput;
use atelier_db::entities::user::Role;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{extractors::AuthUser, middleware::AppState};

/// Create profile router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/me", get(me).put(update_me))
        .route("/me/badges", get(my_badges))
        .route("/badges/award", post(award_badge))
}

/// Full profile of the authenticated user.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: String,
    pub email: Option<String>,
    pub name: Option<String>,
    pub alias: Option<String>,
    pub role: Option<Role>,
    pub country: Option<String>,
    pub domain: Option<String>,
    pub languages: Option<String>,
    pub avatar_url: Option<String>,
    pub wallet_address: String,
    pub created_at: DateTime<Utc>,
}

impl From<atelier_db::entities::user::Model> for UserResponse {
    fn from(user: atelier_db::entities::user::Model) -> Self {
        Self {
            id: user.id,
            email: user.email,
            name: user.name,
            alias: user.alias,
            role: user.role,
            country: user.country,
            domain: user.domain,
            languages: user.languages,
            avatar_url: user.avatar_url,
            wallet_address: user.wallet_address,
            created_at: user.created_at.into(),
        }
    }
}

/// Read the caller's profile.
async fn me(AuthUser(user): AuthUser) -> AppResult<Json<UserResponse>> {
    Ok(Json(UserResponse::from(user)))
}

/// Partially update the caller's profile.
async fn update_me(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(input): Json<UpdateProfileInput>,
) -> AppResult<Json<UserResponse>> {
    info!(user = %user.id, "Updating profile");

    let updated = state.user_service.update_profile(&user.id, input).await?;

    Ok(Json(UserResponse::from(updated)))
}

/// Badge response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BadgeResponse {
    pub id: String,
    pub badge_type: String,
    pub tx_signature: String,
    pub created_at: DateTime<Utc>,
}

impl From<atelier_db::entities::user_badge::Model> for BadgeResponse {
    fn from(badge: atelier_db::entities::user_badge::Model) -> Self {
        Self {
            id: badge.id,
            badge_type: badge.badge_type,
            tx_signature: badge.tx_signature,
            created_at: badge.created_at.into(),
        }
    }
}

/// Award badge request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AwardBadgeRequest {
    pub badge_type: Option<String>,
}

/// Award badge response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AwardBadgeResponse {
    pub ok: bool,
    pub badge: BadgeResponse,
    pub mint_address: String,
}

/// Award a badge to the caller (simulated mint).
async fn award_badge(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(req): Json<AwardBadgeRequest>,
) -> AppResult<Json<AwardBadgeResponse>> {
    info!(user = %user.id, "Awarding badge");

    let awarded = state
        .badge_service
        .award(&user, req.badge_type.as_deref().unwrap_or(""))
        .await?;

    Ok(Json(AwardBadgeResponse {
        ok: true,
        badge: BadgeResponse::from(awarded.badge),
        mint_address: awarded.mint_address,
    }))
}

/// List the caller's badges, newest first.
async fn my_badges(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<BadgeResponse>>> {
    let badges = state.badge_service.list(&user.id).await?;

    Ok(Json(badges.into_iter().map(BadgeResponse::from).collect()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_user_response_serialization() {
        let response = UserResponse {
            id: "u1".to_string(),
            email: Some("artist@example.com".to_string()),
            name: None,
            alias: Some("inkwell".to_string()),
            role: Some(Role::Artist),
            country: None,
            domain: Some("illustration".to_string()),
            languages: None,
            avatar_url: None,
            wallet_address: "ab".repeat(32),
            created_at: Utc::now(),
        };

        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("\"role\":\"ARTIST\""));
        assert!(json.contains("\"avatarUrl\":null"));
        assert!(json.contains("\"walletAddress\""));
    }

    #[test]
    fn test_badge_response_serialization() {
        let response = BadgeResponse {
            id: "b1".to_string(),
            badge_type: "artist_verified".to_string(),
            tx_signature: "SIMULATED_TX_1".to_string(),
            created_at: Utc::now(),
        };

        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("\"badgeType\":\"artist_verified\""));
        assert!(json.contains("\"txSignature\":\"SIMULATED_TX_1\""));
    }
}
