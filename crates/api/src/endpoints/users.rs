//! Public directory, social graph and public profile endpoints.

use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use chrono::{DateTime, Utc};
use atelier_common::AppResult;
use atelier_core::display_name;
use atelier_db::entities::user::Role;
use serde::Serialize;
use tracing::info;

use crate::{extractors::AuthUser, middleware::AppState};

use super::creations::CreationResponse;
use super::posts::PostResponse;

/// Create users router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/artists", get(directory))
        .route("/following", get(following))
        .route("/users/{id}/follow", post(toggle_follow))
        .route("/public-profile/{alias}", get(public_profile))
}

/// Directory entry (public; no email or wallet exposure).
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DirectoryUserResponse {
    pub id: String,
    pub alias: Option<String>,
    pub name: Option<String>,
    pub role: Option<Role>,
    pub country: Option<String>,
    pub domain: Option<String>,
    pub languages: Option<String>,
    pub avatar_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<atelier_db::entities::user::Model> for DirectoryUserResponse {
    fn from(user: atelier_db::entities::user::Model) -> Self {
        Self {
            id: user.id,
            alias: user.alias,
            name: user.name,
            role: user.role,
            country: user.country,
            domain: user.domain,
            languages: user.languages,
            avatar_url: user.avatar_url,
            created_at: user.created_at.into(),
        }
    }
}

/// Public listing of all users (filtered client-side on the search page).
async fn directory(State(state): State<AppState>) -> AppResult<Json<Vec<DirectoryUserResponse>>> {
    let users = state.user_service.directory().await?;

    Ok(Json(
        users.into_iter().map(DirectoryUserResponse::from).collect(),
    ))
}

/// A followed user.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FollowedUserResponse {
    pub id: String,
    pub name: String,
    pub role: Option<Role>,
    pub country: Option<String>,
    pub domain: Option<String>,
}

/// List the users the caller follows.
async fn following(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<FollowedUserResponse>>> {
    let users = state.follow_service.following(&user.id).await?;

    Ok(Json(
        users
            .into_iter()
            .map(|u| FollowedUserResponse {
                name: display_name(&u),
                id: u.id,
                role: u.role,
                country: u.country,
                domain: u.domain,
            })
            .collect(),
    ))
}

/// Follow toggle response.
#[derive(Debug, Serialize)]
pub struct FollowResponse {
    pub following: bool,
}

/// Toggle the caller's follow edge toward a user.
async fn toggle_follow(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Path(target_id): Path<String>,
) -> AppResult<Json<FollowResponse>> {
    info!(user = %user.id, target = %target_id, "Toggling follow");

    let following = state.follow_service.toggle(&user.id, &target_id).await?;

    Ok(Json(FollowResponse { following }))
}

/// Public profile with posts and creations.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicProfileResponse {
    pub id: String,
    pub alias: Option<String>,
    pub name: Option<String>,
    pub role: Option<Role>,
    pub country: Option<String>,
    pub domain: Option<String>,
    pub languages: Option<String>,
    pub avatar_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub posts: Vec<PostResponse>,
    pub creations: Vec<CreationResponse>,
}

/// Public read of a profile by alias (unauthenticated).
async fn public_profile(
    State(state): State<AppState>,
    Path(alias): Path<String>,
) -> AppResult<Json<PublicProfileResponse>> {
    let profile = state.user_service.public_profile(&alias).await?;

    Ok(Json(PublicProfileResponse {
        id: profile.user.id,
        alias: profile.user.alias,
        name: profile.user.name,
        role: profile.user.role,
        country: profile.user.country,
        domain: profile.user.domain,
        languages: profile.user.languages,
        avatar_url: profile.user.avatar_url,
        created_at: profile.user.created_at.into(),
        posts: profile.posts.into_iter().map(PostResponse::from).collect(),
        creations: profile
            .creations
            .into_iter()
            .map(CreationResponse::from)
            .collect(),
    }))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_directory_response_hides_private_fields() {
        let response = DirectoryUserResponse {
            id: "u1".to_string(),
            alias: Some("inkwell".to_string()),
            name: None,
            role: Some(Role::Artist),
            country: Some("PT".to_string()),
            domain: None,
            languages: None,
            avatar_url: None,
            created_at: Utc::now(),
        };

        let json = serde_json::to_string(&response).unwrap();
        assert!(!json.contains("email"));
        assert!(!json.contains("wallet"));
        assert!(json.contains("\"role\":\"ARTIST\""));
    }

    #[test]
    fn test_follow_response_serialization() {
        let json = serde_json::to_string(&FollowResponse { following: true }).unwrap();
        assert_eq!(json, "{\"following\":true}");
    }
}
