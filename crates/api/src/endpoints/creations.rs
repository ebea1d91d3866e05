//! Portfolio (creations) endpoints.

use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use chrono::{DateTime, Utc};
use atelier_common::AppResult;
use atelier_core::CreationInput;
use serde::Serialize;
use tracing::info;

use crate::{extractors::AuthUser, middleware::AppState};

/// Create creations router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/my-creations", get(list).post(create))
        .route("/my-creations/{id}", axum::routing::put(update).delete(delete))
}

/// Creation response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreationResponse {
    pub id: String,
    pub title: String,
    pub link: Option<String>,
    pub image_url: Option<String>,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<atelier_db::entities::creation::Model> for CreationResponse {
    fn from(creation: atelier_db::entities::creation::Model) -> Self {
        Self {
            id: creation.id,
            title: creation.title,
            link: creation.link,
            image_url: creation.image_url,
            description: creation.description,
            created_at: creation.created_at.into(),
        }
    }
}

/// List the caller's creations, newest first.
async fn list(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<CreationResponse>>> {
    let creations = state.creation_service.list(&user.id).await?;

    Ok(Json(
        creations.into_iter().map(CreationResponse::from).collect(),
    ))
}

/// Create a portfolio item.
async fn create(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreationInput>,
) -> AppResult<Json<CreationResponse>> {
    info!(user = %user.id, "Creating portfolio item");

    let creation = state.creation_service.create(&user.id, input).await?;

    Ok(Json(CreationResponse::from(creation)))
}

/// Update an owned creation.
async fn update(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(input): Json<CreationInput>,
) -> AppResult<Json<CreationResponse>> {
    info!(user = %user.id, creation = %id, "Updating portfolio item");

    let creation = state.creation_service.update(&user.id, &id, input).await?;

    Ok(Json(CreationResponse::from(creation)))
}

/// Deletion acknowledgement.
#[derive(Debug, Serialize)]
pub struct OkResponse {
    pub ok: bool,
}

/// Delete an owned creation.
async fn delete(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<OkResponse>> {
    info!(user = %user.id, creation = %id, "Deleting portfolio item");

    state.creation_service.delete(&user.id, &id).await?;

    Ok(Json(OkResponse { ok: true }))
}
