//! API endpoints.

mod assistant;
mod chats;
mod creations;
mod health;
mod posts;
mod profile;
mod project_requests;
mod users;

use axum::Router;

use crate::middleware::AppState;

/// Create the API router.
pub fn router() -> Router<AppState> {
    Router::new()
        .merge(health::router())
        .merge(assistant::router())
        .merge(profile::router())
        .merge(posts::router())
        .merge(users::router())
        .merge(chats::router())
        .merge(project_requests::router())
        .merge(creations::router())
}
