//! API middleware.

#![allow(missing_docs)]

use axum::{body::Body, extract::State, http::Request, middleware::Next, response::Response};
use atelier_core::{
    AssistantService, AuthService, BadgeService, ChatService, CreationService, FollowService,
    PostService, ProjectRequestService, UserService,
};

/// Application state.
#[derive(Clone)]
pub struct AppState {
    pub auth_service: AuthService,
    pub user_service: UserService,
    pub post_service: PostService,
    pub follow_service: FollowService,
    pub chat_service: ChatService,
    pub project_request_service: ProjectRequestService,
    pub creation_service: CreationService,
    pub badge_service: BadgeService,
    pub assistant_service: AssistantService,
}

/// Authentication middleware.
///
/// Verifies the bearer token against the identity provider and resolves the
/// local user (creating it on first sight), then stores it in request
/// extensions. Handlers that require auth reject via the `AuthUser`
/// extractor when nothing was stored.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    if let Some(token) = bearer_token(&req) {
        match state.auth_service.verify(&token).await {
            Ok(claims) => match state.user_service.resolve_external(&claims).await {
                Ok(user) => {
                    req.extensions_mut().insert(user);
                }
                Err(e) => {
                    tracing::warn!(error = %e, "Failed to resolve authenticated user");
                }
            },
            Err(e) => {
                tracing::debug!(error = %e, "Rejected bearer token");
            }
        }
    }

    next.run(req).await
}

fn bearer_token(req: &Request<Body>) -> Option<String> {
    let auth_header = req.headers().get("Authorization")?;
    let auth_str = auth_header.to_str().ok()?;
    auth_str
        .strip_prefix("Bearer ")
        .map(ToString::to_string)
}
