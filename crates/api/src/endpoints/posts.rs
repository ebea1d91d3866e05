//! Feed and engagement endpoints.

use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use chrono::{DateTime, Utc};
use atelier_common::AppResult;
use atelier_core::{CommentView, CreatePostInput, FeedItem, PostSummary};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{extractors::AuthUser, middleware::AppState};

/// Create posts router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/posts", post(create_post))
        .route("/my-posts", get(my_posts))
        .route("/feed", get(feed))
        .route("/posts/{id}/comments", post(add_comment))
        .route("/posts/{id}/like", post(toggle_like))
}

/// Bare post response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostResponse {
    pub id: String,
    pub author_id: String,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl From<atelier_db::entities::post::Model> for PostResponse {
    fn from(post: atelier_db::entities::post::Model) -> Self {
        Self {
            id: post.id,
            author_id: post.author_id,
            title: post.title,
            content: post.content,
            created_at: post.created_at.into(),
        }
    }
}

/// Create a post.
async fn create_post(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreatePostInput>,
) -> AppResult<Json<PostResponse>> {
    info!(user = %user.id, "Creating post");

    let post = state.post_service.create_post(&user.id, input).await?;

    Ok(Json(PostResponse::from(post)))
}

/// Own post with derived counts.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MyPostResponse {
    pub id: String,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub like_count: u64,
    pub comment_count: u64,
}

impl From<PostSummary> for MyPostResponse {
    fn from(summary: PostSummary) -> Self {
        Self {
            id: summary.post.id,
            title: summary.post.title,
            content: summary.post.content,
            created_at: summary.post.created_at.into(),
            like_count: summary.like_count,
            comment_count: summary.comment_count,
        }
    }
}

/// List the caller's posts, newest first.
async fn my_posts(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<MyPostResponse>>> {
    let posts = state.post_service.my_posts(&user.id).await?;

    Ok(Json(posts.into_iter().map(MyPostResponse::from).collect()))
}

/// Comment response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentResponse {
    pub id: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub author_name: String,
}

impl From<CommentView> for CommentResponse {
    fn from(view: CommentView) -> Self {
        Self {
            id: view.comment.id,
            content: view.comment.content,
            created_at: view.comment.created_at.into(),
            author_name: view.author_name,
        }
    }
}

/// Feed entry annotated for the caller.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedPostResponse {
    pub id: String,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub like_count: u64,
    pub liked_by_me: bool,
    pub author_id: String,
    pub author_is_me: bool,
    pub author_name: String,
    pub is_following: bool,
    pub comments: Vec<CommentResponse>,
}

impl From<FeedItem> for FeedPostResponse {
    fn from(item: FeedItem) -> Self {
        Self {
            id: item.post.id,
            title: item.post.title,
            content: item.post.content,
            created_at: item.post.created_at.into(),
            like_count: item.like_count,
            liked_by_me: item.liked_by_me,
            author_id: item.post.author_id,
            author_is_me: item.author_is_me,
            author_name: item.author_name,
            is_following: item.is_following,
            comments: item.comments.into_iter().map(CommentResponse::from).collect(),
        }
    }
}

/// The global feed, newest first.
async fn feed(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<FeedPostResponse>>> {
    let items = state.post_service.feed(&user).await?;

    Ok(Json(items.into_iter().map(FeedPostResponse::from).collect()))
}

/// Add comment request.
#[derive(Debug, Deserialize)]
pub struct AddCommentRequest {
    pub content: Option<String>,
}

/// Comment on a post.
async fn add_comment(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Path(post_id): Path<String>,
    Json(req): Json<AddCommentRequest>,
) -> AppResult<Json<CommentResponse>> {
    info!(user = %user.id, post = %post_id, "Adding comment");

    let view = state
        .post_service
        .add_comment(&user, &post_id, req.content.as_deref().unwrap_or(""))
        .await?;

    Ok(Json(CommentResponse::from(view)))
}

/// Like toggle response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LikeResponse {
    pub liked: bool,
    pub like_count: u64,
}

/// Toggle the caller's like on a post.
async fn toggle_like(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Path(post_id): Path<String>,
) -> AppResult<Json<LikeResponse>> {
    info!(user = %user.id, post = %post_id, "Toggling like");

    let toggle = state.post_service.toggle_like(&user.id, &post_id).await?;

    Ok(Json(LikeResponse {
        liked: toggle.liked,
        like_count: toggle.like_count,
    }))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_feed_response_serialization() {
        let response = FeedPostResponse {
            id: "p1".to_string(),
            title: "Open for commissions".to_string(),
            content: String::new(),
            created_at: Utc::now(),
            like_count: 2,
            liked_by_me: true,
            author_id: "u1".to_string(),
            author_is_me: false,
            author_name: "inkwell".to_string(),
            is_following: true,
            comments: vec![],
        };

        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("\"likedByMe\":true"));
        assert!(json.contains("\"isFollowing\":true"));
        assert!(json.contains("\"authorIsMe\":false"));
    }

    #[test]
    fn test_like_response_serialization() {
        let response = LikeResponse {
            liked: false,
            like_count: 0,
        };

        let json = serde_json::to_string(&response).unwrap();
        assert_eq!(json, "{\"liked\":false,\"likeCount\":0}");
    }
}
