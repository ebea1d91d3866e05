//! Post service: feed, own posts, comments, like toggle.

use std::collections::{HashMap, HashSet};

use atelier_common::{AppError, AppResult, IdGenerator};
use atelier_db::{
    entities::user,
    entities::{comment, post, post_like},
    repositories::{
        CommentRepository, FollowRepository, PostLikeRepository, PostRepository, UserRepository,
    },
};
use chrono::Utc;
use sea_orm::Set;
use serde::Deserialize;

use crate::services::user::display_name;

/// Input for creating a post.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePostInput {
    pub title: Option<String>,
    pub content: Option<String>,
}

/// A post with its derived counts (own-posts listing).
pub struct PostSummary {
    pub post: post::Model,
    pub like_count: u64,
    pub comment_count: u64,
}

/// A comment with its author's display name.
pub struct CommentView {
    pub comment: comment::Model,
    pub author_name: String,
}

/// A feed entry annotated for the viewing user.
pub struct FeedItem {
    pub post: post::Model,
    pub author_name: String,
    pub author_is_me: bool,
    pub like_count: u64,
    pub liked_by_me: bool,
    pub is_following: bool,
    pub comments: Vec<CommentView>,
}

/// Result of a like toggle.
pub struct LikeToggle {
    pub liked: bool,
    pub like_count: u64,
}

/// Post service for business logic.
#[derive(Clone)]
pub struct PostService {
    post_repo: PostRepository,
    comment_repo: CommentRepository,
    like_repo: PostLikeRepository,
    follow_repo: FollowRepository,
    user_repo: UserRepository,
    id_gen: IdGenerator,
}

impl PostService {
    /// Create a new post service.
    #[must_use]
    pub const fn new(
        post_repo: PostRepository,
        comment_repo: CommentRepository,
        like_repo: PostLikeRepository,
        follow_repo: FollowRepository,
        user_repo: UserRepository,
    ) -> Self {
        Self {
            post_repo,
            comment_repo,
            like_repo,
            follow_repo,
            user_repo,
            id_gen: IdGenerator::new(),
        }
    }

    /// Create a post. At least one of title/content must be non-empty.
    pub async fn create_post(
        &self,
        author_id: &str,
        input: CreatePostInput,
    ) -> AppResult<post::Model> {
        let title = input.title.as_deref().unwrap_or("").trim().to_string();
        let content = input.content.as_deref().unwrap_or("").trim().to_string();

        if title.is_empty() && content.is_empty() {
            return Err(AppError::BadRequest("Title or content required".to_string()));
        }

        let model = post::ActiveModel {
            id: Set(self.id_gen.generate()),
            author_id: Set(author_id.to_string()),
            title: Set(title),
            content: Set(content),
            created_at: Set(Utc::now().into()),
        };

        self.post_repo.create(model).await
    }

    /// The caller's own posts with like/comment counts, newest first.
    pub async fn my_posts(&self, author_id: &str) -> AppResult<Vec<PostSummary>> {
        let posts = self.post_repo.find_by_author(author_id).await?;

        let mut summaries = Vec::with_capacity(posts.len());
        for post in posts {
            let like_count = self.like_repo.count_by_post(&post.id).await?;
            let comment_count = self.comment_repo.count_by_post(&post.id).await?;
            summaries.push(PostSummary {
                post,
                like_count,
                comment_count,
            });
        }

        Ok(summaries)
    }

    /// The global feed, newest first, annotated for the viewing user.
    pub async fn feed(&self, viewer: &user::Model) -> AppResult<Vec<FeedItem>> {
        let posts = self.post_repo.find_all().await?;
        let post_ids: Vec<String> = posts.iter().map(|p| p.id.clone()).collect();

        let liked: HashSet<String> = self
            .like_repo
            .find_by_user_for_posts(&viewer.id, &post_ids)
            .await?
            .into_iter()
            .map(|l| l.post_id)
            .collect();

        // One comment list per post, oldest first
        let mut comment_lists: Vec<Vec<comment::Model>> = Vec::with_capacity(posts.len());
        for post in &posts {
            comment_lists.push(self.comment_repo.find_by_post(&post.id).await?);
        }

        // Users referenced anywhere: post authors plus comment authors
        let mut user_ids: HashSet<String> = posts.iter().map(|p| p.author_id.clone()).collect();
        for comments in &comment_lists {
            user_ids.extend(comments.iter().map(|c| c.author_id.clone()));
        }
        let user_ids: Vec<String> = user_ids.into_iter().collect();
        let users: HashMap<String, user::Model> = self
            .user_repo
            .find_by_ids(&user_ids)
            .await?
            .into_iter()
            .map(|u| (u.id.clone(), u))
            .collect();

        // Follow state toward every author that is not the viewer
        let author_ids: Vec<String> = posts
            .iter()
            .map(|p| p.author_id.clone())
            .filter(|id| *id != viewer.id)
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();
        let following: HashSet<String> = self
            .follow_repo
            .find_followees_in(&viewer.id, &author_ids)
            .await?
            .into_iter()
            .map(|f| f.followee_id)
            .collect();

        let mut items = Vec::with_capacity(posts.len());
        for (post, comments) in posts.into_iter().zip(comment_lists) {
            let like_count = self.like_repo.count_by_post(&post.id).await?;

            let author_name = users
                .get(&post.author_id)
                .map_or_else(|| "Unknown artist".to_string(), display_name);

            let comments = comments
                .into_iter()
                .map(|comment| {
                    let author_name = users
                        .get(&comment.author_id)
                        .map_or_else(|| "Unknown".to_string(), display_name);
                    CommentView {
                        comment,
                        author_name,
                    }
                })
                .collect();

            items.push(FeedItem {
                author_is_me: post.author_id == viewer.id,
                is_following: following.contains(&post.author_id),
                liked_by_me: liked.contains(&post.id),
                like_count,
                author_name,
                post,
                comments,
            });
        }

        Ok(items)
    }

    /// Add a comment to a post.
    ///
    /// The post's existence is enforced by the foreign key, not a lookup.
    pub async fn add_comment(
        &self,
        author: &user::Model,
        post_id: &str,
        content: &str,
    ) -> AppResult<CommentView> {
        let content = content.trim();
        if content.is_empty() {
            return Err(AppError::BadRequest("Content is required".to_string()));
        }

        let model = comment::ActiveModel {
            id: Set(self.id_gen.generate()),
            post_id: Set(post_id.to_string()),
            author_id: Set(author.id.clone()),
            content: Set(content.to_string()),
            created_at: Set(Utc::now().into()),
        };

        let comment = self.comment_repo.create(model).await?;

        Ok(CommentView {
            comment,
            author_name: display_name(author),
        })
    }

    /// Toggle the caller's like on a post.
    ///
    /// Insert first; the unique (post, user) constraint turns a concurrent
    /// or repeated like into a conflict, which flips the toggle to a delete.
    /// There is no existence pre-check to race against.
    pub async fn toggle_like(&self, user_id: &str, post_id: &str) -> AppResult<LikeToggle> {
        let model = post_like::ActiveModel {
            id: Set(self.id_gen.generate()),
            post_id: Set(post_id.to_string()),
            user_id: Set(user_id.to_string()),
            created_at: Set(Utc::now().into()),
        };

        let liked = match self.like_repo.create(model).await {
            Ok(_) => true,
            Err(AppError::Conflict(_)) => {
                self.like_repo.delete_by_pair(post_id, user_id).await?;
                false
            }
            Err(e) => return Err(e),
        };

        let like_count = self.like_repo.count_by_post(post_id).await?;

        Ok(LikeToggle { liked, like_count })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use maplit::btreemap;
    use sea_orm::{DatabaseBackend, DatabaseConnection, MockDatabase, Value};
    use std::sync::Arc;

    fn mock_db() -> DatabaseConnection {
        MockDatabase::new(DatabaseBackend::Postgres).into_connection()
    }

    fn test_user(id: &str) -> user::Model {
        user::Model {
            id: id.to_string(),
            external_id: format!("idp|{id}"),
            email: None,
            name: Some("Someone".to_string()),
            alias: None,
            role: None,
            country: None,
            domain: None,
            languages: None,
            avatar_url: None,
            wallet_address: "cd".repeat(32),
            created_at: Utc::now().into(),
            updated_at: None,
        }
    }

    fn service(
        post_db: DatabaseConnection,
        like_db: DatabaseConnection,
        comment_db: DatabaseConnection,
    ) -> PostService {
        PostService::new(
            PostRepository::new(Arc::new(post_db)),
            CommentRepository::new(Arc::new(comment_db)),
            PostLikeRepository::new(Arc::new(like_db)),
            FollowRepository::new(Arc::new(mock_db())),
            UserRepository::new(Arc::new(mock_db())),
        )
    }

    #[tokio::test]
    async fn test_create_post_requires_title_or_content() {
        let service = service(mock_db(), mock_db(), mock_db());

        let result = service
            .create_post(
                "u1",
                CreatePostInput {
                    title: Some("   ".to_string()),
                    content: None,
                },
            )
            .await;

        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }

    #[tokio::test]
    async fn test_add_comment_requires_content() {
        let service = service(mock_db(), mock_db(), mock_db());
        let author = test_user("u1");

        let result = service.add_comment(&author, "p1", "  ").await;

        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }

    #[tokio::test]
    async fn test_toggle_like_inserts_then_counts() {
        let like = post_like::Model {
            id: "l1".to_string(),
            post_id: "p1".to_string(),
            user_id: "u1".to_string(),
            created_at: Utc::now().into(),
        };

        let like_db = MockDatabase::new(DatabaseBackend::Postgres)
            // Insert returns the new row, then the count query runs
            .append_query_results([[like]])
            .append_query_results([[btreemap! {
                "num_items" => Value::BigInt(Some(3)),
            }]])
            .into_connection();

        let service = service(mock_db(), like_db, mock_db());
        let result = service.toggle_like("u1", "p1").await.unwrap();

        assert!(result.liked);
        assert_eq!(result.like_count, 3);
    }
}
