//! Follow service: toggle edges, list the social graph.

use std::collections::HashMap;

use atelier_common::{AppError, AppResult, IdGenerator};
use atelier_db::{
    entities::{follow, user},
    repositories::{FollowRepository, UserRepository},
};
use chrono::Utc;
use sea_orm::Set;

/// Follow service for business logic.
#[derive(Clone)]
pub struct FollowService {
    follow_repo: FollowRepository,
    user_repo: UserRepository,
    id_gen: IdGenerator,
}

impl FollowService {
    /// Create a new follow service.
    #[must_use]
    pub const fn new(follow_repo: FollowRepository, user_repo: UserRepository) -> Self {
        Self {
            follow_repo,
            user_repo,
            id_gen: IdGenerator::new(),
        }
    }

    /// Toggle the caller's follow edge toward a target user.
    ///
    /// Guarded-insert toggle: the unique (follower, followee) constraint
    /// turns an existing edge into a conflict, which flips to a delete.
    /// Self-follow is rejected; a missing target surfaces through the
    /// foreign key as not-found.
    pub async fn toggle(&self, follower_id: &str, followee_id: &str) -> AppResult<bool> {
        if follower_id == followee_id {
            return Err(AppError::BadRequest("Invalid target user id".to_string()));
        }

        let model = follow::ActiveModel {
            id: Set(self.id_gen.generate()),
            follower_id: Set(follower_id.to_string()),
            followee_id: Set(followee_id.to_string()),
            created_at: Set(Utc::now().into()),
        };

        match self.follow_repo.create(model).await {
            Ok(_) => Ok(true),
            Err(AppError::Conflict(_)) => {
                self.follow_repo
                    .delete_by_pair(follower_id, followee_id)
                    .await?;
                Ok(false)
            }
            Err(e) => Err(e),
        }
    }

    /// The users the caller follows, newest edge first.
    pub async fn following(&self, follower_id: &str) -> AppResult<Vec<user::Model>> {
        let edges = self.follow_repo.find_following(follower_id).await?;
        let followee_ids: Vec<String> = edges.iter().map(|e| e.followee_id.clone()).collect();

        let mut users: HashMap<String, user::Model> = self
            .user_repo
            .find_by_ids(&followee_ids)
            .await?
            .into_iter()
            .map(|u| (u.id.clone(), u))
            .collect();

        // Preserve edge ordering
        Ok(followee_ids
            .iter()
            .filter_map(|id| users.remove(id))
            .collect())
    }
}
