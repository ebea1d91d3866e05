//! Database repositories.

mod chat;
mod comment;
mod creation;
mod follow;
mod message;
mod post;
mod post_like;
mod project_request;
mod user;
mod user_badge;

pub use chat::ChatRepository;
pub use comment::CommentRepository;
pub use creation::CreationRepository;
pub use follow::FollowRepository;
pub use message::MessageRepository;
pub use post::PostRepository;
pub use post_like::PostLikeRepository;
pub use project_request::ProjectRequestRepository;
pub use user::UserRepository;
pub use user_badge::UserBadgeRepository;

use atelier_common::AppError;
use sea_orm::{DbErr, SqlErr};

/// Map an insert error, surfacing constraint violations as typed errors.
///
/// Unique violations become [`AppError::Conflict`] so callers can implement
/// insert-then-recover and guarded toggles; foreign-key violations become
/// [`AppError::NotFound`] (the referenced row is gone or never existed).
pub(crate) fn map_insert_err(e: &DbErr) -> AppError {
    match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(msg)) => AppError::Conflict(msg),
        Some(SqlErr::ForeignKeyConstraintViolation(_)) => {
            AppError::NotFound("Referenced row does not exist".to_string())
        }
        _ => AppError::Database(e.to_string()),
    }
}
