//! Database entities.

pub mod chat;
pub mod comment;
pub mod creation;
pub mod follow;
pub mod message;
pub mod post;
pub mod post_like;
pub mod project_request;
pub mod user;
pub mod user_badge;

pub use chat::Entity as Chat;
pub use comment::Entity as Comment;
pub use creation::Entity as Creation;
pub use follow::Entity as Follow;
pub use message::Entity as Message;
pub use post::Entity as Post;
pub use post_like::Entity as PostLike;
pub use project_request::Entity as ProjectRequest;
pub use user::Entity as User;
pub use user_badge::Entity as UserBadge;
