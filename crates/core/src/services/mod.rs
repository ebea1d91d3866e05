//! Business logic services.

pub mod assistant;
pub mod auth;
pub mod badge;
pub mod chat;
pub mod creation;
pub mod follow;
pub mod post;
pub mod project_request;
pub mod user;

pub use assistant::AssistantService;
pub use auth::{AuthService, Claims};
pub use badge::{AwardedBadge, BadgeService};
pub use chat::{canonical_pair, ChatService};
pub use creation::{CreationInput, CreationService};
pub use follow::FollowService;
pub use post::{CommentView, CreatePostInput, FeedItem, LikeToggle, PostService, PostSummary};
pub use project_request::{
    AcceptedRequest, CreateProjectRequestInput, Decision, ProjectRequestService,
};
pub use user::{display_name, PublicProfile, UpdateProfileInput, UserService};
