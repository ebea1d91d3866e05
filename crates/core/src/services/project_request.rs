//! Project request workflow: PENDING -> ACCEPTED | DENIED, then delivery.
//!
//! Every transition appends a notice to the pair's chat so both sides see
//! the workflow progress inline with their conversation.

use std::collections::HashMap;

use atelier_common::{AppError, AppResult, IdGenerator};
use atelier_db::{
    entities::project_request::{self, ProjectRequestStatus},
    entities::user::{self, Role},
    entities::message,
    repositories::{ProjectRequestRepository, UserRepository},
};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Utc};
use sea_orm::Set;
use serde::{Deserialize, Serialize};

use crate::services::chat::ChatService;

/// Artist's decision on a pending request.
///
/// Closed enum: malformed decision values fail at deserialization, before
/// any lookup runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Decision {
    Accepted,
    Denied,
}

/// Input for creating a project request.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProjectRequestInput {
    pub budget: Option<String>,
    /// RFC 3339 timestamp or `YYYY-MM-DD`.
    pub deadline: Option<String>,
    pub notes: Option<String>,
}

/// An accepted request with the counterpart user attached.
pub struct AcceptedRequest {
    pub request: project_request::Model,
    /// The buyer when the caller is the artist, and vice versa.
    pub counterpart: Option<user::Model>,
}

/// Project request service for business logic.
#[derive(Clone)]
pub struct ProjectRequestService {
    request_repo: ProjectRequestRepository,
    user_repo: UserRepository,
    chats: ChatService,
    id_gen: IdGenerator,
}

impl ProjectRequestService {
    /// Create a new project request service.
    #[must_use]
    pub const fn new(
        request_repo: ProjectRequestRepository,
        user_repo: UserRepository,
        chats: ChatService,
    ) -> Self {
        Self {
            request_repo,
            user_repo,
            chats,
            id_gen: IdGenerator::new(),
        }
    }

    /// Buyer sends a project request to an artist.
    ///
    /// Creates or reuses the pair's chat, inserts the request in PENDING
    /// and appends a summary message. Returns both.
    pub async fn create(
        &self,
        buyer: &user::Model,
        artist_id: &str,
        input: CreateProjectRequestInput,
    ) -> AppResult<(project_request::Model, message::Model)> {
        if buyer.role != Some(Role::Buyer) {
            return Err(AppError::Forbidden(
                "Only buyers can send project requests".to_string(),
            ));
        }

        if artist_id == buyer.id {
            return Err(AppError::BadRequest("Invalid user id".to_string()));
        }

        let budget = input.budget.as_deref().unwrap_or("").trim().to_string();
        if budget.is_empty() {
            return Err(AppError::BadRequest("Budget is required".to_string()));
        }

        let deadline_raw = input
            .deadline
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty());
        let deadline = match deadline_raw {
            Some(raw) => Some(parse_deadline(raw)?),
            None => None,
        };

        let notes = input
            .notes
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(ToString::to_string);

        let _artist = self.user_repo.get_by_id(artist_id).await?;

        let chat = self.chats.get_or_create_chat(&buyer.id, artist_id).await?;

        let model = project_request::ActiveModel {
            id: Set(self.id_gen.generate()),
            buyer_id: Set(buyer.id.clone()),
            artist_id: Set(artist_id.to_string()),
            chat_id: Set(Some(chat.id.clone())),
            budget: Set(budget.clone()),
            deadline: Set(deadline),
            notes: Set(notes.clone()),
            status: Set(ProjectRequestStatus::Pending),
            delivery_link: Set(None),
            delivered_at: Set(None),
            created_at: Set(Utc::now().into()),
        };

        let request = self.request_repo.create(model).await?;

        let mut lines = vec!["PROJECT REQUEST".to_string(), format!("Budget: {budget}")];
        if let Some(raw) = deadline_raw {
            lines.push(format!("Deadline: {raw}"));
        }
        if let Some(notes) = &notes {
            lines.push(format!("Details: {notes}"));
        }

        let message = self
            .chats
            .append_message(&chat.id, &buyer.id, &lines.join("\n"))
            .await?;

        tracing::info!(
            request = %request.id,
            buyer = %buyer.id,
            artist = %artist_id,
            "Created project request"
        );

        Ok((request, message))
    }

    /// Artist accepts or denies the newest PENDING request from a buyer.
    pub async fn respond(
        &self,
        artist: &user::Model,
        buyer_id: &str,
        decision: Decision,
    ) -> AppResult<project_request::Model> {
        if artist.role != Some(Role::Artist) {
            return Err(AppError::Forbidden(
                "Only artists can respond to project requests".to_string(),
            ));
        }

        let request = self
            .request_repo
            .find_latest_pending(buyer_id, &artist.id)
            .await?
            .ok_or_else(|| AppError::NotFound("No pending request found".to_string()))?;

        let chat_id = request.chat_id.clone();

        let mut active: project_request::ActiveModel = request.into();
        active.status = Set(match decision {
            Decision::Accepted => ProjectRequestStatus::Accepted,
            Decision::Denied => ProjectRequestStatus::Denied,
        });
        let updated = self.request_repo.update(active).await?;

        if let Some(chat_id) = chat_id {
            let text = match decision {
                Decision::Accepted => "Project request accepted.",
                Decision::Denied => "Project request denied.",
            };
            self.chats.append_message(&chat_id, &artist.id, text).await?;
        }

        tracing::info!(
            request = %updated.id,
            artist = %artist.id,
            decision = ?decision,
            "Responded to project request"
        );

        Ok(updated)
    }

    /// Artist attaches the delivery link to the newest undelivered
    /// ACCEPTED request from a buyer.
    ///
    /// Already-delivered requests are excluded from the lookup, so a second
    /// deliver call is a not-found rather than an overwrite.
    pub async fn deliver(
        &self,
        artist: &user::Model,
        buyer_id: &str,
        link: &str,
    ) -> AppResult<project_request::Model> {
        if artist.role != Some(Role::Artist) {
            return Err(AppError::Forbidden(
                "Only artists can send delivery links".to_string(),
            ));
        }

        let link = link.trim();
        if link.is_empty() {
            return Err(AppError::BadRequest("Delivery link is required".to_string()));
        }

        let request = self
            .request_repo
            .find_latest_accepted_undelivered(buyer_id, &artist.id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound("No accepted project request found for this buyer".to_string())
            })?;

        let chat_id = request.chat_id.clone();

        let mut active: project_request::ActiveModel = request.into();
        active.delivery_link = Set(Some(link.to_string()));
        active.delivered_at = Set(Some(Utc::now().into()));
        let updated = self.request_repo.update(active).await?;

        if let Some(chat_id) = chat_id {
            self.chats
                .append_message(&chat_id, &artist.id, &format!("DELIVERY LINK\n{link}"))
                .await?;
        }

        tracing::info!(request = %updated.id, artist = %artist.id, "Delivered project request");

        Ok(updated)
    }

    /// The caller's ACCEPTED requests, role-aware.
    ///
    /// Artists see requests where they are the artist with the buyer
    /// attached; everyone else gets the buyer-side view.
    pub async fn list_accepted(&self, me: &user::Model) -> AppResult<Vec<AcceptedRequest>> {
        let requests = if me.role == Some(Role::Artist) {
            self.request_repo.find_accepted_for_artist(&me.id).await?
        } else {
            self.request_repo.find_accepted_for_buyer(&me.id).await?
        };

        let counterpart_ids: Vec<String> = requests
            .iter()
            .map(|r| {
                if me.role == Some(Role::Artist) {
                    r.buyer_id.clone()
                } else {
                    r.artist_id.clone()
                }
            })
            .collect();

        let users: HashMap<String, user::Model> = self
            .user_repo
            .find_by_ids(&counterpart_ids)
            .await?
            .into_iter()
            .map(|u| (u.id.clone(), u))
            .collect();

        Ok(requests
            .into_iter()
            .map(|request| {
                let counterpart_id = if me.role == Some(Role::Artist) {
                    &request.buyer_id
                } else {
                    &request.artist_id
                };
                AcceptedRequest {
                    counterpart: users.get(counterpart_id).cloned(),
                    request,
                }
            })
            .collect())
    }
}

/// Parse a deadline as RFC 3339 or a plain date.
fn parse_deadline(raw: &str) -> AppResult<sea_orm::prelude::DateTimeWithTimeZone> {
    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(raw) {
        return Ok(dt);
    }

    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        let dt = NaiveDateTime::new(date, NaiveTime::MIN);
        return Ok(chrono::DateTime::<Utc>::from_naive_utc_and_offset(dt, Utc).into());
    }

    Err(AppError::BadRequest("Invalid deadline date".to_string()))
}
