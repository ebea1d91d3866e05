//! Artist side of the project workflow: respond, deliver, list accepted.

use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use chrono::{DateTime, Utc};
use atelier_common::AppResult;
use atelier_core::{display_name, AcceptedRequest, Decision};
use atelier_db::entities::project_request::{self, ProjectRequestStatus};
use atelier_db::entities::user::Role;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{extractors::AuthUser, middleware::AppState};

/// Create project requests router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/project-requests/respond", post(respond))
        .route("/project-requests/deliver", post(deliver))
        .route("/my-project-requests", get(my_project_requests))
}

/// Project request response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectRequestResponse {
    pub id: String,
    pub buyer_id: String,
    pub artist_id: String,
    pub chat_id: Option<String>,
    pub budget: String,
    pub deadline: Option<DateTime<Utc>>,
    pub notes: Option<String>,
    pub status: ProjectRequestStatus,
    pub delivery_link: Option<String>,
    pub delivered_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl From<project_request::Model> for ProjectRequestResponse {
    fn from(request: project_request::Model) -> Self {
        Self {
            id: request.id,
            buyer_id: request.buyer_id,
            artist_id: request.artist_id,
            chat_id: request.chat_id,
            budget: request.budget,
            deadline: request.deadline.map(Into::into),
            notes: request.notes,
            status: request.status,
            delivery_link: request.delivery_link,
            delivered_at: request.delivered_at.map(Into::into),
            created_at: request.created_at.into(),
        }
    }
}

/// Respond request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RespondRequest {
    pub buyer_id: String,
    /// ACCEPTED or DENIED; anything else fails deserialization.
    pub decision: Decision,
}

/// Artist accepts or denies the newest pending request from a buyer.
async fn respond(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(req): Json<RespondRequest>,
) -> AppResult<Json<ProjectRequestResponse>> {
    info!(artist = %user.id, buyer = %req.buyer_id, decision = ?req.decision, "Responding to project request");

    let updated = state
        .project_request_service
        .respond(&user, &req.buyer_id, req.decision)
        .await?;

    Ok(Json(ProjectRequestResponse::from(updated)))
}

/// Deliver request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliverRequest {
    pub buyer_id: String,
    pub link: Option<String>,
}

/// Artist attaches the delivery link to an accepted request.
async fn deliver(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(req): Json<DeliverRequest>,
) -> AppResult<Json<ProjectRequestResponse>> {
    info!(artist = %user.id, buyer = %req.buyer_id, "Delivering project request");

    let updated = state
        .project_request_service
        .deliver(&user, &req.buyer_id, req.link.as_deref().unwrap_or(""))
        .await?;

    Ok(Json(ProjectRequestResponse::from(updated)))
}

/// The counterpart on an accepted request.
#[derive(Debug, Serialize)]
pub struct PartyResponse {
    pub id: String,
    pub name: String,
}

/// Accepted request with the counterpart attached.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MyProjectRequestResponse {
    pub id: String,
    pub budget: String,
    pub deadline: Option<DateTime<Utc>>,
    pub notes: Option<String>,
    pub status: ProjectRequestStatus,
    pub created_at: DateTime<Utc>,
    pub delivery_link: Option<String>,
    pub delivered_at: Option<DateTime<Utc>>,
    pub buyer: Option<PartyResponse>,
    pub artist: Option<PartyResponse>,
}

impl MyProjectRequestResponse {
    fn build(accepted: AcceptedRequest, viewer_is_artist: bool) -> Self {
        let party = accepted.counterpart.as_ref().map(|u| PartyResponse {
            id: u.id.clone(),
            name: display_name(u),
        });
        let (buyer, artist) = if viewer_is_artist {
            (party, None)
        } else {
            (None, party)
        };
        Self {
            id: accepted.request.id,
            budget: accepted.request.budget,
            deadline: accepted.request.deadline.map(Into::into),
            notes: accepted.request.notes,
            status: accepted.request.status,
            created_at: accepted.request.created_at.into(),
            delivery_link: accepted.request.delivery_link,
            delivered_at: accepted.request.delivered_at.map(Into::into),
            buyer,
            artist,
        }
    }
}

/// Role-aware list of the caller's accepted requests.
async fn my_project_requests(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<MyProjectRequestResponse>>> {
    let viewer_is_artist = user.role == Some(Role::Artist);
    let accepted = state.project_request_service.list_accepted(&user).await?;

    Ok(Json(
        accepted
            .into_iter()
            .map(|a| MyProjectRequestResponse::build(a, viewer_is_artist))
            .collect(),
    ))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn test_request() -> project_request::Model {
        project_request::Model {
            id: "pr1".to_string(),
            buyer_id: "buyer".to_string(),
            artist_id: "artist".to_string(),
            chat_id: Some("c1".to_string()),
            budget: "500 EUR".to_string(),
            deadline: None,
            notes: None,
            status: ProjectRequestStatus::Accepted,
            delivery_link: None,
            delivered_at: None,
            created_at: Utc::now().into(),
        }
    }

    #[test]
    fn test_project_request_response_serialization() {
        let response = ProjectRequestResponse::from(test_request());

        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("\"status\":\"ACCEPTED\""));
        assert!(json.contains("\"deliveryLink\":null"));
        assert!(json.contains("\"budget\":\"500 EUR\""));
    }

    #[test]
    fn test_artist_view_attaches_buyer_only() {
        let accepted = AcceptedRequest {
            request: test_request(),
            counterpart: None,
        };

        let response = MyProjectRequestResponse::build(accepted, true);

        assert!(response.buyer.is_none()); // no counterpart row loaded
        assert!(response.artist.is_none());

        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("\"buyer\":null"));
    }

    #[test]
    fn test_respond_request_rejects_malformed_decision() {
        let malformed: Result<RespondRequest, _> =
            serde_json::from_str(r#"{"buyerId":"b1","decision":"MAYBE"}"#);
        assert!(malformed.is_err());

        let ok: RespondRequest =
            serde_json::from_str(r#"{"buyerId":"b1","decision":"DENIED"}"#).unwrap();
        assert_eq!(ok.decision, Decision::Denied);
    }
}
