//! Chat assistant: stateless relay to the generative-AI endpoint.
//!
//! Each call sends the user's message together with the fixed persona block
//! and returns the generated text verbatim. No conversation history is kept
//! server-side; the client keeps its own transcript for display only.

use atelier_common::config::AssistantConfig;
use atelier_common::{AppError, AppResult};
use serde::Deserialize;
use serde_json::json;

/// Fixed persona and platform instructions, injected on every call.
const PERSONA: &str = r"You are the Atelier Assistant, the built-in guide of the Atelier
platform, a marketplace that connects creative professionals (artists)
with clients (buyers).

IDENTITY

- You help users navigate the platform, find artists, understand the
  two roles, and answer questions about creative projects.
- You are friendly, clear, direct and professional. You never sound
  robotic and you never describe yourself as a generic AI model.

WHAT YOU CAN HELP WITH

Search and discovery:
- Finding artists by creative domain, country or languages.
- Explaining what each role means and how to set it from the profile
  page.

Profiles:
- The difference between the ARTIST and BUYER roles.
- Editing the profile: alias, role, country, domain, languages, avatar.
- The difference between the two work areas: Posts (the public feed)
  and Creations (the curated portfolio).

The feed:
- How to write a post (a title, a description of the project, an
  optional budget estimate and deadline make good posts).
- How likes, comments and follows work, and that the feed refreshes on
  its own.

Portfolios:
- What creations are and how they differ from posts: a portfolio holds
  finished, representative work; the feed holds updates and openings.

Messaging and commissions:
- Chats are one-to-one threads between two users.
- Buyers send project requests (budget, optional deadline and notes)
  from a chat; artists accept or deny them, and deliver a link when the
  work is done. Each step also appears as a message in the chat.

Badges:
- The verified-artist badge exists and is awarded to artists; you
  explain the process but never trigger an award yourself.

WHAT YOU MUST NOT DO

- Never invent artists that are not on the platform.
- Never reveal private information about any user.
- Never create posts, creations, chats or requests on a user's behalf;
  explain the steps instead.
- Keep answers non-technical unless the user explicitly asks for
  technical detail.

STYLE

- Short, organized answers; bullet points where they help.
- Use the platform's vocabulary: feed, post, portfolio, creation,
  buyer, artist, project request, chat.";

/// Chat assistant service.
#[derive(Clone)]
pub struct AssistantService {
    api_key: String,
    model: String,
    http_client: reqwest::Client,
}

impl AssistantService {
    /// Create a new assistant service.
    #[must_use]
    pub fn new(config: &AssistantConfig) -> Self {
        Self {
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            http_client: reqwest::Client::new(),
        }
    }

    /// Relay a message to the generative-AI endpoint and return the reply.
    ///
    /// Blank messages are rejected before any network traffic. Upstream
    /// failures surface as a generic server error; details are only logged.
    pub async fn reply(&self, message: &str) -> AppResult<String> {
        let message = message.trim();
        if message.is_empty() {
            return Err(AppError::BadRequest("Message is required".to_string()));
        }

        let url = format!(
            "https://generativelanguage.googleapis.com/v1beta/models/{}:generateContent",
            self.model
        );

        let response = self
            .http_client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&build_request_body(message))
            .send()
            .await
            .map_err(|e| AppError::ExternalService(format!("Assistant request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalService(format!(
                "Assistant API error: {status} - {body}"
            )));
        }

        #[derive(Deserialize)]
        struct GenerateResponse {
            candidates: Option<Vec<Candidate>>,
        }

        #[derive(Deserialize)]
        struct Candidate {
            content: Option<CandidateContent>,
        }

        #[derive(Deserialize)]
        struct CandidateContent {
            parts: Option<Vec<Part>>,
        }

        #[derive(Deserialize)]
        struct Part {
            text: Option<String>,
        }

        let generated: GenerateResponse = response.json().await.map_err(|e| {
            AppError::ExternalService(format!("Failed to parse assistant response: {e}"))
        })?;

        generated
            .candidates
            .into_iter()
            .flatten()
            .next()
            .and_then(|c| c.content)
            .and_then(|c| c.parts)
            .into_iter()
            .flatten()
            .find_map(|p| p.text)
            .ok_or_else(|| AppError::ExternalService("No reply returned".to_string()))
    }
}

/// Build the request body for a single stateless completion.
fn build_request_body(message: &str) -> serde_json::Value {
    json!({
        "systemInstruction": {
            "parts": [{ "text": PERSONA }]
        },
        "contents": [{
            "role": "user",
            "parts": [{ "text": message }]
        }]
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn test_service() -> AssistantService {
        AssistantService::new(&AssistantConfig {
            api_key: "test-key".to_string(),
            model: "test-model".to_string(),
        })
    }

    #[tokio::test]
    async fn test_blank_message_rejected_without_network() {
        let service = test_service();

        let result = service.reply("   ").await;

        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }

    #[test]
    fn test_request_body_shape() {
        let body = build_request_body("How do I set my role?");

        assert_eq!(
            body["contents"][0]["parts"][0]["text"],
            "How do I set my role?"
        );
        let instruction = body["systemInstruction"]["parts"][0]["text"]
            .as_str()
            .unwrap();
        assert!(instruction.contains("Atelier Assistant"));
    }

    #[test]
    fn test_persona_covers_roles() {
        assert!(PERSONA.contains("ARTIST"));
        assert!(PERSONA.contains("BUYER"));
        assert!(PERSONA.contains("project request"));
    }
}
