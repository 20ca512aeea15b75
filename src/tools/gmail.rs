use base64::engine::general_purpose::URL_SAFE;
use base64::Engine;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::env;

use super::ToolError;

const DRAFTS_URL: &str = "https://gmail.googleapis.com/gmail/v1/users/me/drafts";
const SEND_URL: &str = "https://gmail.googleapis.com/gmail/v1/users/me/drafts/send";

#[derive(Debug, Serialize)]
struct DraftRequest {
    message: RawMessage,
}

#[derive(Debug, Serialize)]
struct RawMessage {
    raw: String,
}

#[derive(Debug, Deserialize)]
struct DraftResponse {
    id: String,
}

#[derive(Debug, Deserialize)]
struct SendResponse {
    id: String,
}

fn bearer_token() -> Result<String, ToolError> {
    env::var("GOOGLE_OAUTH_TOKEN")
        .map_err(|_| ToolError::MissingCredentials("GOOGLE_OAUTH_TOKEN is not set".to_string()))
}

/// Creates a Gmail draft addressed to `recipient` whose body carries the
/// public link to the itinerary PDF. Returns the draft id for the send step.
pub async fn create_draft(
    http: &reqwest::Client,
    recipient: &str,
    subject: &str,
    body: &str,
    attachment_url: &str,
) -> Result<String, ToolError> {
    let token = bearer_token()?;

    let rfc822 = format!(
        "To: {}\r\nSubject: {}\r\nContent-Type: text/plain; charset=\"UTF-8\"\r\n\r\n{}\r\n\r\nYour itinerary PDF: {}\r\n",
        recipient, subject, body, attachment_url
    );
    let request = DraftRequest {
        message: RawMessage {
            raw: URL_SAFE.encode(rfc822.as_bytes()),
        },
    };

    let response: DraftResponse = http
        .post(DRAFTS_URL)
        .bearer_auth(&token)
        .json(&request)
        .send()
        .await?
        .error_for_status()?
        .json()
        .await
        .map_err(|e| ToolError::Malformed(format!("unexpected draft response: {}", e)))?;

    Ok(response.id)
}

/// Sends a previously created draft by id.
pub async fn send_draft(http: &reqwest::Client, draft_id: &str) -> Result<String, ToolError> {
    let token = bearer_token()?;

    let response: SendResponse = http
        .post(SEND_URL)
        .bearer_auth(&token)
        .json(&json!({ "id": draft_id }))
        .send()
        .await?
        .error_for_status()?
        .json()
        .await
        .map_err(|e| ToolError::Malformed(format!("unexpected send response: {}", e)))?;

    Ok(format!("Draft {} sent as message {}", draft_id, response.id))
}
