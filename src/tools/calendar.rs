use serde::{Deserialize, Serialize};
use serde_json::json;
use std::env;

use super::ToolError;

const EVENTS_URL: &str = "https://www.googleapis.com/calendar/v3/calendars/primary/events";
const FREEBUSY_URL: &str = "https://www.googleapis.com/calendar/v3/freeBusy";

#[derive(Debug, Serialize)]
struct EventRequest {
    summary: String,
    description: String,
    start: EventTime,
    end: EventTime,
    attendees: Vec<Attendee>,
}

#[derive(Debug, Serialize)]
struct EventTime {
    #[serde(rename = "dateTime")]
    date_time: String,
    #[serde(rename = "timeZone")]
    time_zone: String,
}

#[derive(Debug, Serialize)]
struct Attendee {
    email: String,
}

#[derive(Debug, Deserialize)]
struct EventResponse {
    id: String,
    #[serde(rename = "htmlLink")]
    html_link: Option<String>,
}

#[derive(Debug, Deserialize)]
struct FreeBusyResponse {
    calendars: FreeBusyCalendars,
}

#[derive(Debug, Deserialize)]
struct FreeBusyCalendars {
    primary: BusyWindows,
}

#[derive(Debug, Deserialize)]
struct BusyWindows {
    #[serde(default)]
    busy: Vec<serde_json::Value>,
}

fn bearer_token() -> Result<String, ToolError> {
    env::var("GOOGLE_OAUTH_TOKEN")
        .map_err(|_| ToolError::MissingCredentials("GOOGLE_OAUTH_TOKEN is not set".to_string()))
}

/// Creates an event on the user's primary Google Calendar and returns a
/// confirmation with the event link.
pub async fn create_event(
    http: &reqwest::Client,
    title: &str,
    start_time: &str,
    end_time: &str,
    description: &str,
    attendees: &[String],
) -> Result<String, ToolError> {
    let token = bearer_token()?;

    let request = EventRequest {
        summary: title.to_string(),
        description: description.to_string(),
        start: EventTime {
            date_time: start_time.to_string(),
            time_zone: "UTC".to_string(),
        },
        end: EventTime {
            date_time: end_time.to_string(),
            time_zone: "UTC".to_string(),
        },
        attendees: attendees
            .iter()
            .map(|email| Attendee {
                email: email.clone(),
            })
            .collect(),
    };

    let response: EventResponse = http
        .post(EVENTS_URL)
        .bearer_auth(&token)
        .query(&[("sendUpdates", "all")])
        .json(&request)
        .send()
        .await?
        .error_for_status()?
        .json()
        .await
        .map_err(|e| ToolError::Malformed(format!("unexpected calendar response: {}", e)))?;

    match response.html_link {
        Some(link) => Ok(format!(
            "Successfully created the calendar event! Details: {}",
            link
        )),
        None => Ok(format!(
            "Successfully created the calendar event! Event id: {}",
            response.id
        )),
    }
}

/// Checks whether the primary calendar is free between two instants.
/// Returns "available" or "busy".
pub async fn check_availability(
    http: &reqwest::Client,
    start_time: &str,
    end_time: &str,
) -> Result<String, ToolError> {
    let token = bearer_token()?;

    let response: FreeBusyResponse = http
        .post(FREEBUSY_URL)
        .bearer_auth(&token)
        .json(&json!({
            "timeMin": start_time,
            "timeMax": end_time,
            "items": [{ "id": "primary" }],
        }))
        .send()
        .await?
        .error_for_status()?
        .json()
        .await
        .map_err(|e| ToolError::Malformed(format!("unexpected freebusy response: {}", e)))?;

    if response.calendars.primary.busy.is_empty() {
        Ok("available".to_string())
    } else {
        Ok("busy".to_string())
    }
}
