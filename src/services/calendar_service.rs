use std::sync::Arc;

use chrono::{Duration, SecondsFormat, Utc};
use serde_json::json;

use crate::tools::{ToolError, ToolInvoker};

// Travel-date expressions are free form and often not parseable, so
// dispatched trip events default to a one-week hold starting a week out.
const DEFAULT_LEAD_DAYS: i64 = 7;
const DEFAULT_TRIP_DAYS: i64 = 7;
const DESCRIPTION_LIMIT: usize = 600;

/// Creates a calendar event through the tool gateway.
pub async fn add_event_to_calendar(
    tools: &Arc<dyn ToolInvoker>,
    title: &str,
    start_time: &str,
    end_time: &str,
    description: &str,
    attendees: &[String],
) -> Result<String, ToolError> {
    println!("Calendar Service: creating event '{}'", title);
    tools
        .invoke(
            "create_calendar_event",
            json!({
                "title": title,
                "start_time": start_time,
                "end_time": end_time,
                "description": description,
                "attendees": attendees,
            }),
        )
        .await
}

/// Default scheduling window for a dispatched trip event.
pub fn default_trip_window() -> (String, String) {
    let start = Utc::now() + Duration::days(DEFAULT_LEAD_DAYS);
    let end = start + Duration::days(DEFAULT_TRIP_DAYS);
    (
        start.to_rfc3339_opts(SecondsFormat::Secs, true),
        end.to_rfc3339_opts(SecondsFormat::Secs, true),
    )
}

/// Event title derived from the plan's destination.
pub fn trip_event_title(destination: &str) -> String {
    if destination.trim().is_empty() {
        "Your Upcoming Trip".to_string()
    } else {
        format!("Trip to {}", destination.trim())
    }
}

/// The opening of the itinerary document, clipped at a character budget on a
/// char boundary, used as the event description.
pub fn event_description(document: &str) -> String {
    if document.chars().count() <= DESCRIPTION_LIMIT {
        return document.to_string();
    }
    let clipped: String = document.chars().take(DESCRIPTION_LIMIT).collect();
    format!("{}…", clipped.trim_end())
}
