use serde::{Deserialize, Serialize};

/// Body of `POST /chat`. Older frontend builds send `main_prompt`, newer ones
/// send `prompt`; both are accepted.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatRequest {
    pub prompt: Option<String>,
    pub main_prompt: Option<String>,
    pub send_copy_to: Option<String>,
    #[serde(default)]
    pub calendar_attendees: Vec<String>,
}

impl ChatRequest {
    pub fn prompt_text(&self) -> Option<&str> {
        self.prompt
            .as_deref()
            .or(self.main_prompt.as_deref())
            .map(str::trim)
            .filter(|p| !p.is_empty())
    }
}

#[derive(Debug, Serialize)]
pub struct ItineraryResponse {
    pub itinerary: String,
}

#[derive(Debug, Deserialize)]
pub struct PdfRequest {
    pub markdown_text: String,
}

#[derive(Debug, Deserialize)]
pub struct EmailRequest {
    pub email: String,
    pub markdown_text: String,
}

#[derive(Debug, Deserialize)]
pub struct FlightRequest {
    pub origin: String,
    pub destination: String,
    pub dates: String,
}

#[derive(Debug, Deserialize)]
pub struct HotelRequest {
    pub destination: String,
    pub dates: String,
    pub guests: u32,
}

#[derive(Debug, Deserialize)]
pub struct YoutubeRequest {
    pub topic: String,
}

#[derive(Debug, Deserialize)]
pub struct PlacesRequest {
    pub query: String,
}

#[derive(Debug, Deserialize)]
pub struct WeatherRequest {
    pub destination: String,
}

#[derive(Debug, Deserialize)]
pub struct CalendarEventRequest {
    pub title: String,
    /// Expected in ISO format: "2024-09-20T20:00:00"
    pub start_time: String,
    /// Expected in ISO format: "2024-09-20T21:00:00"
    pub end_time: String,
    pub description: String,
    #[serde(default)]
    pub attendees: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct ResearchResponse {
    pub result: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_text_prefers_prompt_over_main_prompt() {
        let req = ChatRequest {
            prompt: Some("3 days in Lisbon".to_string()),
            main_prompt: Some("ignored".to_string()),
            send_copy_to: None,
            calendar_attendees: vec![],
        };
        assert_eq!(req.prompt_text(), Some("3 days in Lisbon"));
    }

    #[test]
    fn prompt_text_falls_back_to_main_prompt() {
        let req = ChatRequest {
            prompt: None,
            main_prompt: Some("  a week in Kyoto  ".to_string()),
            send_copy_to: None,
            calendar_attendees: vec![],
        };
        assert_eq!(req.prompt_text(), Some("a week in Kyoto"));
    }

    #[test]
    fn blank_prompt_counts_as_missing() {
        let req = ChatRequest {
            prompt: Some("   ".to_string()),
            main_prompt: None,
            send_copy_to: None,
            calendar_attendees: vec![],
        };
        assert_eq!(req.prompt_text(), None);
    }
}
