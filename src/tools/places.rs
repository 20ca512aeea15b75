use serde::Deserialize;
use std::env;

use super::ToolError;

const TEXT_SEARCH_URL: &str = "https://maps.googleapis.com/maps/api/place/textsearch/json";
const DETAILS_URL: &str = "https://maps.googleapis.com/maps/api/place/details/json";
// Limit to the top 3 results for a clean itinerary section.
const MAX_PLACES: usize = 3;

#[derive(Debug, Deserialize)]
struct TextSearchResponse {
    status: String,
    #[serde(default)]
    results: Vec<TextSearchResult>,
}

#[derive(Debug, Deserialize)]
struct TextSearchResult {
    place_id: String,
}

#[derive(Debug, Deserialize)]
struct DetailsResponse {
    result: Option<PlaceDetails>,
}

#[derive(Debug, Deserialize)]
struct PlaceDetails {
    name: Option<String>,
    rating: Option<f32>,
    formatted_address: Option<String>,
    url: Option<String>,
    website: Option<String>,
}

/// Finds detailed information and a Google Maps link for a place or a
/// category of places ("Eiffel Tower", "best pizza in Rome"). Returns a
/// markdown block with rating, address and links for the top matches.
pub async fn find_place_details(http: &reqwest::Client, query: &str) -> Result<String, ToolError> {
    let api_key = env::var("GPLACES_API_KEY")
        .map_err(|_| ToolError::MissingCredentials("GPLACES_API_KEY is not set".to_string()))?;

    let search: TextSearchResponse = http
        .get(TEXT_SEARCH_URL)
        .query(&[("query", query), ("key", api_key.as_str())])
        .send()
        .await?
        .error_for_status()?
        .json()
        .await
        .map_err(|e| ToolError::Malformed(format!("unexpected places response: {}", e)))?;

    if search.status != "OK" || search.results.is_empty() {
        return Err(ToolError::EmptyResult(format!(
            "no places found for '{}'",
            query
        )));
    }

    let mut output = format!("Here are some top suggestions for '{}':\n", query);

    for place in search.results.iter().take(MAX_PLACES) {
        let details: DetailsResponse = http
            .get(DETAILS_URL)
            .query(&[
                ("place_id", place.place_id.as_str()),
                ("fields", "name,rating,formatted_address,url,website"),
                ("key", api_key.as_str()),
            ])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await
            .map_err(|e| ToolError::Malformed(format!("unexpected place details: {}", e)))?;

        let Some(details) = details.result else {
            continue;
        };

        let name = details.name.unwrap_or_else(|| "N/A".to_string());
        let address = details
            .formatted_address
            .unwrap_or_else(|| "Address not available".to_string());
        let rating = details
            .rating
            .map(|r| r.to_string())
            .unwrap_or_else(|| "No rating".to_string());
        let gmaps_url = details.url.unwrap_or_else(|| "#".to_string());

        output.push_str(&format!("#### {}\n", name));
        output.push_str(&format!("- **Rating**: {} ⭐\n", rating));
        output.push_str(&format!("- **Address**: {}\n", address));
        output.push_str(&format!("- **Google Maps**: [View on Map]({})\n", gmaps_url));
        if let Some(website) = details.website {
            output.push_str(&format!("- **Website**: [Visit Website]({})\n", website));
        }
        output.push('\n');
    }

    Ok(output.trim_end().to_string())
}
