use serde::{Deserialize, Serialize};
use std::env;

use super::ToolError;

const TAVILY_SEARCH_URL: &str = "https://api.tavily.com/search";
const MAX_RESULTS: u32 = 3;

#[derive(Debug, Serialize)]
struct TavilyRequest {
    api_key: String,
    query: String,
    max_results: u32,
}

#[derive(Debug, Deserialize)]
struct TavilyResponse {
    results: Vec<TavilyResult>,
}

#[derive(Debug, Deserialize)]
struct TavilyResult {
    content: String,
    url: String,
}

/// Searches the web through the Tavily search API. Best for broad,
/// fact-based queries that need current information. Each snippet keeps its
/// source URL so links survive into the final itinerary.
pub async fn search_the_web(http: &reqwest::Client, query: &str) -> Result<String, ToolError> {
    let api_key = env::var("TAVILY_API_KEY")
        .map_err(|_| ToolError::MissingCredentials("TAVILY_API_KEY is not set".to_string()))?;

    let request = TavilyRequest {
        api_key,
        query: query.to_string(),
        max_results: MAX_RESULTS,
    };

    let response = http
        .post(TAVILY_SEARCH_URL)
        .json(&request)
        .send()
        .await?
        .error_for_status()?;

    let parsed: TavilyResponse = response
        .json()
        .await
        .map_err(|e| ToolError::Malformed(format!("unexpected search response: {}", e)))?;

    if parsed.results.is_empty() {
        return Err(ToolError::EmptyResult(format!(
            "the web search returned nothing for '{}'",
            query
        )));
    }

    Ok(parsed
        .results
        .iter()
        .map(|res| format!("- {} (Source: {})", res.content, res.url))
        .collect::<Vec<_>>()
        .join("\n"))
}
