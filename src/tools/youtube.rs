use serde::Deserialize;
use std::env;

use super::ToolError;

const SEARCH_URL: &str = "https://www.googleapis.com/youtube/v3/search";
const MAX_VIDEOS: &str = "3";

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    items: Vec<SearchItem>,
}

#[derive(Debug, Deserialize)]
struct SearchItem {
    id: VideoId,
    snippet: Snippet,
}

#[derive(Debug, Deserialize)]
struct VideoId {
    #[serde(rename = "videoId")]
    video_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Snippet {
    title: String,
    thumbnails: Thumbnails,
}

#[derive(Debug, Deserialize)]
struct Thumbnails {
    high: Option<Thumbnail>,
}

#[derive(Debug, Deserialize)]
struct Thumbnail {
    url: String,
}

/// Finds YouTube videos for a topic, separating long-form vlogs from Shorts.
/// Returns markdown with clickable thumbnails for both groups.
pub async fn find_videos(http: &reqwest::Client, topic: &str) -> Result<String, ToolError> {
    let api_key = env::var("YOUTUBE_API_KEY")
        .map_err(|_| ToolError::MissingCredentials("YOUTUBE_API_KEY is not set".to_string()))?;

    let vlogs = search_videos(http, &api_key, &format!("{} travel vlog", topic), "medium").await?;
    let shorts = search_videos(http, &api_key, &format!("{} #shorts", topic), "short").await?;

    if vlogs.is_empty() && shorts.is_empty() {
        return Err(ToolError::EmptyResult(format!(
            "no videos found for '{}'",
            topic
        )));
    }

    let mut output = String::from("### Inspiring Travel Vlogs\n");
    if vlogs.is_empty() {
        output.push_str("No long-form vlogs found.\n");
    } else {
        output.push_str(&vlogs);
    }

    output.push_str("\n### Quick Shorts & Tips\n");
    if shorts.is_empty() {
        output.push_str("No relevant Shorts found.\n");
    } else {
        output.push_str(&shorts);
    }

    Ok(output.trim_end().to_string())
}

async fn search_videos(
    http: &reqwest::Client,
    api_key: &str,
    query: &str,
    duration: &str,
) -> Result<String, ToolError> {
    let response: SearchResponse = http
        .get(SEARCH_URL)
        .query(&[
            ("part", "snippet"),
            ("q", query),
            ("type", "video"),
            ("videoDuration", duration),
            ("maxResults", MAX_VIDEOS),
            ("key", api_key),
        ])
        .send()
        .await?
        .error_for_status()?
        .json()
        .await
        .map_err(|e| ToolError::Malformed(format!("unexpected YouTube response: {}", e)))?;

    let mut output = String::new();
    for item in response.items {
        let Some(video_id) = item.id.video_id else {
            continue;
        };
        let video_url = format!("https://www.youtube.com/watch?v={}", video_id);
        if let Some(thumbnail) = item.snippet.thumbnails.high {
            output.push_str(&format!(
                "[![{}]({})]({})\n",
                item.snippet.title, thumbnail.url, video_url
            ));
        }
        output.push_str(&format!("**[{}]({})**\n\n", item.snippet.title, video_url));
    }
    Ok(output)
}
