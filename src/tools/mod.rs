pub mod calendar;
pub mod gmail;
pub mod places;
pub mod search;
pub mod weather;
pub mod youtube;

use std::error::Error;
use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

/// Failure of a single tool invocation.
#[derive(Debug)]
pub enum ToolError {
    MissingCredentials(String),
    Http(reqwest::Error),
    EmptyResult(String),
    Malformed(String),
    UnknownTool(String),
}

impl fmt::Display for ToolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ToolError::MissingCredentials(msg) => write!(f, "Missing credentials: {}", msg),
            ToolError::Http(err) => write!(f, "Upstream HTTP error: {}", err),
            ToolError::EmptyResult(msg) => write!(f, "No results: {}", msg),
            ToolError::Malformed(msg) => write!(f, "Malformed request or response: {}", msg),
            ToolError::UnknownTool(name) => write!(f, "Unknown tool: {}", name),
        }
    }
}

impl Error for ToolError {}

impl From<reqwest::Error> for ToolError {
    fn from(err: reqwest::Error) -> Self {
        ToolError::Http(err)
    }
}

/// Uniform interface to invoke a named external capability with arguments
/// and receive a text result. The executor, email and calendar services all
/// depend on this seam rather than on concrete integrations.
#[async_trait]
pub trait ToolInvoker: Send + Sync {
    async fn invoke(&self, tool: &str, args: Value) -> Result<String, ToolError>;
}

/// Dispatches tool names to the concrete reqwest-backed integrations.
/// Credentials are read from the environment at call time, so a missing key
/// surfaces as a `ToolError` on the affected tool only.
pub struct ToolGateway {
    http: reqwest::Client,
}

impl ToolGateway {
    pub fn new(http: reqwest::Client) -> Self {
        Self { http }
    }

    pub fn from_env() -> Arc<dyn ToolInvoker> {
        Arc::new(Self::new(reqwest::Client::new()))
    }
}

fn str_arg(args: &Value, key: &str) -> Result<String, ToolError> {
    args.get(key)
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| ToolError::Malformed(format!("missing '{}' argument", key)))
}

fn string_list_arg(args: &Value, key: &str) -> Vec<String> {
    args.get(key)
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

#[async_trait]
impl ToolInvoker for ToolGateway {
    async fn invoke(&self, tool: &str, args: Value) -> Result<String, ToolError> {
        match tool {
            "search" => search::search_the_web(&self.http, &str_arg(&args, "query")?).await,
            "find_place_details" => {
                places::find_place_details(&self.http, &str_arg(&args, "query")?).await
            }
            "find_video" => youtube::find_videos(&self.http, &str_arg(&args, "topic")?).await,
            "get_weather" => {
                weather::get_weather(&self.http, &str_arg(&args, "destination")?).await
            }
            "draft_email" => {
                gmail::create_draft(
                    &self.http,
                    &str_arg(&args, "recipient")?,
                    &str_arg(&args, "subject")?,
                    &str_arg(&args, "body")?,
                    &str_arg(&args, "attachment_url")?,
                )
                .await
            }
            "send_draft_email" => {
                gmail::send_draft(&self.http, &str_arg(&args, "draft_id")?).await
            }
            "create_calendar_event" => {
                calendar::create_event(
                    &self.http,
                    &str_arg(&args, "title")?,
                    &str_arg(&args, "start_time")?,
                    &str_arg(&args, "end_time")?,
                    &str_arg(&args, "description")?,
                    &string_list_arg(&args, "attendees"),
                )
                .await
            }
            "check_calendar_availability" => {
                calendar::check_availability(
                    &self.http,
                    &str_arg(&args, "start_time")?,
                    &str_arg(&args, "end_time")?,
                )
                .await
            }
            other => Err(ToolError::UnknownTool(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn unknown_tool_is_rejected() {
        let gateway = ToolGateway::new(reqwest::Client::new());
        let err = gateway
            .invoke("teleport", json!({}))
            .await
            .expect_err("unknown tool must fail");
        assert!(matches!(err, ToolError::UnknownTool(_)));
    }

    #[tokio::test]
    async fn missing_argument_is_malformed() {
        let gateway = ToolGateway::new(reqwest::Client::new());
        let err = gateway
            .invoke("search", json!({}))
            .await
            .expect_err("search without query must fail");
        assert!(matches!(err, ToolError::Malformed(_)));
    }
}
