use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::env;
use std::error::Error;
use std::fmt;
use std::time::Duration;

const DEFAULT_MODEL: &str = "gemini-1.5-flash";
const GENERATE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";
const REQUEST_TIMEOUT_SECS: u64 = 60;

#[derive(Debug, Serialize)]
struct GenerateRequest {
    contents: Vec<Content>,
    #[serde(rename = "systemInstruction")]
    system_instruction: Content,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    text: String,
}

#[derive(Debug, Serialize)]
struct GenerationConfig {
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Debug)]
pub enum LlmError {
    EnvironmentError(String),
    HttpError(reqwest::Error),
    ResponseError(String),
}

impl fmt::Display for LlmError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LlmError::EnvironmentError(msg) => write!(f, "Environment error: {}", msg),
            LlmError::HttpError(err) => write!(f, "HTTP error: {}", err),
            LlmError::ResponseError(msg) => write!(f, "Response error: {}", msg),
        }
    }
}

impl Error for LlmError {}

impl From<reqwest::Error> for LlmError {
    fn from(err: reqwest::Error) -> Self {
        LlmError::HttpError(err)
    }
}

/// One-shot LLM completion: a system instruction plus a user prompt in,
/// response text out. The planner and the synthesizer both depend on this
/// seam instead of a concrete provider.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    async fn complete(&self, system: &str, prompt: &str) -> Result<String, LlmError>;
}

/// Google Gemini completion client. Stateless per call and safe to share
/// across in-flight requests.
pub struct GeminiService {
    client: reqwest::Client,
    api_key: String,
    model: String,
}

impl GeminiService {
    pub fn new() -> Result<Self, LlmError> {
        let api_key = env::var("GEMINI_API_KEY")
            .map_err(|_| LlmError::EnvironmentError("GEMINI_API_KEY not set".to_string()))?;

        let model = env::var("GEMINI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            client,
            api_key,
            model,
        })
    }
}

#[async_trait]
impl CompletionClient for GeminiService {
    async fn complete(&self, system: &str, prompt: &str) -> Result<String, LlmError> {
        let url = format!("{}/{}:generateContent", GENERATE_URL, self.model);

        let request = GenerateRequest {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
            system_instruction: Content {
                role: None,
                parts: vec![Part {
                    text: system.to_string(),
                }],
            },
            generation_config: GenerationConfig { temperature: 0.7 },
        };

        let response = self
            .client
            .post(&url)
            .query(&[("key", self.api_key.as_str())])
            .json(&request)
            .send()
            .await?
            .error_for_status()?;

        let parsed: GenerateResponse = response
            .json()
            .await
            .map_err(|e| LlmError::ResponseError(format!("unexpected completion body: {}", e)))?;

        let text = parsed
            .candidates
            .into_iter()
            .find_map(|c| c.content)
            .map(|content| {
                content
                    .parts
                    .into_iter()
                    .map(|p| p.text)
                    .collect::<Vec<_>>()
                    .join("")
            })
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| LlmError::ResponseError("completion had no text".to_string()))?;

        Ok(text)
    }
}
