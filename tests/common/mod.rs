#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::Value;

use journey_api::services::gemini_service::{CompletionClient, LlmError};
use journey_api::tools::{ToolError, ToolInvoker};
use journey_api::AppState;

/// Completion stub that pops scripted responses in order and records every
/// prompt it was given.
pub struct StubLlm {
    responses: Mutex<VecDeque<String>>,
    pub prompts: Mutex<Vec<String>>,
}

impl StubLlm {
    pub fn new(responses: &[&str]) -> Arc<Self> {
        Arc::new(Self {
            responses: Mutex::new(responses.iter().map(|r| r.to_string()).collect()),
            prompts: Mutex::new(Vec::new()),
        })
    }

    pub fn prompt(&self, index: usize) -> String {
        self.prompts.lock().unwrap()[index].clone()
    }
}

#[async_trait]
impl CompletionClient for StubLlm {
    async fn complete(&self, _system: &str, prompt: &str) -> Result<String, LlmError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| LlmError::ResponseError("no scripted response left".to_string()))
    }
}

/// Gateway stub with canned per-tool results; listed tools always fail.
pub struct StubTools {
    pub failing_tools: Vec<String>,
}

impl StubTools {
    pub fn reliable() -> Arc<dyn ToolInvoker> {
        Arc::new(Self {
            failing_tools: Vec::new(),
        })
    }

    pub fn failing(tools: &[&str]) -> Arc<dyn ToolInvoker> {
        Arc::new(Self {
            failing_tools: tools.iter().map(|t| t.to_string()).collect(),
        })
    }
}

#[async_trait]
impl ToolInvoker for StubTools {
    async fn invoke(&self, tool: &str, args: Value) -> Result<String, ToolError> {
        if self.failing_tools.iter().any(|t| t == tool) {
            return Err(ToolError::EmptyResult(format!("{} is down", tool)));
        }
        match tool {
            "search" => Ok(format!(
                "- canned results for {} (Source: https://example.com)",
                args["query"].as_str().unwrap_or_default()
            )),
            "find_video" => Ok(format!(
                "**[Vlog about {}](https://youtube.com/watch?v=abc)**",
                args["topic"].as_str().unwrap_or_default()
            )),
            _ => Ok("ok".to_string()),
        }
    }
}

pub fn state_with(llm: Arc<StubLlm>, tools: Arc<dyn ToolInvoker>) -> AppState {
    AppState {
        llm: Some(llm),
        tools,
    }
}

pub fn uninitialized_state() -> AppState {
    AppState {
        llm: None,
        tools: StubTools::reliable(),
    }
}
