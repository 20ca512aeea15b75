pub mod models;
pub mod routes;
pub mod services;
pub mod tools;

use std::sync::Arc;

use services::gemini_service::{CompletionClient, GeminiService};
use tools::{ToolGateway, ToolInvoker};

/// Long-lived client handles shared by every in-flight request. A client
/// that failed to initialize stays `None` and the routes depending on it
/// fail fast with a clear message instead of a confusing downstream error.
#[derive(Clone)]
pub struct AppState {
    pub llm: Option<Arc<dyn CompletionClient>>,
    pub tools: Arc<dyn ToolInvoker>,
}

impl AppState {
    pub fn from_env() -> Self {
        let llm: Option<Arc<dyn CompletionClient>> = match GeminiService::new() {
            Ok(client) => {
                println!("Gemini client initialized");
                Some(Arc::new(client))
            }
            Err(err) => {
                eprintln!("Gemini client not available: {}", err);
                None
            }
        };

        Self {
            llm,
            tools: ToolGateway::from_env(),
        }
    }
}
