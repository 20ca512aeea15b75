use serde::Deserialize;
use std::sync::Arc;

use crate::models::research::{PlanFeatures, ResearchPlan};
use crate::services::gemini_service::CompletionClient;

const PLANNER_SYSTEM_PROMPT: &str = "\
You are the planning brain of Journey AI, a travel assistant. Decompose the \
user's trip request into a research plan. Respond with a single JSON object \
and nothing else, using exactly this schema:
{
  \"destination\": \"<city or region, empty string if unknown>\",
  \"travel_dates\": \"<the dates as the user phrased them, empty if absent>\",
  \"num_travelers\": <positive integer, 1 if unspecified>,
  \"features\": { \"flights\": <bool>, \"hotels\": <bool>, \"youtube\": <bool> },
  \"research_topics\": [\"<short search topic>\", ...]
}
Set a feature to true only when the user clearly wants it. Derive one \
research topic per distinct interest, each scoped to the destination \
(for example \"food in Lisbon\"). Do not wrap the JSON in markdown fences.";

/// Raw planner output shape. Every field is defaulted so a sparse but
/// well-formed object still parses; a wrong-typed field fails the whole
/// parse and collapses to the empty plan.
#[derive(Debug, Deserialize)]
struct RawPlan {
    #[serde(default)]
    destination: String,
    #[serde(default)]
    travel_dates: String,
    #[serde(default = "default_travelers")]
    num_travelers: u32,
    #[serde(default)]
    features: PlanFeatures,
    #[serde(default)]
    research_topics: Vec<String>,
}

fn default_travelers() -> u32 {
    1
}

/// Turns a free-form trip request into a structured `ResearchPlan` with one
/// LLM completion call. Planning never raises: any completion or parse
/// failure yields the empty plan, which the caller detects as "nothing to
/// research".
pub struct ResearchPlanner {
    llm: Arc<dyn CompletionClient>,
}

impl ResearchPlanner {
    pub fn new(llm: Arc<dyn CompletionClient>) -> Self {
        Self { llm }
    }

    pub async fn plan(&self, user_prompt: &str) -> ResearchPlan {
        match self.llm.complete(PLANNER_SYSTEM_PROMPT, user_prompt).await {
            Ok(raw) => match parse_plan_response(&raw) {
                Ok(plan) => plan,
                Err(err) => {
                    eprintln!("Planner returned an unusable plan shape: {}", err);
                    ResearchPlan::empty()
                }
            },
            Err(err) => {
                eprintln!("Planner completion failed: {}", err);
                ResearchPlan::empty()
            }
        }
    }
}

/// Parses the planner's raw response text into a plan, tolerating markdown
/// code-fence wrapping around the JSON object.
pub(crate) fn parse_plan_response(raw: &str) -> Result<ResearchPlan, serde_json::Error> {
    let stripped = strip_code_fences(raw);
    let parsed: RawPlan = serde_json::from_str(stripped)?;

    Ok(ResearchPlan {
        destination: parsed.destination.trim().to_string(),
        travel_dates: parsed.travel_dates.trim().to_string(),
        num_travelers: parsed.num_travelers.max(1),
        features: parsed.features,
        research_topics: parsed
            .research_topics
            .into_iter()
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .collect(),
    })
}

fn strip_code_fences(text: &str) -> &str {
    let trimmed = text.trim();
    let trimmed = trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .unwrap_or(trimmed);
    trimmed.strip_suffix("```").unwrap_or(trimmed).trim()
}
