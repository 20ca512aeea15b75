use std::error::Error;
use std::fmt;

use crate::models::chat::ChatRequest;
use crate::models::research::ResearchPlan;
use crate::services::aggregator::aggregate;
use crate::services::executor::TaskExecutor;
use crate::services::planner::ResearchPlanner;
use crate::services::synthesizer::ItinerarySynthesizer;
use crate::services::{calendar_service, email_service};
use crate::AppState;

#[derive(Debug)]
pub enum PipelineError {
    /// A required client was never initialized (missing credentials at
    /// startup).
    NotInitialized(&'static str),
    /// Planning produced zero schedulable tasks.
    NothingToResearch,
    /// The final synthesis call failed; there is no partial document.
    Synthesis(String),
}

impl fmt::Display for PipelineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PipelineError::NotInitialized(what) => {
                write!(
                    f,
                    "The {} is not initialized. Check the backend server logs.",
                    what
                )
            }
            PipelineError::NothingToResearch => write!(
                f,
                "I couldn't identify anything specific to research from that request. \
                 Try mentioning a destination, dates, or interests."
            ),
            PipelineError::Synthesis(msg) => {
                write!(f, "Failed to put the itinerary together: {}", msg)
            }
        }
    }
}

impl Error for PipelineError {}

/// Runs the full pipeline: plan, execute research concurrently, aggregate,
/// synthesize. Post-generation actions are dispatched detached; the returned
/// document never waits on them.
pub async fn generate_itinerary(
    state: &AppState,
    request: &ChatRequest,
    prompt: &str,
) -> Result<String, PipelineError> {
    let llm = state
        .llm
        .clone()
        .ok_or(PipelineError::NotInitialized("language model client"))?;

    println!("Stage 1: planning research");
    let plan = ResearchPlanner::new(llm.clone()).plan(prompt).await;

    println!("Stage 2: executing research");
    let outcomes = TaskExecutor::new(state.tools.clone()).execute(&plan).await;
    if outcomes.is_empty() {
        return Err(PipelineError::NothingToResearch);
    }

    println!("Stage 3: aggregating {} outcomes", outcomes.len());
    let bundle = aggregate(&outcomes);

    println!("Stage 4: synthesizing itinerary");
    let document = ItinerarySynthesizer::new(llm)
        .synthesize(&bundle)
        .await
        .map_err(|e| PipelineError::Synthesis(e.to_string()))?;

    dispatch_post_actions(state, request, &plan, &document);

    Ok(document)
}

/// Launches the optional post-generation side effects without awaiting them.
/// Each detached task owns its failures: they are logged and never surface
/// into the itinerary response.
pub fn dispatch_post_actions(
    state: &AppState,
    request: &ChatRequest,
    plan: &ResearchPlan,
    document: &str,
) {
    if let Some(email) = request.send_copy_to.clone().filter(|e| !e.trim().is_empty()) {
        println!("-> Scheduling itinerary email to {}", email);
        let tools = state.tools.clone();
        let document = document.to_string();
        tokio::spawn(async move {
            if let Err(err) = email_service::send_itinerary_email(&tools, &email, &document).await
            {
                eprintln!("Itinerary email to {} failed: {}", email, err);
            }
        });
    }

    if !request.calendar_attendees.is_empty() {
        println!(
            "-> Scheduling calendar event for {} attendees",
            request.calendar_attendees.len()
        );
        let tools = state.tools.clone();
        let attendees = request.calendar_attendees.clone();
        let title = calendar_service::trip_event_title(&plan.destination);
        let description = calendar_service::event_description(document);
        tokio::spawn(async move {
            let (start, end) = calendar_service::default_trip_window();
            if let Err(err) = calendar_service::add_event_to_calendar(
                &tools,
                &title,
                &start,
                &end,
                &description,
                &attendees,
            )
            .await
            {
                eprintln!("Calendar event '{}' failed: {}", title, err);
            }
        });
    }
}
