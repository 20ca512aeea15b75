use std::sync::Arc;
use std::time::Duration;

use futures::future::join_all;
use serde_json::json;

use crate::models::research::{
    CompletedTask, ResearchPlan, ResearchTask, TaskCategory, TaskOutcome,
};
use crate::tools::ToolInvoker;

const MAX_ATTEMPTS: u32 = 2;
const RETRY_DELAY: Duration = Duration::from_secs(1);

/// Origin used for flight queries when the user never said where they are
/// leaving from.
pub const DEFAULT_ORIGIN: &str = "the user's current location";

pub fn flight_search_query(origin: &str, destination: &str, dates: &str) -> String {
    format!(
        "Example round-trip flight prices and options from {} to {} for {} on Google Flights",
        origin, destination, dates
    )
}

pub fn hotel_search_query(destination: &str, dates: &str, guests: u32) -> String {
    format!(
        "Find top 3 hotel options with prices and review scores in {} for {} guests for dates {} on Booking.com",
        destination, guests, dates
    )
}

/// Runs every task of a plan concurrently against the tool gateway, with a
/// bounded retry per task. One task exhausting its retries never cancels or
/// affects its siblings; the batch always returns one outcome per task,
/// explicitly paired with the originating task.
pub struct TaskExecutor {
    tools: Arc<dyn ToolInvoker>,
}

impl TaskExecutor {
    pub fn new(tools: Arc<dyn ToolInvoker>) -> Self {
        Self { tools }
    }

    /// Builds the task list in fixed feature order (flights, hotels, videos)
    /// followed by one generic task per research topic.
    pub fn build_tasks(plan: &ResearchPlan) -> Vec<ResearchTask> {
        let mut tasks = Vec::new();
        let dates = if plan.travel_dates.is_empty() {
            "flexible dates"
        } else {
            plan.travel_dates.as_str()
        };

        if plan.features.flights {
            tasks.push(ResearchTask::new(
                TaskCategory::Flight,
                flight_search_query(DEFAULT_ORIGIN, &plan.destination, dates),
            ));
        }
        if plan.features.hotels {
            tasks.push(ResearchTask::new(
                TaskCategory::Hotel,
                hotel_search_query(&plan.destination, dates, plan.num_travelers),
            ));
        }
        if plan.features.youtube {
            tasks.push(ResearchTask::new(
                TaskCategory::Video,
                plan.destination.clone(),
            ));
        }
        for topic in &plan.research_topics {
            tasks.push(ResearchTask::new(TaskCategory::Generic, topic.clone()));
        }
        tasks
    }

    pub async fn execute(&self, plan: &ResearchPlan) -> Vec<CompletedTask> {
        let tasks = Self::build_tasks(plan);
        if tasks.is_empty() {
            return Vec::new();
        }

        println!("Executing {} research tasks concurrently", tasks.len());

        let destination_known = !plan.destination.trim().is_empty();
        let futures: Vec<_> = tasks
            .into_iter()
            .map(|task| {
                let tools = self.tools.clone();
                async move {
                    // A feature task without a destination would only feed
                    // garbage arguments to a tool; fail it up front.
                    let outcome = if task.category != TaskCategory::Generic && !destination_known {
                        TaskOutcome::Failed(format!(
                            "no destination identified for {} research",
                            task.category.section_title().to_lowercase()
                        ))
                    } else {
                        run_with_retry(tools.as_ref(), &task).await
                    };
                    CompletedTask { task, outcome }
                }
            })
            .collect();

        join_all(futures).await
    }
}

async fn run_with_retry(tools: &dyn ToolInvoker, task: &ResearchTask) -> TaskOutcome {
    let mut last_error = String::new();

    for attempt in 1..=MAX_ATTEMPTS {
        match invoke_task(tools, task).await {
            Ok(text) => return TaskOutcome::Succeeded(text),
            Err(err) => {
                eprintln!(
                    "Research task '{}' attempt {}/{} failed: {}",
                    task.query, attempt, MAX_ATTEMPTS, err
                );
                last_error = err.to_string();
                if attempt < MAX_ATTEMPTS {
                    tokio::time::sleep(RETRY_DELAY).await;
                }
            }
        }
    }

    TaskOutcome::Failed(last_error)
}

async fn invoke_task(
    tools: &dyn ToolInvoker,
    task: &ResearchTask,
) -> Result<String, crate::tools::ToolError> {
    match task.category {
        TaskCategory::Video => {
            tools
                .invoke("find_video", json!({ "topic": task.query }))
                .await
        }
        _ => tools.invoke("search", json!({ "query": task.query })).await,
    }
}
