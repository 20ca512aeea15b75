use serde::{Deserialize, Serialize};

/// Category of a single research task. Also drives the section ordering in
/// the aggregated bundle: flights, then hotels, then videos, then generic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskCategory {
    Flight,
    Hotel,
    Video,
    Generic,
}

impl TaskCategory {
    pub const ORDERED: [TaskCategory; 4] = [
        TaskCategory::Flight,
        TaskCategory::Hotel,
        TaskCategory::Video,
        TaskCategory::Generic,
    ];

    pub fn section_title(&self) -> &'static str {
        match self {
            TaskCategory::Flight => "Flight Options",
            TaskCategory::Hotel => "Hotel Options",
            TaskCategory::Video => "Recommended YouTube Vlogs",
            TaskCategory::Generic => "General Travel Research",
        }
    }
}

/// Which optional research features the user asked for.
///
/// This is the canonical shape: a mapping of booleans, so "considered but not
/// requested" is distinguishable from "absent". A planner response that
/// encodes features as a list of strings fails deserialization and collapses
/// to the empty plan.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct PlanFeatures {
    #[serde(default)]
    pub flights: bool,
    #[serde(default)]
    pub hotels: bool,
    #[serde(default)]
    pub youtube: bool,
}

/// Structured research plan produced once per request by the planner.
/// Never mutated after creation.
#[derive(Debug, Clone)]
pub struct ResearchPlan {
    pub destination: String,
    pub travel_dates: String,
    pub num_travelers: u32,
    pub features: PlanFeatures,
    pub research_topics: Vec<String>,
}

impl ResearchPlan {
    /// The designated fallback when planning fails: no features, no topics.
    pub fn empty() -> Self {
        Self {
            destination: String::new(),
            travel_dates: String::new(),
            num_travelers: 1,
            features: PlanFeatures::default(),
            research_topics: Vec::new(),
        }
    }

    /// True when the plan would schedule zero research tasks.
    pub fn has_no_tasks(&self) -> bool {
        !self.features.flights
            && !self.features.hotels
            && !self.features.youtube
            && self.research_topics.is_empty()
    }
}

/// One schedulable unit of research: a category plus the literal query or
/// topic string handed to the tool layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResearchTask {
    pub category: TaskCategory,
    pub query: String,
}

impl ResearchTask {
    pub fn new(category: TaskCategory, query: impl Into<String>) -> Self {
        Self {
            category,
            query: query.into(),
        }
    }
}

/// Terminal state of a research task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskOutcome {
    Succeeded(String),
    Failed(String),
}

impl TaskOutcome {
    pub fn is_failure(&self) -> bool {
        matches!(self, TaskOutcome::Failed(_))
    }
}

/// A task explicitly paired with its outcome. Completion order of the
/// concurrent batch never matters because attribution lives here, not in
/// positional correlation.
#[derive(Debug, Clone)]
pub struct CompletedTask {
    pub task: ResearchTask,
    pub outcome: TaskOutcome,
}

/// One category's worth of aggregated research.
#[derive(Debug, Clone)]
pub struct BundleSection {
    pub category: TaskCategory,
    pub entries: Vec<String>,
}

/// Aggregated research, grouped by category in feature order. Built once,
/// consumed once by the synthesizer.
#[derive(Debug, Clone, Default)]
pub struct ResearchBundle {
    pub sections: Vec<BundleSection>,
}

impl ResearchBundle {
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}
