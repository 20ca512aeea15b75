use crate::models::research::{
    BundleSection, CompletedTask, ResearchBundle, TaskCategory, TaskOutcome,
};

/// Stands in for every failed task so the synthesizer sees an explicit gap
/// instead of silently missing data.
pub const RESEARCH_UNAVAILABLE: &str = "Research unavailable for this topic.";

/// Merges terminal task outcomes into a category-grouped bundle. Categories
/// appear in fixed feature order (flights, hotels, videos, generic) and only
/// when they had at least one task; within a category, entries keep task
/// order.
pub fn aggregate(outcomes: &[CompletedTask]) -> ResearchBundle {
    let mut sections = Vec::new();

    for category in TaskCategory::ORDERED {
        let entries: Vec<String> = outcomes
            .iter()
            .filter(|completed| completed.task.category == category)
            .map(|completed| match &completed.outcome {
                TaskOutcome::Succeeded(text) => text.clone(),
                TaskOutcome::Failed(_) => RESEARCH_UNAVAILABLE.to_string(),
            })
            .collect();

        if !entries.is_empty() {
            sections.push(BundleSection { category, entries });
        }
    }

    ResearchBundle { sections }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::research::ResearchTask;

    fn completed(category: TaskCategory, query: &str, outcome: TaskOutcome) -> CompletedTask {
        CompletedTask {
            task: ResearchTask::new(category, query),
            outcome,
        }
    }

    #[test]
    fn groups_by_category_in_feature_order() {
        // Input deliberately out of order to mimic arbitrary completion.
        let outcomes = vec![
            completed(
                TaskCategory::Generic,
                "food in Lisbon",
                TaskOutcome::Succeeded("tascas".to_string()),
            ),
            completed(
                TaskCategory::Hotel,
                "hotels in Lisbon",
                TaskOutcome::Succeeded("three hotels".to_string()),
            ),
            completed(
                TaskCategory::Video,
                "Lisbon",
                TaskOutcome::Succeeded("two vlogs".to_string()),
            ),
        ];

        let bundle = aggregate(&outcomes);
        let order: Vec<TaskCategory> = bundle.sections.iter().map(|s| s.category).collect();
        assert_eq!(
            order,
            vec![TaskCategory::Hotel, TaskCategory::Video, TaskCategory::Generic]
        );
    }

    #[test]
    fn failed_outcomes_become_the_placeholder_not_an_omission() {
        let outcomes = vec![
            completed(
                TaskCategory::Flight,
                "flights to Lisbon",
                TaskOutcome::Failed("upstream error".to_string()),
            ),
            completed(
                TaskCategory::Generic,
                "food in Lisbon",
                TaskOutcome::Succeeded("tascas".to_string()),
            ),
        ];

        let bundle = aggregate(&outcomes);
        assert_eq!(bundle.sections.len(), 2);
        assert_eq!(bundle.sections[0].category, TaskCategory::Flight);
        assert_eq!(bundle.sections[0].entries, vec![RESEARCH_UNAVAILABLE]);
    }

    #[test]
    fn all_succeeded_round_trip_has_no_placeholder() {
        let outcomes = vec![
            completed(
                TaskCategory::Generic,
                "food in Lisbon",
                TaskOutcome::Succeeded("tascas".to_string()),
            ),
            completed(
                TaskCategory::Generic,
                "history in Lisbon",
                TaskOutcome::Succeeded("castles".to_string()),
            ),
        ];

        let bundle = aggregate(&outcomes);
        assert_eq!(bundle.sections.len(), 1);
        assert_eq!(bundle.sections[0].entries, vec!["tascas", "castles"]);
        assert!(bundle
            .sections
            .iter()
            .flat_map(|s| s.entries.iter())
            .all(|entry| entry != RESEARCH_UNAVAILABLE));
    }

    #[test]
    fn empty_outcomes_produce_an_empty_bundle() {
        assert!(aggregate(&[]).is_empty());
    }
}
