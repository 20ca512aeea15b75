use std::sync::Arc;

use crate::models::research::ResearchBundle;
use crate::services::gemini_service::{CompletionClient, LlmError};

const SYNTHESIZER_SYSTEM_PROMPT: &str = "\
You are an expert travel itinerary planner for Journey AI. You will be given \
pre-researched material grouped into delimited sections. Synthesize it into \
one cohesive, day-by-day travel itinerary in well-formatted Markdown with \
headings, bold text and lists. Present flight options and hotel options as \
their own distinct sections. Weave any video links into the daily plan \
sections they are most relevant to, keeping their markdown intact. If a \
section says research was unavailable, acknowledge that gap clearly and \
gracefully instead of inventing data. Do not add conversational fluff.";

/// One completion call that turns the aggregated research bundle into the
/// final itinerary document. Not retried: with no partial document worth
/// returning, a failure here fails the whole request.
pub struct ItinerarySynthesizer {
    llm: Arc<dyn CompletionClient>,
}

impl ItinerarySynthesizer {
    pub fn new(llm: Arc<dyn CompletionClient>) -> Self {
        Self { llm }
    }

    pub async fn synthesize(&self, bundle: &ResearchBundle) -> Result<String, LlmError> {
        let prompt = build_synthesis_prompt(bundle);
        self.llm.complete(SYNTHESIZER_SYSTEM_PROMPT, &prompt).await
    }
}

/// Serializes the bundle into one prompt with clearly delimited per-category
/// sections.
pub(crate) fn build_synthesis_prompt(bundle: &ResearchBundle) -> String {
    let mut prompt = String::from(
        "Here is the raw research I have gathered. Please synthesize it into a final travel plan:\n\n",
    );

    for section in &bundle.sections {
        let title = section.category.section_title().to_uppercase();
        prompt.push_str(&format!("--- {} ---\n", title));
        for entry in &section.entries {
            prompt.push_str(entry);
            prompt.push('\n');
        }
        prompt.push_str(&format!("--- END {} ---\n\n", title));
    }

    prompt.trim_end().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::research::{BundleSection, TaskCategory};
    use crate::services::aggregator::RESEARCH_UNAVAILABLE;

    #[test]
    fn prompt_delimits_each_section_by_title() {
        let bundle = ResearchBundle {
            sections: vec![
                BundleSection {
                    category: TaskCategory::Hotel,
                    entries: vec!["three hotels".to_string()],
                },
                BundleSection {
                    category: TaskCategory::Generic,
                    entries: vec!["tascas".to_string(), RESEARCH_UNAVAILABLE.to_string()],
                },
            ],
        };

        let prompt = build_synthesis_prompt(&bundle);
        assert!(prompt.contains("--- HOTEL OPTIONS ---"));
        assert!(prompt.contains("--- END HOTEL OPTIONS ---"));
        assert!(prompt.contains("--- GENERAL TRAVEL RESEARCH ---"));
        assert!(prompt.contains("three hotels"));
        assert!(prompt.contains(RESEARCH_UNAVAILABLE));
        // Section order in the prompt follows bundle order.
        let hotels = prompt.find("--- HOTEL OPTIONS ---").unwrap();
        let generic = prompt.find("--- GENERAL TRAVEL RESEARCH ---").unwrap();
        assert!(hotels < generic);
    }
}
