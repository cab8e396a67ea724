//! Document skeleton builder.

use crate::model::document::{AnswersDocument, Section};
use crate::model::template::QuestionnaireTemplate;
use std::sync::Arc;

/// Builds an empty answers document with the template's cardinality.
///
/// # Contract
/// - `questionnaire_id` is the template id.
/// - `id`, `submitted_at` and the respondent fields are empty.
/// - Section `i` holds exactly `template.sections[i].questions.len()` empty slots.
pub fn build_document(template: &QuestionnaireTemplate) -> AnswersDocument {
    let sections = template
        .sections
        .iter()
        .map(|section| Arc::new(Section::with_empty_slots(section.questions.len())))
        .collect();

    AnswersDocument {
        questionnaire_id: template.id.clone(),
        sections,
        ..AnswersDocument::default()
    }
}
