//! Answers document model.
//!
//! # Responsibility
//! - Define the respondent's answer set for one questionnaire.
//! - Keep the persisted/remote field naming (`by`, `at`, `for`) at the serde
//!   boundary while exposing descriptive Rust names.
//!
//! # Invariants
//! - `sections` mirrors the template section order and length.
//! - `sections[i].answers` mirrors the question count of template section `i`.
//! - Sections are shared behind `Arc` so edits copy only the touched section.

use crate::model::template::QuestionnaireTemplate;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Respondent identity fields edited through PII updates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Respondent {
    pub name: String,
    pub email: String,
}

/// One answer slot, matching a single template question.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnswerSlot {
    /// Free-form answer text. Empty until edited.
    pub answer: String,
}

impl AnswerSlot {
    pub fn empty() -> Self {
        Self::default()
    }
}

/// Answers for one template section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Section {
    pub answers: Vec<AnswerSlot>,
}

impl Section {
    /// Creates a section with `slot_count` empty answers.
    pub fn with_empty_slots(slot_count: usize) -> Self {
        Self {
            answers: vec![AnswerSlot::empty(); slot_count],
        }
    }
}

/// A respondent's in-progress or submitted answer set.
///
/// Serialized with the field names used by cached snapshots and the remote
/// service, so both decode without an intermediate shape.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnswersDocument {
    /// Server-assigned id. Empty until the remote side assigns one.
    pub id: String,
    #[serde(rename = "by")]
    pub respondent: Respondent,
    /// Opaque submission timestamp.
    #[serde(rename = "at")]
    pub submitted_at: String,
    /// Id of the questionnaire template this document answers.
    #[serde(rename = "for")]
    pub questionnaire_id: String,
    pub sections: Vec<Arc<Section>>,
}

impl AnswersDocument {
    /// Returns the answer text at `(section_index, answers_index)`, if present.
    pub fn answer(&self, section_index: usize, answers_index: usize) -> Option<&str> {
        self.sections
            .get(section_index)?
            .answers
            .get(answers_index)
            .map(|slot| slot.answer.as_str())
    }

    /// Returns per-section slot counts in order.
    pub fn shape(&self) -> Vec<usize> {
        self.sections
            .iter()
            .map(|section| section.answers.len())
            .collect()
    }

    /// Returns whether this document has the same cardinality as `template`.
    ///
    /// Restoration never calls this; hosts can use it to vet a cached payload
    /// before dispatching it.
    pub fn matches_template(&self, template: &QuestionnaireTemplate) -> bool {
        self.shape() == template.shape()
    }
}
