//! Answers transition dispatcher.
//!
//! # Responsibility
//! - Map `(state, event)` to the next state using exactly one rule per event.
//! - Apply the status demotion rule inline on content edits.
//!
//! # Invariants
//! - Pure and synchronous: no I/O, no logging, no interior mutation.
//! - No-op rules return the input `Arc` itself (`Arc::ptr_eq` holds). Rules
//!   whose writes would leave every field equal count as no-ops.
//! - A failing rule returns an error and leaves the input state as the only
//!   live state; there is no partial application.
//! - Seeding is suppressed once `local_storage_synced` is true.

use crate::model::document::AnswersDocument;
use crate::state::builder::build_document;
use crate::state::event::{AnswersEvent, PiiField};
use crate::state::snapshot::produce;
use crate::state::status::AnswersStatus;
use crate::state::AnswersState;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::Arc;

pub type TransitionResult = Result<Arc<AnswersState>, TransitionError>;

/// Transition failures. The input state is never modified when one is returned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransitionError {
    /// `UpdateAnswer` addressed a slot the current document does not have.
    AnswerSlotOutOfRange {
        section_index: usize,
        answers_index: usize,
        section_count: usize,
        /// Slot count of the addressed section, `None` when the section itself is missing.
        slot_count: Option<usize>,
    },
}

impl Display for TransitionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AnswerSlotOutOfRange {
                section_index,
                answers_index,
                section_count,
                slot_count: Some(slot_count),
            } => write!(
                f,
                "answer slot [{section_index}][{answers_index}] out of range: section has {slot_count} slots ({section_count} sections)"
            ),
            Self::AnswerSlotOutOfRange {
                section_index,
                answers_index,
                section_count,
                slot_count: None,
            } => write!(
                f,
                "answer slot [{section_index}][{answers_index}] out of range: document has {section_count} sections"
            ),
        }
    }
}

impl Error for TransitionError {}

/// Applies one event to `state` and returns the next state.
///
/// # Errors
/// Returns `TransitionError::AnswerSlotOutOfRange` when `UpdateAnswer` targets a
/// slot that does not exist; the caller keeps `state` unchanged.
pub fn transition(state: &Arc<AnswersState>, event: &AnswersEvent) -> TransitionResult {
    match event {
        AnswersEvent::CreateStructure(template) => {
            if state.is_local_storage_synced() {
                return Ok(Arc::clone(state));
            }
            Ok(Arc::new(AnswersState::from_document(build_document(
                template,
            ))))
        }
        AnswersEvent::RestoreFromCache(document) => produce(state, |draft| {
            draft.data = Arc::new(document.clone());
            draft.local_storage_synced = Some(true);
            Ok(())
        }),
        AnswersEvent::FetchSuccess(document) => produce(state, |draft| {
            draft.data = Arc::new(document.clone());
            Ok(())
        }),
        AnswersEvent::SubmitSuccess => {
            if state.status == Some(AnswersStatus::Submitted) {
                return Ok(Arc::clone(state));
            }
            produce(state, |draft| {
                draft.status = Some(AnswersStatus::Submitted);
                Ok(())
            })
        }
        AnswersEvent::UpdateAnswer {
            section_index,
            answers_index,
            value,
        } => {
            let (section_index, answers_index) = (*section_index, *answers_index);
            check_slot(&state.data, section_index, answers_index)?;
            let current = &state.data.sections[section_index].answers[answers_index].answer;
            let value_changed = current != value;
            if !value_changed && !edit_changes_status(state) {
                return Ok(Arc::clone(state));
            }
            produce(state, |draft| {
                if value_changed {
                    let document = Arc::make_mut(&mut draft.data);
                    let section = Arc::make_mut(&mut document.sections[section_index]);
                    section.answers[answers_index].answer.clone_from(value);
                }
                draft.status = AnswersStatus::demote_on_edit(draft.status);
                Ok(())
            })
        }
        AnswersEvent::UpdatePii { field, value } => {
            let respondent = &state.data.respondent;
            let current = match field {
                PiiField::Name => &respondent.name,
                PiiField::Email => &respondent.email,
            };
            let value_changed = current != value;
            if !value_changed && !edit_changes_status(state) {
                return Ok(Arc::clone(state));
            }
            produce(state, |draft| {
                if value_changed {
                    let respondent = &mut Arc::make_mut(&mut draft.data).respondent;
                    match field {
                        PiiField::Name => respondent.name.clone_from(value),
                        PiiField::Email => respondent.email.clone_from(value),
                    }
                }
                draft.status = AnswersStatus::demote_on_edit(draft.status);
                Ok(())
            })
        }
        AnswersEvent::Unrecognized { .. } => Ok(Arc::clone(state)),
    }
}

fn edit_changes_status(state: &AnswersState) -> bool {
    AnswersStatus::demote_on_edit(state.status) != state.status
}

fn check_slot(
    document: &AnswersDocument,
    section_index: usize,
    answers_index: usize,
) -> Result<(), TransitionError> {
    let section_count = document.sections.len();
    let slot_count = document
        .sections
        .get(section_index)
        .map(|section| section.answers.len());

    match slot_count {
        Some(count) if answers_index < count => Ok(()),
        _ => Err(TransitionError::AnswerSlotOutOfRange {
            section_index,
            answers_index,
            section_count,
            slot_count,
        }),
    }
}
