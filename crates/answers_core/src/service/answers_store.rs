//! Single-owner answers store.
//!
//! # Responsibility
//! - Hold the canonical `Arc<AnswersState>` and replace it per dispatched event.
//! - Decode host actions, restore from and persist to a snapshot repository.
//! - Emit metadata-only dispatch logs.
//!
//! # Invariants
//! - Events are applied in call order; `&mut self` serializes dispatch.
//! - A failed transition leaves the canonical state untouched.
//! - Answer values and respondent fields never appear in log lines.

use crate::logging::sanitize_message;
use crate::repo::snapshot_repo::{RepoError, SnapshotRepository};
use crate::state::event::{AnswersEvent, EventError};
use crate::state::transition::{transition, TransitionError};
use crate::state::AnswersState;
use log::{debug, error, info};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::Arc;

const MAX_LOGGED_KIND_CHARS: usize = 64;

/// Store-level error for decode, transition and persistence failures.
#[derive(Debug)]
pub enum StoreError {
    Event(EventError),
    Transition(TransitionError),
    Repo(RepoError),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Event(err) => write!(f, "{err}"),
            Self::Transition(err) => write!(f, "{err}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Event(err) => Some(err),
            Self::Transition(err) => Some(err),
            Self::Repo(err) => Some(err),
        }
    }
}

impl From<EventError> for StoreError {
    fn from(value: EventError) -> Self {
        Self::Event(value)
    }
}

impl From<TransitionError> for StoreError {
    fn from(value: TransitionError) -> Self {
        Self::Transition(value)
    }
}

impl From<RepoError> for StoreError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// Owner of the canonical answers state.
#[derive(Debug, Clone, Default)]
pub struct AnswersStore {
    state: Arc<AnswersState>,
}

impl AnswersStore {
    /// Creates a store holding the empty initial state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store from an existing state value.
    pub fn with_state(state: Arc<AnswersState>) -> Self {
        Self { state }
    }

    /// Returns the current canonical state.
    pub fn state(&self) -> &Arc<AnswersState> {
        &self.state
    }

    /// Applies one event and returns whether the canonical reference changed.
    ///
    /// # Errors
    /// Propagates `TransitionError` unchanged; the state is not replaced.
    pub fn dispatch(&mut self, event: &AnswersEvent) -> Result<bool, TransitionError> {
        match transition(&self.state, event) {
            Ok(next) => {
                let changed = !Arc::ptr_eq(&self.state, &next);
                debug!(
                    "event=answers_dispatch module=store status={} {} sections={} answers_status={}",
                    if changed { "ok" } else { "skip" },
                    event_log_fields(event),
                    next.data.sections.len(),
                    next.status.map_or("unset", |status| status.as_str())
                );
                self.state = next;
                Ok(changed)
            }
            Err(err) => {
                error!(
                    "event=answers_dispatch module=store status=error {} error={}",
                    event_log_fields(event),
                    err
                );
                Err(err)
            }
        }
    }

    /// Decodes a host action object and dispatches it.
    pub fn dispatch_action(&mut self, action: serde_json::Value) -> Result<bool, StoreError> {
        let event = AnswersEvent::from_action(action)?;
        Ok(self.dispatch(&event)?)
    }

    /// Restores the cached snapshot for `questionnaire_id`, when one exists.
    ///
    /// Returns `Ok(false)` when no snapshot is stored; the state is then untouched
    /// and later structural seeding still applies.
    pub fn restore_from<R: SnapshotRepository>(
        &mut self,
        repo: &R,
        questionnaire_id: &str,
    ) -> Result<bool, StoreError> {
        let Some(document) = repo.load_snapshot(questionnaire_id)? else {
            info!("event=answers_restore module=store status=skip reason=no_snapshot");
            return Ok(false);
        };

        self.dispatch(&AnswersEvent::RestoreFromCache(document))?;
        info!(
            "event=answers_restore module=store status=ok sections={}",
            self.state.data.sections.len()
        );
        Ok(true)
    }

    /// Writes the current document to `repo`.
    pub fn persist_to<R: SnapshotRepository>(&self, repo: &R) -> Result<(), StoreError> {
        repo.save_snapshot(&self.state.data)?;
        Ok(())
    }
}

/// Metadata-only `key=value` fields describing `event` for dispatch log lines.
///
/// Host-supplied action types are sanitized; answer and respondent values are
/// never included.
fn event_log_fields(event: &AnswersEvent) -> String {
    match event {
        AnswersEvent::UpdateAnswer {
            section_index,
            answers_index,
            ..
        } => format!(
            "kind={} section_index={section_index} answers_index={answers_index}",
            event.kind()
        ),
        AnswersEvent::UpdatePii { field, .. } => {
            format!("kind={} field={}", event.kind(), field.as_str())
        }
        AnswersEvent::Unrecognized { kind } => format!(
            "kind=unrecognized action_type={}",
            sanitize_message(kind, MAX_LOGGED_KIND_CHARS).replace(' ', "_")
        ),
        _ => format!("kind={}", event.kind()),
    }
}

#[cfg(test)]
mod tests {
    use super::{event_log_fields, AnswersStore, StoreError};
    use crate::state::event::{AnswersEvent, PiiField};
    use serde_json::json;

    #[test]
    fn unrecognized_dispatch_reports_unchanged() {
        let mut store = AnswersStore::new();
        let changed = store
            .dispatch(&AnswersEvent::Unrecognized {
                kind: "ROUTE_CHANGED".to_string(),
            })
            .expect("no-op dispatch");
        assert!(!changed);
    }

    #[test]
    fn malformed_action_is_an_event_error() {
        let mut store = AnswersStore::new();
        let err = store
            .dispatch_action(json!({ "type": "UPDATE_ANSWERS", "value": "x" }))
            .unwrap_err();
        assert!(matches!(err, StoreError::Event(_)));
    }

    #[test]
    fn out_of_range_action_is_a_transition_error() {
        let mut store = AnswersStore::new();
        let before = store.state().clone();
        let err = store
            .dispatch_action(json!({
                "type": "UPDATE_ANSWERS",
                "sectionIndex": 0,
                "answersIndex": 0,
                "value": "x"
            }))
            .unwrap_err();
        assert!(matches!(err, StoreError::Transition(_)));
        assert!(std::sync::Arc::ptr_eq(&before, store.state()));
    }

    #[test]
    fn log_fields_carry_pii_field_but_not_value() {
        let fields =
            event_log_fields(&AnswersEvent::update_pii(PiiField::Email, "ada@example.com"));
        assert_eq!(fields, "kind=update_pii field=email");

        let fields = event_log_fields(&AnswersEvent::update_answer(1, 2, "secret"));
        assert_eq!(fields, "kind=update_answer section_index=1 answers_index=2");
    }

    #[test]
    fn log_fields_sanitize_foreign_action_types() {
        let fields = event_log_fields(&AnswersEvent::Unrecognized {
            kind: format!("EVIL\nevent=forged {}", "X".repeat(200)),
        });
        assert!(!fields.contains('\n'));
        assert!(!fields.contains(" event=forged"));
        assert!(fields.starts_with("kind=unrecognized action_type=EVIL_event=forged_"));
        assert!(fields.ends_with("..."));
        assert!(fields.len() < 120);
    }
}
