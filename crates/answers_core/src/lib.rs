//! Answers state core.
//!
//! Keeps a respondent's questionnaire answers consistent across structural
//! seeding, cache restoration, remote replacement and interactive edits.
//! `state::transition::transition` is the single source of truth for how an
//! event changes the state.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod state;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::document::{AnswerSlot, AnswersDocument, Respondent, Section};
pub use model::template::{QuestionnaireTemplate, TemplateSection};
pub use repo::snapshot_repo::{RepoError, RepoResult, SnapshotRepository, SqliteSnapshotRepository};
pub use service::answers_store::{AnswersStore, StoreError};
pub use state::builder::build_document;
pub use state::event::{AnswersEvent, EventError, PiiField};
pub use state::snapshot::produce;
pub use state::status::AnswersStatus;
pub use state::transition::{transition, TransitionError, TransitionResult};
pub use state::AnswersState;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
