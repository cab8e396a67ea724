//! Answers state machine.
//!
//! # Responsibility
//! - Own the top-level answers state shape.
//! - Build document skeletons from templates, decode events and apply
//!   transitions with structural sharing.
//!
//! # Invariants
//! - States are immutable once returned from `transition`.
//! - `status` moves unset -> submitted -> edited; only a submit success sets
//!   `submitted` again.
//! - `local_storage_synced` is never reset to `false` by any event.

pub mod builder;
pub mod event;
pub mod snapshot;
pub mod status;
pub mod transition;

use crate::model::document::AnswersDocument;
use serde::{Deserialize, Serialize};
use status::AnswersStatus;
use std::sync::Arc;

/// Top-level answers state, owned by the host and replaced per transition.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswersState {
    pub data: Arc<AnswersDocument>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<AnswersStatus>,
    /// Set once the document came from a cached snapshot.
    #[serde(
        rename = "localStorage",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub local_storage_synced: Option<bool>,
}

impl AnswersState {
    /// Creates a state holding `document` with no status and no sync flag.
    pub fn from_document(document: AnswersDocument) -> Self {
        Self {
            data: Arc::new(document),
            status: None,
            local_storage_synced: None,
        }
    }

    /// Returns whether structural seeding is suppressed for this lineage.
    pub fn is_local_storage_synced(&self) -> bool {
        self.local_storage_synced.unwrap_or(false)
    }
}
