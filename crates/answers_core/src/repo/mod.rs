//! Repository layer for cached answer snapshots.
//!
//! # Responsibility
//! - Define the snapshot persistence contract used by hosts and `AnswersStore`.
//! - Isolate SQLite details from the state machine.
//!
//! # Invariants
//! - Snapshots are keyed by questionnaire id; one snapshot per questionnaire.
//! - Read paths reject undecodable payloads but do not validate cardinality.

pub mod snapshot_repo;
