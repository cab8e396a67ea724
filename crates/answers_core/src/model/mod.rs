//! Answers domain model.
//!
//! # Responsibility
//! - Define the answers document and the questionnaire template shape.
//! - Keep serde naming compatible with cached and remote documents.
//!
//! # Invariants
//! - A document's section/slot cardinality mirrors the template it was built
//!   from or the document that replaced it.

pub mod document;
pub mod template;
