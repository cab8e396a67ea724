//! Host-facing answers services.
//!
//! # Responsibility
//! - Own the canonical answers state on behalf of the host.
//! - Bridge the pure transition function to decoding, persistence and logging.

pub mod answers_store;
