//! Answers events and host action decoding.
//!
//! # Responsibility
//! - Define the closed set of events the transition dispatcher understands.
//! - Decode host action objects (`{"type": ..., ...}`) into typed events.
//!
//! # Invariants
//! - A known action type with a malformed payload is rejected at decode time.
//! - An unknown action type decodes to `AnswersEvent::Unrecognized`, never an error.

use crate::model::document::AnswersDocument;
use crate::model::template::QuestionnaireTemplate;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Action type for structural seeding from a loaded questionnaire.
pub const ACTION_CREATE_STRUCTURE: &str = "CREATE_ANSWERS_OBJECT";
/// Action type for restoring a cached snapshot.
pub const ACTION_RESTORE_FROM_CACHE: &str = "SYNC_LOCAL_STORAGE";
/// Action type for a successful remote fetch.
pub const ACTION_FETCH_SUCCESS: &str = "GET_ANSWERS_SUCCESS";
/// Action type for a successful remote submit.
pub const ACTION_SUBMIT_SUCCESS: &str = "POST_ANSWERS_SUCCESS";
/// Action type for a single answer edit.
pub const ACTION_UPDATE_ANSWER: &str = "UPDATE_ANSWERS";
/// Action type for a respondent identity edit.
pub const ACTION_UPDATE_PII: &str = "UPDATE_PII";

/// Respondent identity field targeted by `AnswersEvent::UpdatePii`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PiiField {
    Name,
    Email,
}

impl PiiField {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
        }
    }
}

/// One input to the answers transition dispatcher.
#[derive(Debug, Clone, PartialEq)]
pub enum AnswersEvent {
    /// Seed an empty document from a questionnaire template.
    CreateStructure(QuestionnaireTemplate),
    /// Replace the document with a cached snapshot and mark the state synced.
    RestoreFromCache(AnswersDocument),
    /// Replace the document with a freshly fetched remote document.
    FetchSuccess(AnswersDocument),
    /// Remote submit succeeded.
    SubmitSuccess,
    /// Set one answer slot.
    UpdateAnswer {
        section_index: usize,
        answers_index: usize,
        value: String,
    },
    /// Set the respondent name or email.
    UpdatePii { field: PiiField, value: String },
    /// Any action this core does not handle. Always a no-op.
    Unrecognized { kind: String },
}

impl AnswersEvent {
    /// Convenience constructor for `UpdateAnswer`.
    pub fn update_answer(
        section_index: usize,
        answers_index: usize,
        value: impl Into<String>,
    ) -> Self {
        Self::UpdateAnswer {
            section_index,
            answers_index,
            value: value.into(),
        }
    }

    /// Convenience constructor for `UpdatePii`.
    pub fn update_pii(field: PiiField, value: impl Into<String>) -> Self {
        Self::UpdatePii {
            field,
            value: value.into(),
        }
    }

    /// Short stable name used in log lines.
    pub fn kind(&self) -> &str {
        match self {
            Self::CreateStructure(_) => "create_structure",
            Self::RestoreFromCache(_) => "restore_from_cache",
            Self::FetchSuccess(_) => "fetch_success",
            Self::SubmitSuccess => "submit_success",
            Self::UpdateAnswer { .. } => "update_answer",
            Self::UpdatePii { .. } => "update_pii",
            Self::Unrecognized { kind } => kind.as_str(),
        }
    }

    /// Decodes a host action object into a typed event.
    ///
    /// # Errors
    /// - `MissingType` when `type` is absent or not a string.
    /// - `InvalidPayload` when a known action type carries a malformed payload.
    pub fn from_action(action: Value) -> Result<Self, EventError> {
        let kind = action
            .get("type")
            .and_then(Value::as_str)
            .ok_or(EventError::MissingType)?
            .to_string();

        match kind.as_str() {
            ACTION_CREATE_STRUCTURE => {
                let action: CreateStructureAction = decode_payload(&kind, action)?;
                Ok(Self::CreateStructure(action.data.questions))
            }
            ACTION_RESTORE_FROM_CACHE => {
                let action: RestoreFromCacheAction = decode_payload(&kind, action)?;
                Ok(Self::RestoreFromCache(action.data.data))
            }
            ACTION_FETCH_SUCCESS => {
                let action: FetchSuccessAction = decode_payload(&kind, action)?;
                Ok(Self::FetchSuccess(action.data.answers))
            }
            ACTION_SUBMIT_SUCCESS => Ok(Self::SubmitSuccess),
            ACTION_UPDATE_ANSWER => {
                let action: UpdateAnswerAction = decode_payload(&kind, action)?;
                Ok(Self::UpdateAnswer {
                    section_index: action.section_index,
                    answers_index: action.answers_index,
                    value: action.value,
                })
            }
            ACTION_UPDATE_PII => {
                let action: UpdatePiiAction = decode_payload(&kind, action)?;
                Ok(Self::UpdatePii {
                    field: action.pii_type,
                    value: action.value,
                })
            }
            _ => Ok(Self::Unrecognized { kind }),
        }
    }
}

/// Host action decoding errors.
#[derive(Debug)]
pub enum EventError {
    /// The action has no string `type` field.
    MissingType,
    /// A known action type carried a payload that does not match its schema.
    InvalidPayload {
        kind: String,
        source: serde_json::Error,
    },
}

impl Display for EventError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingType => write!(f, "action has no string `type` field"),
            Self::InvalidPayload { kind, source } => {
                write!(f, "invalid payload for action `{kind}`: {source}")
            }
        }
    }
}

impl Error for EventError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::MissingType => None,
            Self::InvalidPayload { source, .. } => Some(source),
        }
    }
}

fn decode_payload<T: DeserializeOwned>(kind: &str, action: Value) -> Result<T, EventError> {
    serde_json::from_value(action).map_err(|source| EventError::InvalidPayload {
        kind: kind.to_string(),
        source,
    })
}

#[derive(Deserialize)]
struct CreateStructureAction {
    data: CreateStructureData,
}

#[derive(Deserialize)]
struct CreateStructureData {
    questions: QuestionnaireTemplate,
}

#[derive(Deserialize)]
struct RestoreFromCacheAction {
    data: CachedEnvelope,
}

/// Cached state envelope: the host persists `{ "data": <document>, ... }`.
#[derive(Deserialize)]
struct CachedEnvelope {
    data: AnswersDocument,
}

#[derive(Deserialize)]
struct FetchSuccessAction {
    data: FetchSuccessData,
}

#[derive(Deserialize)]
struct FetchSuccessData {
    answers: AnswersDocument,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct UpdateAnswerAction {
    section_index: usize,
    answers_index: usize,
    value: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct UpdatePiiAction {
    pii_type: PiiField,
    value: String,
}
