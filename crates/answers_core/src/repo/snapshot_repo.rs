//! Answer snapshot repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Persist the cached answers envelope (`{"data": <document>}`) per questionnaire.
//! - Load it back for `RestoreFromCache`.
//!
//! # Invariants
//! - Writes replace any previous snapshot for the same questionnaire.
//! - An empty questionnaire id is never written or queried.
//! - Payloads that fail to decode surface as `RepoError::InvalidData`.

use crate::db::DbError;
use crate::model::document::AnswersDocument;
use log::{info, warn};
use rusqlite::{params, Connection, OptionalExtension};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::{SystemTime, UNIX_EPOCH};

pub type RepoResult<T> = Result<T, RepoError>;

/// Snapshot persistence and query errors.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    EmptyQuestionnaireId,
    Encode(serde_json::Error),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::EmptyQuestionnaireId => write!(f, "questionnaire id cannot be empty"),
            Self::Encode(err) => write!(f, "failed to encode answers snapshot: {err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted snapshot: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Encode(err) => Some(err),
            Self::EmptyQuestionnaireId | Self::InvalidData(_) => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Repository interface for cached answer snapshots.
pub trait SnapshotRepository {
    /// Stores `document` under its `questionnaire_id`, replacing any previous one.
    fn save_snapshot(&self, document: &AnswersDocument) -> RepoResult<()>;
    /// Loads the snapshot for `questionnaire_id`, if one exists.
    fn load_snapshot(&self, questionnaire_id: &str) -> RepoResult<Option<AnswersDocument>>;
    /// Deletes the snapshot for `questionnaire_id`. Returns whether one existed.
    fn delete_snapshot(&self, questionnaire_id: &str) -> RepoResult<bool>;
}

/// Cached envelope shape written to storage.
#[derive(Serialize, Deserialize)]
struct CachedAnswers {
    data: AnswersDocument,
}

/// SQLite-backed snapshot repository.
pub struct SqliteSnapshotRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteSnapshotRepository<'conn> {
    /// Wraps a connection opened via `db::open_db` or `db::open_db_in_memory`.
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl SnapshotRepository for SqliteSnapshotRepository<'_> {
    fn save_snapshot(&self, document: &AnswersDocument) -> RepoResult<()> {
        let questionnaire_id = normalize_questionnaire_id(&document.questionnaire_id)?;
        let payload = serde_json::to_string(&CachedAnswers {
            data: document.clone(),
        })
        .map_err(RepoError::Encode)?;

        self.conn.execute(
            "INSERT INTO answer_snapshots (questionnaire_id, payload, saved_at)
             VALUES (?1, ?2, ?3)
             ON CONFLICT(questionnaire_id) DO UPDATE SET
                payload = excluded.payload,
                saved_at = excluded.saved_at;",
            params![questionnaire_id, payload, now_epoch_ms()],
        )?;

        info!(
            "event=snapshot_save module=repo status=ok sections={} payload_bytes={}",
            document.sections.len(),
            payload.len()
        );
        Ok(())
    }

    fn load_snapshot(&self, questionnaire_id: &str) -> RepoResult<Option<AnswersDocument>> {
        let questionnaire_id = normalize_questionnaire_id(questionnaire_id)?;
        let payload = self
            .conn
            .query_row(
                "SELECT payload FROM answer_snapshots WHERE questionnaire_id = ?1;",
                params![questionnaire_id],
                |row| row.get::<_, String>(0),
            )
            .optional()?;

        let Some(payload) = payload else {
            return Ok(None);
        };

        match serde_json::from_str::<CachedAnswers>(&payload) {
            Ok(cached) => Ok(Some(cached.data)),
            Err(err) => {
                warn!(
                    "event=snapshot_load module=repo status=error error_code=invalid_payload line={} column={}",
                    err.line(),
                    err.column()
                );
                Err(RepoError::InvalidData(err.to_string()))
            }
        }
    }

    fn delete_snapshot(&self, questionnaire_id: &str) -> RepoResult<bool> {
        let questionnaire_id = normalize_questionnaire_id(questionnaire_id)?;
        let removed = self.conn.execute(
            "DELETE FROM answer_snapshots WHERE questionnaire_id = ?1;",
            params![questionnaire_id],
        )?;
        Ok(removed > 0)
    }
}

fn normalize_questionnaire_id(value: &str) -> RepoResult<&str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(RepoError::EmptyQuestionnaireId);
    }
    Ok(trimmed)
}

fn now_epoch_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |elapsed| elapsed.as_millis() as i64)
}
