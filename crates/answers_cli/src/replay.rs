//! `replay` command: feeds recorded host actions through an `AnswersStore`.

use crate::cli::ReplayArgs;
use answers_core::db::open_db;
use answers_core::{AnswersStore, SqliteSnapshotRepository};
use anyhow::{Context, Result};
use log::info;
use std::fs;

/// Runs the replay and returns the final state rendered as pretty JSON.
pub fn run_replay(args: &ReplayArgs) -> Result<String> {
    let contents = fs::read_to_string(&args.actions)
        .with_context(|| format!("failed to read actions from {}", args.actions.display()))?;

    let conn = args
        .snapshot_db
        .as_ref()
        .map(|path| {
            open_db(path).with_context(|| format!("failed to open {}", path.display()))
        })
        .transpose()?;
    let repo = conn.as_ref().map(SqliteSnapshotRepository::new);

    let mut store = AnswersStore::new();
    if let (Some(repo), Some(questionnaire_id)) = (repo.as_ref(), args.questionnaire.as_deref()) {
        store
            .restore_from(repo, questionnaire_id)
            .context("failed to restore cached snapshot")?;
    }

    let mut dispatched = 0usize;
    for (index, line) in contents.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let action: serde_json::Value = serde_json::from_str(line)
            .with_context(|| format!("line {}: not a JSON object", index + 1))?;
        store
            .dispatch_action(action)
            .with_context(|| format!("line {}: action rejected", index + 1))?;
        dispatched += 1;
    }
    info!("event=replay_done module=cli status=ok actions={dispatched}");

    if let Some(repo) = repo.as_ref() {
        if !store.state().data.questionnaire_id.is_empty() {
            store
                .persist_to(repo)
                .context("failed to persist snapshot")?;
        }
    }

    serde_json::to_string_pretty(store.state().as_ref()).context("failed to render state")
}
