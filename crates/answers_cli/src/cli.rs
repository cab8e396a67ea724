//! CLI argument definitions.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "answers_cli",
    version,
    about = "Replay questionnaire answer actions through the answers state core"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Absolute directory for rolling log files. Logging stays off when omitted.
    #[arg(long = "log-dir", value_name = "DIR", global = true)]
    pub log_dir: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error). Defaults by build mode.
    #[arg(long = "log-level", value_name = "LEVEL", global = true)]
    pub log_level: Option<String>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Print the answers core version.
    Version,

    /// Dispatch a JSON-lines file of host actions and print the final state.
    Replay(ReplayArgs),
}

#[derive(Parser)]
pub struct ReplayArgs {
    /// File with one action object (`{"type": ...}`) per line.
    #[arg(value_name = "ACTIONS")]
    pub actions: PathBuf,

    /// SQLite snapshot database to restore from and persist to.
    #[arg(long = "snapshot-db", value_name = "PATH")]
    pub snapshot_db: Option<PathBuf>,

    /// Questionnaire id whose cached snapshot is restored before replay.
    #[arg(long = "questionnaire", value_name = "ID", requires = "snapshot_db")]
    pub questionnaire: Option<String>,
}
