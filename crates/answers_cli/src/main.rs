//! Answers core command-line tool.
//!
//! # Responsibility
//! - Print the core version.
//! - Replay recorded host actions for debugging answer-state issues.

mod cli;
mod replay;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Command};

fn main() {
    let cli = Cli::parse();
    if let Err(error) = run(cli) {
        eprintln!("error: {error:#}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    if let Some(log_dir) = cli.log_dir.as_ref() {
        let level = log_level(&cli);
        let log_dir = log_dir
            .to_str()
            .context("log directory must be valid UTF-8")?;
        answers_core::init_logging(level, log_dir)
            .map_err(anyhow::Error::msg)
            .context("failed to initialize logging")?;
    }

    match cli.command {
        Command::Version => println!("answers_core version={}", answers_core::core_version()),
        Command::Replay(args) => println!("{}", replay::run_replay(&args)?),
    }
    Ok(())
}

/// Explicit `--log-level`, or the build-mode default.
fn log_level(cli: &Cli) -> &str {
    cli.log_level
        .as_deref()
        .unwrap_or(answers_core::default_log_level())
}

#[cfg(test)]
mod tests {
    use super::log_level;
    use crate::cli::{Cli, Command};
    use clap::Parser;

    #[test]
    fn explicit_log_level_wins() {
        let cli = Cli::try_parse_from(["answers_cli", "--log-level", "warn", "version"]).unwrap();
        assert_eq!(log_level(&cli), "warn");
    }

    #[test]
    fn missing_log_level_uses_build_default() {
        let cli = Cli::try_parse_from(["answers_cli", "version"]).unwrap();
        assert_eq!(log_level(&cli), answers_core::default_log_level());
        assert!(matches!(cli.command, Command::Version));
    }

    #[test]
    fn questionnaire_requires_snapshot_db() {
        let result = Cli::try_parse_from([
            "answers_cli",
            "replay",
            "actions.jsonl",
            "--questionnaire",
            "q1",
        ]);
        assert!(result.is_err());
    }
}
