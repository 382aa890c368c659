//! `flexile` — record and review match results from the terminal.
//!
//! # Usage
//!
//! ```text
//! flexile --user alice add --mode Duos --kills 3 --score 1500 --date 2024-01-01
//! flexile --user alice import matches.csv
//! flexile --user alice list
//! flexile --user alice stats
//! ```
//!
//! Configuration is read from `flexile.toml` (or `--config`) and `FLEXILE_*`
//! environment variables. In credential mode, generate the hash for
//! `auth_password_hash` with `flexile hash-password`.

mod render;

use std::{
  path::{Path, PathBuf},
  process::ExitCode,
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use flexile_core::record::MatchForm;
use flexile_store_sqlite::SqliteStore;
use flexile_tracker::{
  Error, IngestError, Session, Tracker, TrackerConfig, identity::hash_password,
};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "flexile", version, about = "Track your match performance over time")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "flexile.toml")]
  config: PathBuf,

  /// Username whose match history to use.
  #[arg(short, long, global = true, env = "FLEXILE_USER")]
  user: Option<String>,

  /// Password (credential mode only).
  #[arg(long, global = true, env = "FLEXILE_PASSWORD", hide_env_values = true)]
  password: Option<String>,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
  /// Record a single match.
  Add {
    /// Game mode: Solo, Duos, Trios or Squads.
    #[arg(long)]
    mode:  String,
    #[arg(long, allow_negative_numbers = true)]
    kills: i64,
    #[arg(long, allow_negative_numbers = true)]
    score: i64,
    /// Match date (YYYY-MM-DD); defaults to today.
    #[arg(long)]
    date:  Option<String>,
  },
  /// Upload matches in bulk from a CSV file with columns
  /// mode,kills,score,match_date.
  Import { file: PathBuf },
  /// Print every saved match.
  List {
    /// Emit JSON instead of a table.
    #[arg(long)]
    json: bool,
  },
  /// Show kills/score over time and games played per mode.
  Stats,
  /// Print the argon2 hash for a password entered on stdin and exit.
  HashPassword,
}

// ─── Entry point ──────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
  tracing_subscriber::fmt()
    .with_writer(std::io::stderr)
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  // Helper mode: hash a password and exit.
  if matches!(cli.command, Command::HashPassword) {
    let password = read_password()?;
    let hash = hash_password(&password).map_err(|e| anyhow::anyhow!("{e}"))?;
    println!("{hash}");
    return Ok(ExitCode::SUCCESS);
  }

  let settings = config::Config::builder()
    .add_source(config::File::from(cli.config.clone()).required(false))
    .add_source(config::Environment::with_prefix("FLEXILE"))
    .build()
    .context("failed to read config file")?;

  let mut tracker_cfg: TrackerConfig = settings
    .try_deserialize()
    .context("failed to deserialise TrackerConfig")?;
  tracker_cfg.data_dir = expand_tilde(&tracker_cfg.data_dir);

  let tracker = match Tracker::from_config(&tracker_cfg) {
    Ok(tracker) => tracker,
    Err(e) => return Ok(report(&e)),
  };

  let session = match tracker
    .login(cli.user.as_deref(), cli.password.as_deref())
    .await
  {
    Ok(session) => session,
    Err(e) => return Ok(report(&e)),
  };

  // Release the store on every path, including failed ingestion.
  let outcome = run(&session, cli.command).await;
  finish(outcome, session.close().await)
}

async fn run(session: &Session<SqliteStore>, command: Command) -> Result<(), Error> {
  match command {
    Command::Add { mode, kills, score, date } => {
      let form = MatchForm { mode, kills, score, match_date: date };
      let today = chrono::Local::now().date_naive();
      let submitted = session.submit(&form, today).await?;
      println!("{}", submitted.message());
    }
    Command::Import { file } => {
      let bytes = tokio::fs::read(&file)
        .await
        .map_err(|e| IngestError::Ingestion(Box::new(e)))?;
      let uploaded = session.upload_csv(&bytes).await?;
      println!("{}", uploaded.message());
    }
    Command::List { json } => {
      let history = session.history().await?;
      if json {
        let out = serde_json::to_string_pretty(&history.records)
          .map_err(|e| Error::History(Box::new(e)))?;
        println!("{out}");
      } else {
        print!("{}", render::table(&history));
      }
    }
    Command::Stats => {
      let history = session.history().await?;
      print!("{}", render::charts(&history));
    }
    Command::HashPassword => {}
  }
  Ok(())
}

/// Pick the exit code once the store is closed. A command error is always
/// reported; a close failure only becomes the error when the command itself
/// succeeded.
fn finish<E>(outcome: Result<(), Error>, closed: Result<(), E>) -> anyhow::Result<ExitCode>
where
  E: std::error::Error + Send + Sync + 'static,
{
  match (outcome, closed) {
    (Ok(()), Ok(())) => Ok(ExitCode::SUCCESS),
    (Ok(()), Err(e)) => Err(anyhow::Error::new(e).context("failed to close store")),
    (Err(e), closed) => {
      if let Err(close_err) = closed {
        tracing::error!(error = %close_err, "failed to close store");
      }
      Ok(report(&e))
    }
  }
}

/// Show `error` to the user and pick the exit code.
fn report(error: &Error) -> ExitCode {
  eprintln!("{}", error.user_message());
  ExitCode::FAILURE
}

/// Read a password as one line from stdin. Input is echoed.
fn read_password() -> anyhow::Result<String> {
  use std::io::{self, BufRead, Write};
  let stdin = io::stdin();
  eprint!("Password: ");
  io::stderr().flush().ok();
  let mut line = String::new();
  stdin.lock().read_line(&mut line)?;
  Ok(
    line
      .trim_end_matches('\n')
      .trim_end_matches('\r')
      .to_string(),
  )
}

/// Expand a leading `~` to the user's home directory.
fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn cli_parses_add() {
    let cli = Cli::try_parse_from([
      "flexile", "--user", "alice", "add", "--mode", "Duos", "--kills", "3",
      "--score", "1500", "--date", "2024-01-01",
    ])
    .unwrap();
    assert_eq!(cli.user.as_deref(), Some("alice"));
    let Command::Add { mode, kills, score, date } = cli.command else {
      panic!("expected add");
    };
    assert_eq!((mode.as_str(), kills, score), ("Duos", 3, 1500));
    assert_eq!(date.as_deref(), Some("2024-01-01"));
  }

  #[test]
  fn negative_counts_reach_validation() {
    let cli = Cli::try_parse_from([
      "flexile", "add", "--mode", "Solo", "--kills", "-2", "--score", "0",
    ])
    .unwrap();
    assert!(matches!(cli.command, Command::Add { kills: -2, .. }));
  }

  #[test]
  fn global_user_after_subcommand() {
    let cli =
      Cli::try_parse_from(["flexile", "import", "m.csv", "--user", "bob"]).unwrap();
    assert_eq!(cli.user.as_deref(), Some("bob"));
    assert!(matches!(cli.command, Command::Import { .. }));
  }

  #[test]
  fn command_error_survives_a_failed_close() {
    let outcome = Err(Error::Ingest(IngestError::SchemaMismatch {
      missing: vec!["match_date".into()],
    }));
    let closed = Err(std::io::Error::other("disk gone"));
    assert!(finish(outcome, closed).is_ok());
  }

  #[test]
  fn failed_close_after_success_is_an_error() {
    let closed = Err(std::io::Error::other("disk gone"));
    let err = finish(Ok(()), closed).unwrap_err();
    assert_eq!(err.to_string(), "failed to close store");
  }

  #[test]
  fn tilde_expands_to_home() {
    let home = std::env::var("HOME").unwrap_or_default();
    if home.is_empty() {
      return;
    }
    assert_eq!(
      expand_tilde(Path::new("~/.local/share/flexile")),
      PathBuf::from(home).join(".local/share/flexile")
    );
    assert_eq!(expand_tilde(Path::new("/srv/data")), PathBuf::from("/srv/data"));
  }
}
