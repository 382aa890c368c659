//! Error types for `flexile-tracker`, each with the message shown to the
//! user.

use flexile_core::{FieldError, identity::IdentityKey};
use flexile_csv::{REQUIRED_COLUMNS, RowError};
use thiserror::Error;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

// ─── Identity ────────────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum IdentityError {
  /// No login attempt yet; prompt rather than reject.
  #[error("no username supplied")]
  Missing,

  /// Credential mode only: a username without a password.
  #[error("no password supplied")]
  MissingPassword,

  #[error("incorrect credentials")]
  IncorrectCredentials,

  #[error("configured password hash is not a valid PHC string: {0}")]
  InvalidPasswordHash(String),

  #[error("credential mode requires {0} to be configured")]
  MissingSetting(&'static str),

  #[error("argon2 error: {0}")]
  Hash(String),
}

impl IdentityError {
  /// `true` for the neutral "please log in" states.
  pub fn is_prompt(&self) -> bool {
    matches!(self, Self::Missing | Self::MissingPassword)
  }

  pub fn user_message(&self) -> String {
    match self {
      Self::Missing => "Please enter your username".to_owned(),
      Self::MissingPassword => "Please enter your password".to_owned(),
      Self::IncorrectCredentials => "Username/password is incorrect.".to_owned(),
      other => format!("Login is misconfigured: {other}"),
    }
  }
}

// ─── Ingestion ───────────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum IngestError {
  /// The entry form failed validation; nothing was stored.
  #[error("invalid match form: {}", join(.0))]
  InvalidForm(Vec<FieldError>),

  /// The upload lacks required columns; nothing was stored.
  #[error("missing required columns: {}", .missing.join(", "))]
  SchemaMismatch { missing: Vec<String> },

  /// Some uploaded rows failed validation; nothing was stored.
  #[error("{} invalid row(s): {}", .0.len(), join(.0))]
  RowErrors(Vec<RowError>),

  /// The upload could not be read or stored.
  #[error("ingestion failed: {0}")]
  Ingestion(#[source] BoxError),

  /// The single record could not be stored.
  #[error("storage failed: {0}")]
  Storage(#[source] BoxError),
}

impl IngestError {
  pub fn user_message(&self) -> String {
    match self {
      Self::InvalidForm(errors) => {
        format!("Match data was not saved: {}", join(errors))
      }
      Self::SchemaMismatch { .. } => format!(
        "Error: The uploaded CSV must include the following columns: {}",
        REQUIRED_COLUMNS.join(", ")
      ),
      Self::RowErrors(rows) => {
        let mut msg =
          String::from("The uploaded CSV contains invalid rows; nothing was saved:");
        for row in rows {
          msg.push_str("\n  ");
          msg.push_str(&row.to_string());
        }
        msg
      }
      Self::Ingestion(e) => {
        format!("An error occurred while processing the CSV: {e}")
      }
      Self::Storage(e) => format!("An error occurred while saving the match: {e}"),
    }
  }
}

// ─── Top level ───────────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum Error {
  #[error(transparent)]
  Identity(#[from] IdentityError),

  #[error("store for {identity} is unavailable: {source}")]
  StorageUnavailable {
    identity: IdentityKey,
    #[source]
    source:   BoxError,
  },

  #[error(transparent)]
  Ingest(#[from] IngestError),

  #[error("could not read match history: {0}")]
  History(#[source] BoxError),
}

impl Error {
  pub fn user_message(&self) -> String {
    match self {
      Self::Identity(e) => e.user_message(),
      Self::Ingest(e) => e.user_message(),
      Self::StorageUnavailable { source, .. } => {
        format!("Your match history could not be opened: {source}")
      }
      Self::History(e) => format!("Your match history could not be read: {e}"),
    }
  }
}

fn join<E: ToString>(errors: &[E]) -> String {
  errors.iter().map(ToString::to_string).collect::<Vec<_>>().join("; ")
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
