//! Ingestion and session layer for the Flexile Llama match tracker.
//!
//! Sits between a UI collaborator (the `flexile` CLI, or anything else that
//! collects form input and uploads) and the per-identity SQLite stores:
//!
//! 1. [`Tracker::login`] resolves the identity and opens its store.
//! 2. [`Session::submit`] / [`Session::upload_csv`] validate and append.
//! 3. [`Session::history`] reads everything back for display.

pub mod error;
pub mod identity;
pub mod ingest;
pub mod session;

use std::path::PathBuf;

use flexile_store_sqlite::{SqliteStore, StoreDirectory};
use serde::Deserialize;

pub use error::{Error, IdentityError, IngestError, Result};
use identity::{AuthMode, Resolver};
pub use session::{History, Session};

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime configuration, deserialised from `flexile.toml` and `FLEXILE_*`
/// environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct TrackerConfig {
  /// Directory holding one store file per identity.
  #[serde(default = "default_data_dir")]
  pub data_dir:           PathBuf,
  #[serde(default)]
  pub auth_mode:          AuthMode,
  /// Credential mode only: the single accepted username.
  pub auth_username:      Option<String>,
  /// Credential mode only: argon2 PHC string for that user's password.
  pub auth_password_hash: Option<String>,
}

fn default_data_dir() -> PathBuf { PathBuf::from("~/.local/share/flexile") }

impl Default for TrackerConfig {
  fn default() -> Self {
    Self {
      data_dir:           default_data_dir(),
      auth_mode:          AuthMode::default(),
      auth_username:      None,
      auth_password_hash: None,
    }
  }
}

impl TrackerConfig {
  /// Build the resolver this configuration asks for.
  pub fn resolver(&self) -> Result<Resolver, IdentityError> {
    match self.auth_mode {
      AuthMode::Open => Ok(Resolver::Open),
      AuthMode::Credentials => {
        let username = self
          .auth_username
          .as_deref()
          .ok_or(IdentityError::MissingSetting("auth_username"))?;
        let hash = self
          .auth_password_hash
          .as_deref()
          .ok_or(IdentityError::MissingSetting("auth_password_hash"))?;
        Resolver::credentials(username, hash)
      }
    }
  }
}

// ─── Tracker ──────────────────────────────────────────────────────────────────

/// Identity resolution plus the directory of per-identity stores.
#[derive(Debug, Clone)]
pub struct Tracker {
  resolver: Resolver,
  stores:   StoreDirectory,
}

impl Tracker {
  pub fn new(resolver: Resolver, stores: StoreDirectory) -> Self {
    Self { resolver, stores }
  }

  /// Build a tracker from configuration. `data_dir` is used as given; any
  /// `~` expansion is the caller's job.
  pub fn from_config(config: &TrackerConfig) -> Result<Self> {
    let resolver = config.resolver()?;
    Ok(Self::new(resolver, StoreDirectory::new(&config.data_dir)))
  }

  /// Resolve the login attempt and open the bound store.
  pub async fn login(
    &self,
    username: Option<&str>,
    password: Option<&str>,
  ) -> Result<Session<SqliteStore>> {
    let identity = self.resolver.resolve(username, password).map_err(|e| {
      if !e.is_prompt() {
        tracing::warn!(error = %e, "login rejected");
      }
      e
    })?;
    Session::open(&self.stores, identity).await
  }
}
