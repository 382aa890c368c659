//! Error type for `flexile-store-sqlite`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("i/o error: {0}")]
  Io(#[from] std::io::Error),

  /// A stored row could not be mapped back onto a match record. Only rows
  /// written outside this crate (e.g. by older versions) can trigger this.
  #[error("match {id}: invalid {column} value {value:?}")]
  Decode {
    id:     i64,
    column: &'static str,
    value:  String,
  },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
