//! Error types for the flexile-csv codec.

use flexile_core::FieldError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("line {line}: unterminated quoted field")]
  UnterminatedQuote { line: usize },

  #[error("line {line}: unexpected character after closing quote")]
  StrayQuote { line: usize },

  #[error("line {line}: expected {expected} fields, found {found}")]
  FieldCount {
    line:     usize,
    expected: usize,
    found:    usize,
  },

  #[error("missing required columns: {}", .missing.join(", "))]
  MissingColumns { missing: Vec<String> },

  #[error("{} invalid row(s): {}", .0.len(), join_rows(.0))]
  InvalidRows(Vec<RowError>),
}

/// One failing field of one data row.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("row {row} (line {line}): {error}")]
pub struct RowError {
  /// 1-based position among data rows (the header is not counted).
  pub row:   usize,
  /// 1-based line in the source where the row starts.
  pub line:  usize,
  pub error: FieldError,
}

fn join_rows(rows: &[RowError]) -> String {
  rows.iter().map(ToString::to_string).collect::<Vec<_>>().join("; ")
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
