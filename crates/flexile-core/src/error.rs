//! Error types for `flexile-core`.

use thiserror::Error;

use crate::record::Field;

#[derive(Debug, Error)]
pub enum Error {
  #[error("identity must not be blank")]
  BlankIdentity,
}

/// A single field that failed validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
  #[error("{0} is required")]
  Missing(Field),

  #[error("unknown game mode {0:?} (expected Solo, Duos, Trios or Squads)")]
  UnknownMode(String),

  #[error("{field} must be a whole number, got {value:?}")]
  NotAnInteger { field: Field, value: String },

  #[error("{field} must not be negative, got {value}")]
  Negative { field: Field, value: i64 },

  #[error("{field} is too large: {value}")]
  TooLarge { field: Field, value: i64 },

  #[error("match_date must be a YYYY-MM-DD date, got {0:?}")]
  InvalidDate(String),
}

impl FieldError {
  /// The column this error refers to.
  pub fn field(&self) -> Field {
    match self {
      Self::Missing(field)
      | Self::NotAnInteger { field, .. }
      | Self::Negative { field, .. }
      | Self::TooLarge { field, .. } => *field,
      Self::UnknownMode(_) => Field::Mode,
      Self::InvalidDate(_) => Field::MatchDate,
    }
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
