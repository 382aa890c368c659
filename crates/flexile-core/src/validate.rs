//! Field-level validation shared by the single-record form and batch rows.

use std::str::FromStr as _;

use chrono::NaiveDate;

use crate::{
  FieldError, Result,
  record::{Field, GameMode, NewMatch},
};

/// Date layouts accepted on input. Storage always uses the first.
const DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%Y/%m/%d"];

/// Parse a mode name. Case-sensitive; surrounding whitespace is ignored.
pub fn mode(raw: &str) -> Result<GameMode, FieldError> {
  let trimmed = raw.trim();
  if trimmed.is_empty() {
    return Err(FieldError::Missing(Field::Mode));
  }
  GameMode::from_str(trimmed)
    .map_err(|_| FieldError::UnknownMode(trimmed.to_owned()))
}

/// Check that an already-numeric count is within `0..=u32::MAX`.
pub fn count(field: Field, value: i64) -> Result<u32, FieldError> {
  if value < 0 {
    return Err(FieldError::Negative { field, value });
  }
  u32::try_from(value).map_err(|_| FieldError::TooLarge { field, value })
}

/// Parse a count from text, then apply [`count`].
pub fn count_text(field: Field, raw: &str) -> Result<u32, FieldError> {
  let trimmed = raw.trim();
  if trimmed.is_empty() {
    return Err(FieldError::Missing(field));
  }
  let value = trimmed
    .parse::<i64>()
    .map_err(|_| FieldError::NotAnInteger {
      field,
      value: trimmed.to_owned(),
    })?;
  count(field, value)
}

/// Parse a calendar date (`YYYY-MM-DD`, or `YYYY/MM/DD`).
pub fn date(raw: &str) -> Result<NaiveDate, FieldError> {
  let trimmed = raw.trim();
  if trimmed.is_empty() {
    return Err(FieldError::Missing(Field::MatchDate));
  }
  DATE_FORMATS
    .iter()
    .find_map(|fmt| NaiveDate::parse_from_str(trimmed, fmt).ok())
    .ok_or_else(|| FieldError::InvalidDate(trimmed.to_owned()))
}

/// Normalised textual form of a match date, as stored.
pub fn format_date(date: NaiveDate) -> String {
  date.format(DATE_FORMATS[0]).to_string()
}

/// Combine per-field results, reporting every failing field at once.
pub fn assemble(
  mode: Result<GameMode, FieldError>,
  kills: Result<u32, FieldError>,
  score: Result<u32, FieldError>,
  match_date: Result<NaiveDate, FieldError>,
) -> Result<NewMatch, Vec<FieldError>> {
  match (mode, kills, score, match_date) {
    (Ok(mode), Ok(kills), Ok(score), Ok(match_date)) => Ok(NewMatch {
      mode,
      kills,
      score,
      match_date,
    }),
    (mode, kills, score, match_date) => {
      let errors: Vec<FieldError> = [
        mode.err(),
        kills.err(),
        score.err(),
        match_date.err(),
      ]
      .into_iter()
      .flatten()
      .collect();
      Err(errors)
    }
  }
}
