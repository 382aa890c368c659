//! Encoding and decoding helpers between domain types and the plain values
//! stored in SQLite columns.
//!
//! Modes are stored by name, counts as INTEGER, and dates as `YYYY-MM-DD`
//! text.

use std::str::FromStr as _;

use chrono::NaiveDate;
use flexile_core::{
  record::{Field, GameMode, MatchRecord, NewMatch},
  validate,
};

use crate::{Error, Result};

// ─── GameMode ────────────────────────────────────────────────────────────────

pub fn encode_mode(mode: GameMode) -> &'static str {
  match mode {
    GameMode::Solo => "Solo",
    GameMode::Duos => "Duos",
    GameMode::Trios => "Trios",
    GameMode::Squads => "Squads",
  }
}

// ─── NaiveDate ───────────────────────────────────────────────────────────────

pub fn encode_date(date: NaiveDate) -> String { validate::format_date(date) }

// ─── Row types ───────────────────────────────────────────────────────────────

/// Column values ready to bind to [`crate::schema::INSERT_MATCH`].
pub struct EncodedMatch {
  pub mode:       &'static str,
  pub kills:      i64,
  pub score:      i64,
  pub match_date: String,
}

impl From<&NewMatch> for EncodedMatch {
  fn from(m: &NewMatch) -> Self {
    Self {
      mode:       encode_mode(m.mode),
      kills:      i64::from(m.kills),
      score:      i64::from(m.score),
      match_date: encode_date(m.match_date),
    }
  }
}

/// Raw values read directly from a `matches` row.
pub struct RawMatch {
  pub id:         i64,
  pub mode:       String,
  pub kills:      i64,
  pub score:      i64,
  pub match_date: String,
}

impl RawMatch {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:         row.get(0)?,
      mode:       row.get(1)?,
      kills:      row.get(2)?,
      score:      row.get(3)?,
      match_date: row.get(4)?,
    })
  }

  pub fn into_record(self) -> Result<MatchRecord> {
    let id = self.id;
    let decode_err = |field: Field, value: String| Error::Decode {
      id,
      column: field.column(),
      value,
    };

    let mode = GameMode::from_str(&self.mode)
      .map_err(|_| decode_err(Field::Mode, self.mode.clone()))?;
    let kills = u32::try_from(self.kills)
      .map_err(|_| decode_err(Field::Kills, self.kills.to_string()))?;
    let score = u32::try_from(self.score)
      .map_err(|_| decode_err(Field::Score, self.score.to_string()))?;
    let match_date = validate::date(&self.match_date)
      .map_err(|_| decode_err(Field::MatchDate, self.match_date.clone()))?;

    Ok(MatchRecord { id, mode, kills, score, match_date })
  }
}
