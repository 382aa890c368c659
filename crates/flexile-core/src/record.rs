//! Match records — the single entity kept by a Flexile Llama store.
//!
//! A record is written once and never updated. The store assigns the `id`;
//! callers build a [`NewMatch`] (already validated) or a raw [`MatchForm`]
//! (validated at the ingestion boundary).

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

use crate::{FieldError, Result, validate};

/// Store-assigned identifier; starts at 1 and is never reused.
pub type MatchId = i64;

// ─── Game mode ───────────────────────────────────────────────────────────────

/// The party size a match was played in.
///
/// The string forms (`"Solo"`, `"Duos"`, …) are what the `mode` column and
/// the batch CSV format carry; parsing is case-sensitive.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Hash,
  PartialOrd,
  Ord,
  Serialize,
  Deserialize,
  Display,
  EnumString,
  AsRefStr,
)]
pub enum GameMode {
  Solo,
  Duos,
  Trios,
  Squads,
}

// ─── Columns ─────────────────────────────────────────────────────────────────

/// A user-supplied column of a match record. `id` is never user-supplied.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, AsRefStr,
)]
#[strum(serialize_all = "snake_case")]
pub enum Field {
  Mode,
  Kills,
  Score,
  MatchDate,
}

impl Field {
  /// Column names every batch upload must carry, in display order.
  pub const REQUIRED: [Self; 4] =
    [Self::Mode, Self::Kills, Self::Score, Self::MatchDate];

  /// The CSV header / SQL column name.
  pub const fn column(self) -> &'static str {
    match self {
      Self::Mode => "mode",
      Self::Kills => "kills",
      Self::Score => "score",
      Self::MatchDate => "match_date",
    }
  }
}

// ─── Records ─────────────────────────────────────────────────────────────────

/// Input to [`crate::store::MatchStore::append`]. Every field is already
/// within its domain; negative counts and unknown modes cannot be expressed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewMatch {
  pub mode:       GameMode,
  pub kills:      u32,
  pub score:      u32,
  pub match_date: NaiveDate,
}

/// A persisted match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchRecord {
  pub id:         MatchId,
  pub mode:       GameMode,
  pub kills:      u32,
  pub score:      u32,
  pub match_date: NaiveDate,
}

impl MatchRecord {
  pub fn new(id: MatchId, input: NewMatch) -> Self {
    Self {
      id,
      mode: input.mode,
      kills: input.kills,
      score: input.score,
      match_date: input.match_date,
    }
  }

  /// The record without its identifier, for comparison against what was
  /// submitted.
  pub fn to_new(&self) -> NewMatch {
    NewMatch {
      mode:       self.mode,
      kills:      self.kills,
      score:      self.score,
      match_date: self.match_date,
    }
  }
}

// ─── Form input ──────────────────────────────────────────────────────────────

/// The four fields exactly as the entry form collected them.
///
/// The form widget normally constrains these already, but nothing here
/// trusts it: [`MatchForm::validate`] applies the same rules as batch rows.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MatchForm {
  pub mode:       String,
  pub kills:      i64,
  pub score:      i64,
  /// `None` means "today".
  pub match_date: Option<String>,
}

impl MatchForm {
  /// Validate every field, collecting all failures, and build a [`NewMatch`].
  /// An absent date resolves to `today`.
  pub fn validate(&self, today: NaiveDate) -> Result<NewMatch, Vec<FieldError>> {
    let mode = validate::mode(&self.mode);
    let kills = validate::count(Field::Kills, self.kills);
    let score = validate::count(Field::Score, self.score);
    let match_date = match self.match_date.as_deref().map(str::trim) {
      None | Some("") => Ok(today),
      Some(raw) => validate::date(raw),
    };
    validate::assemble(mode, kills, score, match_date)
  }
}
