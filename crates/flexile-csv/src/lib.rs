//! CSV codec for Flexile Llama batch uploads.
//!
//! Converts an uploaded CSV document into validated [`NewMatch`] values. Pure
//! synchronous; no database dependencies.
//!
//! # Quick start
//!
//! ```no_run
//! let csv = "mode,kills,score,match_date\nDuos,3,1500,2024-01-01\n";
//! let matches = flexile_csv::decode(csv).unwrap();
//! println!("{} matches", matches.len());
//! ```

mod decode;
pub mod error;
mod parse;

pub use decode::REQUIRED_COLUMNS;
use decode::decode_table;
pub use error::{Error, Result, RowError};
use flexile_core::record::NewMatch;

// ─── Types ───────────────────────────────────────────────────────────────────

/// A header-named CSV document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Table {
  pub headers: Vec<String>,
  pub rows:    Vec<Row>,
}

/// One data row. `fields` has exactly as many entries as `Table::headers`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Row {
  /// 1-based position among data rows.
  pub number: usize,
  /// 1-based source line where the row starts.
  pub line:   usize,
  pub fields: Vec<String>,
}

impl Table {
  /// Index of the first column named exactly `name`.
  pub fn column(&self, name: &str) -> Option<usize> {
    self.headers.iter().position(|h| h == name)
  }

  /// Which of `required` have no column. Extra columns are not reported.
  pub fn missing_columns<'a>(&self, required: &[&'a str]) -> Vec<&'a str> {
    required
      .iter()
      .copied()
      .filter(|name| self.column(name).is_none())
      .collect()
  }
}

// ─── Public API ──────────────────────────────────────────────────────────────

/// Parse `input` and decode every row into a [`NewMatch`].
///
/// Fails with [`Error::MissingColumns`] if any of [`REQUIRED_COLUMNS`] is
/// absent, and with [`Error::InvalidRows`] listing every bad field of every
/// bad row. On error no match is returned at all.
pub fn decode(input: &str) -> Result<Vec<NewMatch>> {
  let table = parse::table(input)?;
  decode_table(&table)
}
