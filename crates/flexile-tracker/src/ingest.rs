//! Single-record and batch ingestion.
//!
//! Both paths validate before anything reaches the store, and both turn every
//! failure into an [`IngestError`] carrying a user-facing message. A batch is
//! all-or-nothing: validation rejects it before the first insert, and the
//! insert itself runs in one transaction.

use chrono::NaiveDate;
use flexile_core::{
  record::{MatchForm, MatchId, NewMatch},
  store::MatchStore,
};
use flexile_csv::Error as CsvError;

use crate::error::IngestError;

/// Result of a successful form submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submitted {
  pub id:    MatchId,
  pub entry: NewMatch,
}

impl Submitted {
  pub fn message(&self) -> &'static str {
    "Match data has been successfully added to Flexile Llama!"
  }
}

/// Result of a successful batch upload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Uploaded {
  /// Records actually committed.
  pub count: usize,
}

impl Uploaded {
  pub fn message(&self) -> String {
    match self.count {
      1 => "Match data has been successfully uploaded! (1 match)".to_owned(),
      n => format!("Match data has been successfully uploaded! ({n} matches)"),
    }
  }
}

/// Validate one form entry and append it.
pub async fn submit<S>(
  store: &S,
  form: &MatchForm,
  today: NaiveDate,
) -> Result<Submitted, IngestError>
where
  S: MatchStore,
{
  let entry = form.validate(today).map_err(IngestError::InvalidForm)?;

  let id = store
    .append(entry.clone())
    .await
    .map_err(|e| IngestError::Storage(Box::new(e)))?;

  tracing::info!(id, mode = %entry.mode, "match recorded");
  Ok(Submitted { id, entry })
}

/// Decode an uploaded CSV file and append every row, or none.
pub async fn upload_csv<S>(store: &S, bytes: &[u8]) -> Result<Uploaded, IngestError>
where
  S: MatchStore,
{
  let text = std::str::from_utf8(bytes)
    .map_err(|e| IngestError::Ingestion(Box::new(e)))?;

  let matches = flexile_csv::decode(text).map_err(|e| match e {
    CsvError::MissingColumns { missing } => {
      tracing::warn!(?missing, "upload rejected: missing columns");
      IngestError::SchemaMismatch { missing }
    }
    CsvError::InvalidRows(rows) => {
      tracing::warn!(invalid = rows.len(), "upload rejected: invalid rows");
      IngestError::RowErrors(rows)
    }
    other => IngestError::Ingestion(Box::new(other)),
  })?;

  let expected = matches.len();
  let count = store
    .append_batch(matches)
    .await
    .map_err(|e| IngestError::Ingestion(Box::new(e)))?;

  if count != expected {
    tracing::warn!(expected, count, "batch committed fewer rows than decoded");
  }
  tracing::info!(count, "batch uploaded");
  Ok(Uploaded { count })
}
