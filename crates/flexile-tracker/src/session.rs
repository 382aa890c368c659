//! [`Session`] — one logged-in identity bound to its own store.

use chrono::NaiveDate;
use flexile_core::{
  identity::IdentityKey,
  record::{MatchForm, MatchRecord},
  stats::{ModeCount, PerformancePoint, mode_breakdown, performance_series},
  store::MatchStore,
};
use flexile_store_sqlite::{SqliteStore, StoreDirectory};

use crate::{
  Error, Result,
  error::IngestError,
  ingest::{self, Submitted, Uploaded},
};

/// The store handle for one identity, held for the length of a session.
///
/// There is no process-wide connection: every operation goes through the
/// session that owns the handle. Call [`Session::close`] on every exit path.
pub struct Session<S: MatchStore> {
  identity: IdentityKey,
  store:    S,
}

impl Session<SqliteStore> {
  /// Open (creating if absent) the store bound to `identity`.
  pub async fn open(stores: &StoreDirectory, identity: IdentityKey) -> Result<Self> {
    match stores.open(&identity).await {
      Ok(store) => {
        tracing::info!(%identity, "session opened");
        Ok(Self::new(identity, store))
      }
      Err(e) => {
        tracing::error!(%identity, error = %e, "store unavailable");
        Err(Error::StorageUnavailable { identity, source: Box::new(e) })
      }
    }
  }
}

impl<S: MatchStore> Session<S> {
  pub fn new(identity: IdentityKey, store: S) -> Self { Self { identity, store } }

  pub fn identity(&self) -> &IdentityKey { &self.identity }

  pub fn store(&self) -> &S { &self.store }

  /// Validate and store one form entry.
  pub async fn submit(
    &self,
    form: &MatchForm,
    today: NaiveDate,
  ) -> Result<Submitted, IngestError> {
    ingest::submit(&self.store, form, today).await
  }

  /// Validate and store every row of an uploaded CSV file, or none.
  pub async fn upload_csv(&self, bytes: &[u8]) -> Result<Uploaded, IngestError> {
    ingest::upload_csv(&self.store, bytes).await
  }

  /// The full history plus the chart data derived from it.
  pub async fn history(&self) -> Result<History> {
    let records = self
      .store
      .read_all()
      .await
      .map_err(|e| Error::History(Box::new(e)))?;
    Ok(History::from_records(records))
  }

  /// Release the store handle.
  pub async fn close(self) -> Result<(), S::Error> {
    let identity = self.identity;
    self.store.close().await?;
    tracing::debug!(%identity, "session closed");
    Ok(())
  }
}

/// Everything the results view renders: the table and both charts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct History {
  pub records:     Vec<MatchRecord>,
  pub performance: Vec<PerformancePoint>,
  pub modes:       Vec<ModeCount>,
}

impl History {
  pub fn from_records(records: Vec<MatchRecord>) -> Self {
    let performance = performance_series(&records);
    let modes = mode_breakdown(&records);
    Self { records, performance, modes }
  }

  pub fn is_empty(&self) -> bool { self.records.is_empty() }

  pub fn empty_message() -> &'static str {
    "No match data available. Add some matches to see your stats!"
  }
}
