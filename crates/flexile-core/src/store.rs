//! The `MatchStore` trait.
//!
//! Implemented by storage backends (e.g. `flexile-store-sqlite`). The
//! ingestion layer in `flexile-tracker` depends on this abstraction, not on
//! any concrete backend.

use std::future::Future;

use crate::record::{MatchId, MatchRecord, NewMatch};

/// Abstraction over one identity's durable table of match records.
///
/// Records are append-only; there is no update or delete. Field semantics are
/// enforced by the types of [`NewMatch`], not re-checked here.
pub trait MatchStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Create the table if it is absent. Idempotent.
  fn ensure_schema(
    &self,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  /// Persist one record and return the identifier the store assigned.
  fn append(
    &self,
    input: NewMatch,
  ) -> impl Future<Output = Result<MatchId, Self::Error>> + Send + '_;

  /// Persist `inputs` in order. Either every record is committed or none is;
  /// on success the returned count equals `inputs.len()`.
  fn append_batch(
    &self,
    inputs: Vec<NewMatch>,
  ) -> impl Future<Output = Result<usize, Self::Error>> + Send + '_;

  /// Every record, ordered by ascending id.
  fn read_all(
    &self,
  ) -> impl Future<Output = Result<Vec<MatchRecord>, Self::Error>> + Send + '_;

  /// Release the underlying connection. Closing twice is not an error.
  fn close(&self) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;
}
