//! [`SqliteStore`] — the SQLite implementation of [`MatchStore`].

use std::path::Path;

use flexile_core::{
  record::{MatchId, MatchRecord, NewMatch},
  store::MatchStore,
};

use crate::{
  Error, Result,
  encode::{EncodedMatch, RawMatch},
  schema::{INSERT_MATCH, SCHEMA, SELECT_ALL},
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// One identity's match history, backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted. Closing any
/// clone closes the shared connection.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.ensure_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.ensure_schema().await?;
    Ok(store)
  }
}

// ─── MatchStore impl ─────────────────────────────────────────────────────────

impl MatchStore for SqliteStore {
  type Error = Error;

  async fn ensure_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  async fn append(&self, input: NewMatch) -> Result<MatchId> {
    let row = EncodedMatch::from(&input);

    let id = self
      .conn
      .call(move |conn| {
        conn.execute(
          INSERT_MATCH,
          rusqlite::params![row.mode, row.kills, row.score, row.match_date],
        )?;
        Ok(conn.last_insert_rowid())
      })
      .await?;

    Ok(id)
  }

  async fn append_batch(&self, inputs: Vec<NewMatch>) -> Result<usize> {
    let rows: Vec<EncodedMatch> = inputs.iter().map(EncodedMatch::from).collect();

    let inserted = self
      .conn
      .call(move |conn| {
        // Dropping the transaction on an early return rolls it back.
        let tx = conn.transaction()?;
        let mut inserted = 0usize;
        {
          let mut stmt = tx.prepare_cached(INSERT_MATCH)?;
          for row in &rows {
            inserted += stmt.execute(rusqlite::params![
              row.mode,
              row.kills,
              row.score,
              row.match_date,
            ])?;
          }
        }
        tx.commit()?;
        Ok(inserted)
      })
      .await?;

    Ok(inserted)
  }

  async fn read_all(&self) -> Result<Vec<MatchRecord>> {
    let raws: Vec<RawMatch> = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(SELECT_ALL)?;
        let rows = stmt
          .query_map([], RawMatch::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawMatch::into_record).collect()
  }

  async fn close(&self) -> Result<()> {
    match self.conn.clone().close().await {
      Ok(()) | Err(tokio_rusqlite::Error::ConnectionClosed) => Ok(()),
      Err(e) => Err(e.into()),
    }
  }
}
