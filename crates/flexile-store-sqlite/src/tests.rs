//! Integration tests for `SqliteStore` against in-memory and on-disk
//! databases.

use chrono::NaiveDate;
use flexile_core::{
  identity::IdentityKey,
  record::{GameMode, NewMatch},
  store::MatchStore,
};

use crate::{SqliteStore, StoreDirectory};

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

fn new_match(mode: GameMode, kills: u32, score: u32, day: u32) -> NewMatch {
  NewMatch {
    mode,
    kills,
    score,
    match_date: NaiveDate::from_ymd_opt(2024, 1, day).unwrap(),
  }
}

// ─── Append ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn first_record_gets_id_one() {
  let s = store().await;

  let submitted = new_match(GameMode::Duos, 3, 1500, 1);
  let id = s.append(submitted.clone()).await.unwrap();
  assert_eq!(id, 1);

  let all = s.read_all().await.unwrap();
  assert_eq!(all.len(), 1);
  assert_eq!(all[0].id, 1);
  assert_eq!(all[0].mode, GameMode::Duos);
  assert_eq!(all[0].kills, 3);
  assert_eq!(all[0].score, 1500);
  assert_eq!(all[0].match_date, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
}

#[tokio::test]
async fn append_assigns_next_id_and_is_read_back_last() {
  let s = store().await;
  s.append(new_match(GameMode::Solo, 1, 200, 2)).await.unwrap();
  s.append(new_match(GameMode::Trios, 5, 900, 3)).await.unwrap();

  let before_max = s.read_all().await.unwrap().iter().map(|r| r.id).max().unwrap();
  let submitted = new_match(GameMode::Squads, 7, 3100, 4);
  let id = s.append(submitted.clone()).await.unwrap();
  assert_eq!(id, before_max + 1);

  let all = s.read_all().await.unwrap();
  let last = all.last().unwrap();
  assert_eq!(last.id, id);
  assert_eq!(last.to_new(), submitted);
}

#[tokio::test]
async fn zero_counts_are_stored() {
  let s = store().await;
  s.append(new_match(GameMode::Solo, 0, 0, 5)).await.unwrap();
  let all = s.read_all().await.unwrap();
  assert_eq!((all[0].kills, all[0].score), (0, 0));
}

// ─── Batch ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn batch_appends_in_order() {
  let s = store().await;
  let batch = vec![
    new_match(GameMode::Solo, 1, 100, 1),
    new_match(GameMode::Duos, 2, 200, 2),
    new_match(GameMode::Trios, 3, 300, 3),
  ];

  let count = s.append_batch(batch.clone()).await.unwrap();
  assert_eq!(count, 3);

  let all = s.read_all().await.unwrap();
  let stored: Vec<NewMatch> = all.iter().map(|r| r.to_new()).collect();
  assert_eq!(stored, batch);
  assert_eq!(all.iter().map(|r| r.id).collect::<Vec<_>>(), vec![1, 2, 3]);
}

#[tokio::test]
async fn empty_batch_is_a_no_op() {
  let s = store().await;
  assert_eq!(s.append_batch(Vec::new()).await.unwrap(), 0);
  assert!(s.read_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn read_all_orders_interleaved_single_and_batch_appends() {
  let s = store().await;
  s.append(new_match(GameMode::Solo, 1, 10, 1)).await.unwrap();
  s.append_batch(vec![
    new_match(GameMode::Duos, 2, 20, 2),
    new_match(GameMode::Trios, 3, 30, 3),
  ])
  .await
  .unwrap();
  s.append(new_match(GameMode::Squads, 4, 40, 4)).await.unwrap();
  s.append_batch(vec![new_match(GameMode::Solo, 5, 50, 5)])
    .await
    .unwrap();

  let all = s.read_all().await.unwrap();
  let ids: Vec<_> = all.iter().map(|r| r.id).collect();
  assert_eq!(ids, vec![1, 2, 3, 4, 5]);
  let kills: Vec<_> = all.iter().map(|r| r.kills).collect();
  assert_eq!(kills, vec![1, 2, 3, 4, 5]);
}

// ─── Schema ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn ensure_schema_is_idempotent() {
  let s = store().await;
  s.append(new_match(GameMode::Duos, 3, 1500, 1)).await.unwrap();

  s.ensure_schema().await.unwrap();
  s.ensure_schema().await.unwrap();

  let all = s.read_all().await.unwrap();
  assert_eq!(all.len(), 1);
  assert_eq!(all[0].id, 1);
}

// ─── Close ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn close_twice_is_ok() {
  let s = store().await;
  s.close().await.unwrap();
  s.close().await.unwrap();
}

#[tokio::test]
async fn reads_after_close_fail() {
  let s = store().await;
  s.close().await.unwrap();
  let err = s.read_all().await.unwrap_err();
  assert!(matches!(err, crate::Error::Database(_)));
}

// ─── Persistence and isolation ───────────────────────────────────────────────

#[tokio::test]
async fn records_persist_across_reopen() {
  let dir = tempfile::tempdir().unwrap();
  let stores = StoreDirectory::new(dir.path());
  let alice = IdentityKey::parse("alice").unwrap();

  let s = stores.open(&alice).await.unwrap();
  s.append(new_match(GameMode::Duos, 3, 1500, 1)).await.unwrap();
  s.close().await.unwrap();

  let reopened = stores.open(&alice).await.unwrap();
  let all = reopened.read_all().await.unwrap();
  assert_eq!(all.len(), 1);

  // Ids keep counting from where the previous session stopped.
  let id = reopened
    .append(new_match(GameMode::Solo, 0, 50, 2))
    .await
    .unwrap();
  assert_eq!(id, 2);
  reopened.close().await.unwrap();
}

#[tokio::test]
async fn identities_have_independent_stores() {
  let dir = tempfile::tempdir().unwrap();
  let stores = StoreDirectory::new(dir.path().join("nested"));
  let alice = stores.open(&IdentityKey::parse("alice").unwrap()).await.unwrap();
  let bob = stores.open(&IdentityKey::parse("bob").unwrap()).await.unwrap();

  alice.append(new_match(GameMode::Squads, 9, 4000, 1)).await.unwrap();
  bob
    .append_batch(vec![
      new_match(GameMode::Solo, 1, 100, 2),
      new_match(GameMode::Solo, 2, 200, 3),
    ])
    .await
    .unwrap();

  let alice_all = alice.read_all().await.unwrap();
  let bob_all = bob.read_all().await.unwrap();
  assert_eq!(alice_all.len(), 1);
  assert_eq!(alice_all[0].mode, GameMode::Squads);
  assert_eq!(bob_all.len(), 2);
  assert!(bob_all.iter().all(|r| r.mode == GameMode::Solo));
  assert_eq!(bob_all[0].id, 1);

  alice.close().await.unwrap();
  bob.close().await.unwrap();
}

#[tokio::test]
async fn legacy_table_without_constraints_is_readable() {
  let dir = tempfile::tempdir().unwrap();
  let path = dir.path().join("legacy.db");
  {
    let conn = rusqlite::Connection::open(&path).unwrap();
    conn
      .execute_batch(
        "CREATE TABLE matches (
           id INTEGER PRIMARY KEY AUTOINCREMENT,
           mode TEXT, kills INTEGER, score INTEGER, match_date TEXT
         );
         INSERT INTO matches (mode, kills, score, match_date)
         VALUES ('Trios', 4, 800, '2023-12-31');",
      )
      .unwrap();
  }

  let s = SqliteStore::open(&path).await.unwrap();
  let all = s.read_all().await.unwrap();
  assert_eq!(all.len(), 1);
  assert_eq!(all[0].mode, GameMode::Trios);
  assert_eq!(
    all[0].match_date,
    NaiveDate::from_ymd_opt(2023, 12, 31).unwrap()
  );
  s.close().await.unwrap();
}
