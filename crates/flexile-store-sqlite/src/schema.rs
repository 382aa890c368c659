//! SQL schema for the Flexile Llama SQLite store.
//!
//! Executed at connection startup and by `ensure_schema`. The `matches`
//! table layout is compatible with stores created before versioning; later
//! migrations will be gated on `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

-- Append-only. AUTOINCREMENT keeps ids of any removed rows from being reused.
CREATE TABLE IF NOT EXISTS matches (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    mode        TEXT    NOT NULL,   -- 'Solo' | 'Duos' | 'Trios' | 'Squads'
    kills       INTEGER NOT NULL CHECK (kills >= 0),
    score       INTEGER NOT NULL CHECK (score >= 0),
    match_date  TEXT    NOT NULL    -- ISO 8601 date, YYYY-MM-DD
);

PRAGMA user_version = 1;
";

pub const INSERT_MATCH: &str =
  "INSERT INTO matches (mode, kills, score, match_date) VALUES (?1, ?2, ?3, ?4)";

pub const SELECT_ALL: &str =
  "SELECT id, mode, kills, score, match_date FROM matches ORDER BY id ASC";
