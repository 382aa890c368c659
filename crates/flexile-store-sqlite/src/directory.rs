//! [`StoreDirectory`] — maps identities to their own store files.

use std::path::PathBuf;

use flexile_core::identity::IdentityKey;
use sha2::{Digest, Sha256};

use crate::{Result, SqliteStore};

/// A directory holding one SQLite file per identity.
///
/// File names are the hex SHA-256 of the identity key, so no identity can
/// name a path outside `root` or collide with another identity's file.
#[derive(Debug, Clone)]
pub struct StoreDirectory {
  root: PathBuf,
}

impl StoreDirectory {
  pub fn new(root: impl Into<PathBuf>) -> Self { Self { root: root.into() } }

  /// Where the store for `identity` lives (whether or not it exists yet).
  pub fn store_path(&self, identity: &IdentityKey) -> PathBuf {
    self.root.join(format!("{}.db", file_stem(identity)))
  }

  /// Open the store for `identity`, creating the directory and the store
  /// file on first use.
  pub async fn open(&self, identity: &IdentityKey) -> Result<SqliteStore> {
    tokio::fs::create_dir_all(&self.root).await?;
    SqliteStore::open(self.store_path(identity)).await
  }
}

fn file_stem(identity: &IdentityKey) -> String {
  hex::encode(Sha256::digest(identity.as_str().as_bytes()))
}

#[cfg(test)]
mod tests {
  use std::path::Path;

  use super::*;

  fn key(raw: &str) -> IdentityKey { IdentityKey::parse(raw).unwrap() }

  #[test]
  fn path_is_stable_and_inside_root() {
    let dir = StoreDirectory::new("/data/flexile");
    let path = dir.store_path(&key("alice"));
    assert_eq!(path, dir.store_path(&key("  alice ")));
    assert_eq!(path.parent(), Some(Path::new("/data/flexile")));
    assert_eq!(
      path.file_name().and_then(|n| n.to_str()),
      Some("2bd806c97f0e00af1a1fc3328fa763a9269723c8db8fac4f93af71db186d6e90.db")
    );
  }

  #[test]
  fn hostile_identities_stay_inside_root() {
    let dir = StoreDirectory::new("/data/flexile");
    for raw in ["../../etc/passwd", "/abs", "a/b", "con"] {
      let path = dir.store_path(&key(raw));
      assert_eq!(path.parent(), Some(Path::new("/data/flexile")));
    }
  }

  #[test]
  fn distinct_identities_get_distinct_files() {
    let dir = StoreDirectory::new("/data");
    assert_ne!(dir.store_path(&key("Alice")), dir.store_path(&key("alice")));
  }
}
