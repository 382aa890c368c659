//! Identity keys — the normalised form of a user-supplied username.
//!
//! A key is only ever built through [`IdentityKey::parse`], so holding one
//! proves the identity was non-blank. Storage backends derive the location of
//! a user's store from the key, never from the raw input.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct IdentityKey(String);

impl IdentityKey {
  /// Trim surrounding whitespace and reject blank input. Interior content,
  /// including case, is preserved.
  pub fn parse(raw: &str) -> Result<Self> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
      return Err(Error::BlankIdentity);
    }
    Ok(Self(trimmed.to_owned()))
  }

  pub fn as_str(&self) -> &str { &self.0 }
}

impl fmt::Display for IdentityKey {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(&self.0) }
}

impl FromStr for IdentityKey {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self> { Self::parse(s) }
}

impl TryFrom<String> for IdentityKey {
  type Error = Error;

  fn try_from(s: String) -> Result<Self> { Self::parse(&s) }
}

impl From<IdentityKey> for String {
  fn from(key: IdentityKey) -> Self { key.0 }
}
