//! Identity resolution: turn what the user typed into an [`IdentityKey`].
//!
//! Two modes exist. [`Resolver::Open`] accepts any non-blank username.
//! [`Resolver::Credentials`] accepts only the one configured username, and
//! only with a password matching the configured argon2 hash.

use argon2::{
  Argon2, PasswordHash, PasswordHasher, PasswordVerifier,
  password_hash::SaltString,
};
use flexile_core::identity::IdentityKey;
use rand_core::OsRng;
use serde::Deserialize;

use crate::error::IdentityError;

/// Which login variant is in force.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthMode {
  #[default]
  Open,
  Credentials,
}

/// The single identity accepted in credential mode.
#[derive(Debug, Clone)]
pub struct AuthConfig {
  pub username:      IdentityKey,
  /// PHC string produced by argon2, e.g. `$argon2id$v=19$…`
  pub password_hash: String,
}

#[derive(Debug, Clone)]
pub enum Resolver {
  Open,
  Credentials(AuthConfig),
}

impl Resolver {
  /// Build a credential resolver, rejecting a malformed hash up front rather
  /// than on every login.
  pub fn credentials(
    username: &str,
    password_hash: impl Into<String>,
  ) -> Result<Self, IdentityError> {
    let username = IdentityKey::parse(username)
      .map_err(|_| IdentityError::MissingSetting("auth_username"))?;
    let password_hash = password_hash.into();
    PasswordHash::new(&password_hash)
      .map_err(|e| IdentityError::InvalidPasswordHash(e.to_string()))?;
    Ok(Self::Credentials(AuthConfig { username, password_hash }))
  }

  /// Resolve a login attempt.
  ///
  /// A blank or absent username is never an error in the hard sense: it is
  /// [`IdentityError::Missing`], which callers show as a prompt.
  pub fn resolve(
    &self,
    username: Option<&str>,
    password: Option<&str>,
  ) -> Result<IdentityKey, IdentityError> {
    let identity = username
      .map(IdentityKey::parse)
      .and_then(Result::ok)
      .ok_or(IdentityError::Missing)?;

    match self {
      Self::Open => Ok(identity),
      Self::Credentials(config) => {
        let password = password
          .filter(|p| !p.is_empty())
          .ok_or(IdentityError::MissingPassword)?;
        verify(config, &identity, password)?;
        Ok(identity)
      }
    }
  }
}

fn verify(
  config: &AuthConfig,
  identity: &IdentityKey,
  password: &str,
) -> Result<(), IdentityError> {
  if identity != &config.username {
    return Err(IdentityError::IncorrectCredentials);
  }

  let parsed_hash = PasswordHash::new(&config.password_hash)
    .map_err(|_| IdentityError::IncorrectCredentials)?;

  Argon2::default()
    .verify_password(password.as_bytes(), &parsed_hash)
    .map_err(|_| IdentityError::IncorrectCredentials)
}

/// Produce the argon2 PHC string to put in `auth_password_hash`.
pub fn hash_password(password: &str) -> Result<String, IdentityError> {
  let salt = SaltString::generate(&mut OsRng);
  Argon2::default()
    .hash_password(password.as_bytes(), &salt)
    .map(|hash| hash.to_string())
    .map_err(|e| IdentityError::Hash(e.to_string()))
}
