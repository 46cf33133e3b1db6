// storefront/src/auth.rs

//! Password hashing and verification for stored user credentials.

use crate::error::StoreError;
use argon2::{
  password_hash::{
    rand_core::OsRng, // salt source
    PasswordHash,
    PasswordHasher,
    PasswordVerifier,
    SaltString,
  },
  Argon2,
};
use tracing::{debug, error, instrument};

/// Hashes a plain-text password with Argon2 and a fresh random salt.
///
/// Returns the PHC-formatted hash string, or `StoreError::Auth` if the
/// password is empty or hashing fails.
#[instrument(name = "auth::hash_password", skip(password), err(Display))]
pub fn hash_password(password: &str) -> Result<String, StoreError> {
  if password.is_empty() {
    return Err(StoreError::Auth("Password cannot be empty for hashing.".to_string()));
  }

  let salt = SaltString::generate(&mut OsRng);
  match Argon2::default().hash_password(password.as_bytes(), &salt) {
    Ok(hash) => {
      debug!("Password hashed.");
      Ok(hash.to_string())
    }
    Err(argon_err) => {
      error!(error = %argon_err, "Argon2 password hashing failed.");
      Err(StoreError::Auth(format!("Password hashing failed: {}", argon_err)))
    }
  }
}

/// Checks `provided_password` against a stored Argon2 hash.
///
/// `Ok(false)` means the password does not match. An unparsable stored hash
/// is an error, not a mismatch.
#[instrument(name = "auth::verify_password", skip_all, err(Display))]
pub fn verify_password(stored_hash: &str, provided_password: &str) -> Result<bool, StoreError> {
  if provided_password.is_empty() {
    return Ok(false);
  }

  let parsed_hash = PasswordHash::new(stored_hash).map_err(|parse_err| {
    error!(error = %parse_err, "Stored password hash is malformed.");
    StoreError::Auth(format!("Invalid stored password hash: {}", parse_err))
  })?;

  match Argon2::default().verify_password(provided_password.as_bytes(), &parsed_hash) {
    Ok(()) => Ok(true),
    Err(argon2::password_hash::Error::Password) => {
      debug!("Password mismatch.");
      Ok(false)
    }
    Err(other) => {
      error!(error = %other, "Argon2 password verification failed.");
      Err(StoreError::Auth(format!("Password verification failed: {}", other)))
    }
  }
}

/// Opaque session token handed out on sign-in and sign-up.
pub fn issue_session_token(user_id: i64) -> String {
  format!("session_{}_{}", user_id, uuid::Uuid::new_v4().simple())
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn hash_then_verify() {
    let hash = hash_password("12345678").unwrap();
    assert_ne!(hash, "12345678");
    assert!(verify_password(&hash, "12345678").unwrap());
    assert!(!verify_password(&hash, "87654321").unwrap());
    assert!(!verify_password(&hash, "").unwrap());
  }

  #[test]
  fn empty_password_is_rejected_for_hashing() {
    assert!(matches!(hash_password(""), Err(StoreError::Auth(_))));
  }

  #[test]
  fn malformed_hash_is_an_error() {
    assert!(matches!(verify_password("not-a-hash", "12345678"), Err(StoreError::Auth(_))));
  }

  #[test]
  fn tokens_are_unique_per_issue() {
    let a = issue_session_token(1);
    let b = issue_session_token(1);
    assert!(a.starts_with("session_1_"));
    assert_ne!(a, b);
  }
}
