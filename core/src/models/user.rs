// storefront/src/models/user.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct User {
  pub user_id: i64,
  pub name: String,
  /// Asset name of the profile picture.
  pub profile: String,
  pub phone: String,
  pub email: String,
  /// Argon2 hash of the user's password. Never sent over the wire.
  #[serde(skip_serializing, default)]
  pub password: String,
  pub token: String,
}

/// Sign-up input. The password is plain text until the repository hashes it.
#[derive(Debug, Clone, Deserialize)]
pub struct NewUser {
  pub name: String,
  pub phone: String,
  pub email: String,
  pub password: String,
}
