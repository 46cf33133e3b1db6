// storefront/src/error.rs
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Failure classification carried by `DataResponse::Error` and `UiState::Error`.
///
/// This is a closed set. Blank-credential validation is not part of it: that
/// check happens in the view model before any repository call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
  /// Connectivity or transport failure (including an unreachable store).
  Network,
  /// Anything that could not be classified.
  Unknown,
}

#[derive(Debug, Error)]
pub enum StoreError {
  #[error("Database error: {0}")]
  Sqlx(#[from] sqlx::Error),

  #[error("Referential integrity violated writing to '{table}': {message}")]
  ReferentialIntegrity { table: &'static str, message: String },

  #[error("Schema migration failed: {0}")]
  Migration(String),

  #[error("Preferences error: {0}")]
  Preferences(String),

  #[error("Credential error: {0}")]
  Auth(String),

  #[error("Payment account for '{provider_id}' has a card number that does not fit the provider")]
  InvalidPaymentAccount { provider_id: String },

  #[error("Cart of user {user_id} is empty")]
  EmptyCart { user_id: i64 },
}

impl StoreError {
  /// Maps a raw sqlx error from a write against `table`, lifting foreign-key
  /// violations into `ReferentialIntegrity`.
  pub(crate) fn from_write(table: &'static str, err: sqlx::Error) -> Self {
    if let sqlx::Error::Database(db_err) = &err {
      if db_err.is_foreign_key_violation() || db_err.message().contains("FOREIGN KEY constraint failed") {
        return StoreError::ReferentialIntegrity {
          table,
          message: db_err.message().to_string(),
        };
      }
    }
    StoreError::Sqlx(err)
  }

  /// Classification used when this error crosses the repository boundary.
  pub fn kind(&self) -> ErrorKind {
    match self {
      StoreError::Sqlx(sqlx::Error::Io(_))
      | StoreError::Sqlx(sqlx::Error::PoolTimedOut)
      | StoreError::Sqlx(sqlx::Error::PoolClosed)
      | StoreError::Sqlx(sqlx::Error::WorkerCrashed) => ErrorKind::Network,
      _ => ErrorKind::Unknown,
    }
  }
}

impl From<serde_json::Error> for StoreError {
  fn from(err: serde_json::Error) -> Self {
    StoreError::Preferences(err.to_string())
  }
}

impl From<std::io::Error> for StoreError {
  fn from(err: std::io::Error) -> Self {
    StoreError::Preferences(err.to_string())
  }
}

pub type StoreResult<T, E = StoreError> = std::result::Result<T, E>;
