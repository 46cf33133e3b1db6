// storefront_app/src/errors.rs

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use storefront::{DataResponse, ErrorKind, StoreError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
  #[error("Configuration Error: {0}")]
  Config(String),

  #[error("Store Error: {0}")]
  Store(#[from] StoreError),

  #[error("Resource Not Found: {0}")]
  NotFound(String),

  #[error("Internal Server Error: {0}")]
  Internal(String),
}

// Handlers attach context with anyhow; keep store failures classifiable.
impl From<anyhow::Error> for AppError {
  fn from(err: anyhow::Error) -> Self {
    match err.downcast::<StoreError>() {
      Ok(store_err) => AppError::Store(store_err),
      Err(other) => AppError::Internal(format!("{:#}", other)),
    }
  }
}

impl AppError {
  fn kind(&self) -> Option<ErrorKind> {
    match self {
      AppError::Store(e) => Some(e.kind()),
      AppError::NotFound(_) => None,
      AppError::Config(_) | AppError::Internal(_) => Some(ErrorKind::Unknown),
    }
  }
}

// Errors go out in the same tagged shape as every other response.
impl ResponseError for AppError {
  fn status_code(&self) -> StatusCode {
    match self {
      AppError::NotFound(_) => StatusCode::NOT_FOUND,
      AppError::Store(e) if e.kind() == ErrorKind::Network => StatusCode::SERVICE_UNAVAILABLE,
      _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
  }

  fn error_response(&self) -> HttpResponse {
    tracing::error!(application_error = %self, "Responding with error");
    HttpResponse::build(self.status_code()).json(DataResponse::<()>::Error(self.kind()))
  }
}

pub type Result<T, E = AppError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
  use super::*;
  use anyhow::Context;

  #[test]
  fn anyhow_keeps_store_errors() {
    let wrapped: anyhow::Result<()> = Err(StoreError::Preferences("disk full".into())).context("saving preferences");
    let err: AppError = wrapped.unwrap_err().into();
    assert!(matches!(err, AppError::Store(StoreError::Preferences(_))));
    assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);

    let other: AppError = anyhow::anyhow!("boom").into();
    assert!(matches!(other, AppError::Internal(_)));
  }

  #[test]
  fn not_found_is_unclassified() {
    let err = AppError::NotFound("x".into());
    assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
    assert_eq!(err.kind(), None);
  }
}
