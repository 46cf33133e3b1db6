// storefront_app/src/web/handlers/mod.rs

pub mod auth_handlers;
pub mod product_handlers;
pub mod user_handlers;

use crate::errors::AppError;
use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse};
use serde::Serialize;
use storefront::{DataResponse, ErrorKind};

/// Writes a repository answer as the response body, picking the status from its tag.
/// `rejected` is used for unclassified errors, whose meaning depends on the route.
pub(crate) fn respond<T: Serialize>(response: DataResponse<T>, rejected: StatusCode) -> HttpResponse {
  let status = match &response {
    DataResponse::Success(Some(_)) => StatusCode::OK,
    DataResponse::Success(None) => StatusCode::NOT_FOUND,
    DataResponse::Error(Some(ErrorKind::Network)) => StatusCode::SERVICE_UNAVAILABLE,
    DataResponse::Error(Some(ErrorKind::Unknown)) => StatusCode::INTERNAL_SERVER_ERROR,
    DataResponse::Error(None) => rejected,
  };
  HttpResponse::build(status).json(response)
}

pub async fn not_found_handler(req: HttpRequest) -> Result<HttpResponse, AppError> {
  Err(AppError::NotFound(format!("No route for {} {}", req.method(), req.path())))
}
