// storefront_app/src/web/handlers/auth_handlers.rs

use actix_web::http::StatusCode;
use actix_web::{web, HttpResponse};
use serde::Deserialize;
use storefront::models::User;
use storefront::DataResponse;
use tracing::{info, instrument, warn};

use super::respond;
use crate::state::AppState;

#[derive(Deserialize, Debug)]
pub struct SigninRequestPayload {
  pub email_or_phone: String,
  pub password: String,
}

/// Blank fields are rejected before the repository is asked. Wrong
/// credentials answer 401 with an unclassified error.
#[instrument(
    name = "handler::signin",
    skip(app_state, req_payload),
    fields(identity = %req_payload.email_or_phone)
)]
pub async fn signin_handler(
  app_state: web::Data<AppState>,
  req_payload: web::Json<SigninRequestPayload>,
) -> HttpResponse {
  if req_payload.email_or_phone.trim().is_empty() || req_payload.password.trim().is_empty() {
    warn!("Blank credentials in sign-in request.");
    return HttpResponse::BadRequest().json(DataResponse::<User>::unclassified());
  }

  tokio::time::sleep(app_state.config.login_delay).await;
  let response = app_state
    .users
    .sign_in_user(&req_payload.email_or_phone, &req_payload.password)
    .await;
  if response.is_success() {
    info!("Sign-in succeeded.");
  }
  respond(response, StatusCode::UNAUTHORIZED)
}
