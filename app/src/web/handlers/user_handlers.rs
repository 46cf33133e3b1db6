// storefront_app/src/web/handlers/user_handlers.rs

use actix_web::http::StatusCode;
use actix_web::{web, HttpResponse};
use tracing::instrument;

use super::respond;
use crate::state::AppState;

#[instrument(name = "handler::get_logged_user", skip(app_state))]
pub async fn get_logged_user_handler(app_state: web::Data<AppState>, path: web::Path<i64>) -> HttpResponse {
  let user_id = path.into_inner();
  respond(app_state.users.get_logged_user(user_id).await, StatusCode::BAD_REQUEST)
}

#[instrument(name = "handler::orders_history", skip(app_state))]
pub async fn orders_history_handler(app_state: web::Data<AppState>, path: web::Path<i64>) -> HttpResponse {
  let user_id = path.into_inner();
  respond(app_state.products.get_orders_history(user_id).await, StatusCode::BAD_REQUEST)
}
