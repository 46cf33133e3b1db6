// storefront_app/src/web/handlers/product_handlers.rs

use actix_web::http::StatusCode;
use actix_web::{web, HttpResponse};
use serde::Deserialize;
use tracing::{info, instrument};

use super::respond;
use crate::state::AppState;

#[derive(Deserialize, Debug)]
pub struct ListProductsQuery {
  /// Optional name filter.
  pub q: Option<String>,
}

#[instrument(name = "handler::list_products", skip(app_state))]
pub async fn list_products_handler(
  app_state: web::Data<AppState>,
  query_params: web::Query<ListProductsQuery>,
) -> HttpResponse {
  let response = match query_params.q.as_deref().map(str::trim).filter(|q| !q.is_empty()) {
    Some(q) => {
      info!(query = q, "Searching products.");
      app_state.products.search_products(q).await
    }
    None => app_state.products.get_products().await,
  };
  respond(response, StatusCode::BAD_REQUEST)
}

#[instrument(name = "handler::get_product", skip(app_state))]
pub async fn get_product_handler(app_state: web::Data<AppState>, path: web::Path<i64>) -> HttpResponse {
  let product_id = path.into_inner();
  respond(app_state.products.get_product_details(product_id).await, StatusCode::BAD_REQUEST)
}
