// storefront_app/src/web/routes.rs

use crate::errors::Result;
use crate::state::AppState;
use crate::web::handlers::{auth_handlers, product_handlers, user_handlers};
use actix_web::{web, HttpResponse};
use anyhow::Context;

/// Liveness plus a store round trip.
async fn health_check_handler(app_state: web::Data<AppState>) -> Result<HttpResponse> {
  let schema_version = app_state.store.schema_version().await.context("reading schema version")?;
  Ok(HttpResponse::Ok().json(serde_json::json!({ "status": "ok", "schema_version": schema_version })))
}

pub fn configure_app_routes(cfg: &mut web::ServiceConfig) {
  cfg.service(
    web::scope("/api/v1")
      .route("/health", web::get().to(health_check_handler))
      .service(web::scope("/auth").route("/signin", web::post().to(auth_handlers::signin_handler)))
      .service(
        web::scope("/users")
          .route("/{user_id}", web::get().to(user_handlers::get_logged_user_handler))
          .route("/{user_id}/orders", web::get().to(user_handlers::orders_history_handler)),
      )
      .service(
        web::scope("/products")
          .route("", web::get().to(product_handlers::list_products_handler))
          .route("/{product_id}", web::get().to(product_handlers::get_product_handler)),
      ),
  );
}
