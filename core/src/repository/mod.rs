// storefront/src/repository/mod.rs

//! The single entry point a view model calls for each domain.
//!
//! Every operation answers with a [`DataResponse`]. Store failures are caught
//! here and never cross this boundary as `Err`.

mod products;
mod users;

pub use products::LocalProductsRepository;
pub use users::LocalUserRepository;

use crate::error::{ErrorKind, StoreError, StoreResult};
use crate::models::{
  Advertisement, CartItem, Location, Manufacturer, NewUser, Notification, OrderDetails, PaymentOption, Product,
  Review, User,
};
use async_trait::async_trait;
use futures_util::stream::BoxStream;
use serde::{Deserialize, Serialize};
use tracing::{event, Level};

/// Tagged result of a repository call. There is no third variant.
///
/// On the wire this is `{"status":"success","payload":..}` or
/// `{"status":"error","payload":"network"|"unknown"|null}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", content = "payload", rename_all = "snake_case")]
pub enum DataResponse<T> {
  Success(Option<T>),
  /// `None` means the failure was not classified; the caller picks a default.
  Error(Option<ErrorKind>),
}

impl<T> DataResponse<T> {
  pub fn success(value: T) -> Self {
    DataResponse::Success(Some(value))
  }

  pub fn error(kind: ErrorKind) -> Self {
    DataResponse::Error(Some(kind))
  }

  pub fn unclassified() -> Self {
    DataResponse::Error(None)
  }

  pub fn is_success(&self) -> bool {
    matches!(self, DataResponse::Success(_))
  }

  pub fn map<U>(self, f: impl FnOnce(T) -> U) -> DataResponse<U> {
    match self {
      DataResponse::Success(value) => DataResponse::Success(value.map(f)),
      DataResponse::Error(kind) => DataResponse::Error(kind),
    }
  }

  /// Converts a store result, logging and classifying the failure.
  pub fn from_store(operation: &'static str, result: StoreResult<T>) -> Self {
    Self::from_store_optional(operation, result.map(Some))
  }

  /// Like [`from_store`](Self::from_store) for lookups where a missing row is
  /// a successful empty answer.
  pub fn from_store_optional(operation: &'static str, result: StoreResult<Option<T>>) -> Self {
    match result {
      Ok(value) => DataResponse::Success(value),
      Err(e) => {
        let kind = e.kind();
        log_failure(operation, &e, kind);
        DataResponse::Error(Some(kind))
      }
    }
  }
}

fn log_failure(operation: &'static str, err: &StoreError, kind: ErrorKind) {
  event!(Level::ERROR, operation, error = %err, ?kind, "Repository call failed.");
}

#[async_trait]
pub trait UserRepository: Send + Sync {
  /// `Error(None)` for an unknown identity or a wrong password.
  async fn sign_in_user(&self, email_or_phone: &str, password: &str) -> DataResponse<User>;

  /// `Success(None)` when no such user exists.
  async fn get_logged_user(&self, user_id: i64) -> DataResponse<User>;

  /// `Error(None)` when the email or phone is already taken.
  async fn sign_up_user(&self, new_user: NewUser) -> DataResponse<User>;
}

#[async_trait]
pub trait ProductsRepository: Send + Sync {
  async fn get_products(&self) -> DataResponse<Vec<Product>>;

  async fn get_product_details(&self, product_id: i64) -> DataResponse<Product>;

  async fn search_products(&self, query: &str) -> DataResponse<Vec<Product>>;

  async fn get_manufacturers(&self) -> DataResponse<Vec<Manufacturer>>;

  async fn get_advertisements(&self) -> DataResponse<Vec<Advertisement>>;

  /// Snapshots of the user's bookmarked products. The stream starts with the
  /// current snapshot, emits again after every bookmark change, never ends,
  /// and never repeats an identical snapshot back to back. Each call starts
  /// an independent subscription.
  fn get_local_bookmarks(&self, user_id: i64) -> BoxStream<'static, Vec<Product>>;

  /// Adds or removes the bookmark; the payload is the new bookmarked state.
  async fn toggle_bookmark(&self, user_id: i64, product_id: i64) -> DataResponse<bool>;

  async fn get_cart_items(&self, user_id: i64) -> DataResponse<Vec<CartItem>>;

  /// The payload is the user's cart after the change.
  async fn add_to_cart(&self, item: CartItem) -> DataResponse<Vec<CartItem>>;

  async fn remove_from_cart(&self, user_id: i64, product_id: i64) -> DataResponse<Vec<CartItem>>;

  /// Checks out the whole cart. An empty cart is `Error(None)`.
  async fn place_order(&self, user_id: i64, provider_id: &str) -> DataResponse<OrderDetails>;

  async fn get_orders_history(&self, user_id: i64) -> DataResponse<Vec<OrderDetails>>;

  async fn get_notifications(&self, user_id: i64) -> DataResponse<Vec<Notification>>;

  async fn get_payment_options(&self) -> DataResponse<Vec<PaymentOption>>;

  async fn get_user_location(&self, user_id: i64) -> DataResponse<Location>;

  async fn add_review(&self, user_id: i64, product_id: i64, rating: i64, comment: &str) -> DataResponse<Review>;
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde_json::json;

  #[test]
  fn wire_shape_is_status_and_payload() {
    let ok = DataResponse::success(vec![1, 2]);
    assert_eq!(serde_json::to_value(&ok).unwrap(), json!({"status": "success", "payload": [1, 2]}));

    let empty: DataResponse<Vec<i32>> = DataResponse::Success(None);
    assert_eq!(serde_json::to_value(&empty).unwrap(), json!({"status": "success", "payload": null}));

    let err: DataResponse<i32> = DataResponse::error(ErrorKind::Network);
    assert_eq!(serde_json::to_value(&err).unwrap(), json!({"status": "error", "payload": "network"}));

    let parsed: DataResponse<i32> = serde_json::from_value(json!({"status": "error", "payload": null})).unwrap();
    assert_eq!(parsed, DataResponse::unclassified());
  }

  #[test]
  fn store_failures_are_classified() {
    let timed_out: DataResponse<i32> = DataResponse::from_store("op", Err(StoreError::Sqlx(sqlx::Error::PoolTimedOut)));
    assert_eq!(timed_out, DataResponse::error(ErrorKind::Network));

    let missing: DataResponse<i32> = DataResponse::from_store_optional("op", Ok(None));
    assert_eq!(missing, DataResponse::Success(None));
  }

  #[test]
  fn map_keeps_the_tag() {
    assert_eq!(DataResponse::success(2).map(|v| v * 10), DataResponse::success(20));
    let err: DataResponse<i32> = DataResponse::unclassified();
    assert_eq!(err.map(|v| v * 10), DataResponse::unclassified());
  }
}
