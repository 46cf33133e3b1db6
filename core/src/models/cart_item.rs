// storefront/src/models/cart_item.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct CartItem {
  pub user_id: i64,
  pub product_id: i64,
  pub quantity: i64,
  /// Chosen size variant, if the product has any.
  pub size: Option<i64>,
}
