// storefront/src/models/location.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Location {
  pub id: i64,
  pub user_id: i64,
  pub address: String,
  pub city: String,
  pub country: String,
}
