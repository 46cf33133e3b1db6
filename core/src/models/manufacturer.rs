// storefront/src/models/manufacturer.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Manufacturer {
  pub id: i64,
  pub name: String,
  /// Asset name of the manufacturer's icon.
  pub icon: String,
}
