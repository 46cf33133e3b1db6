// storefront/src/models/review.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Review {
  pub id: i64,
  pub user_id: i64,
  pub product_id: i64,
  /// 1 to 5.
  pub rating: i64,
  pub comment: String,
  pub created_at: DateTime<Utc>,
}
