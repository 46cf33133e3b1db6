// storefront/src/models/bookmark_item.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct BookmarkItem {
  pub user_id: i64,
  pub product_id: i64,
  pub created_at: DateTime<Utc>,
}
