// storefront/src/models/notification.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Notification {
  pub id: i64,
  pub user_id: i64,
  pub title: String,
  pub body: String,
  pub created_at: DateTime<Utc>,
  pub is_read: bool,
}
