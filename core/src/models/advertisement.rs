// storefront/src/models/advertisement.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// What an advertisement points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AdvertisementType {
  Product,
  Store,
}

impl From<i64> for AdvertisementType {
  fn from(raw: i64) -> Self {
    match raw {
      0 => AdvertisementType::Product,
      _ => AdvertisementType::Store,
    }
  }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Advertisement {
  pub id: i64,
  pub image: String,
  /// Id of the advertised product or store, depending on `kind`.
  pub advertised_id: i64,
  #[sqlx(rename = "type")]
  #[serde(rename = "type")]
  pub kind: i64,
}

impl Advertisement {
  pub fn advertisement_type(&self) -> AdvertisementType {
    AdvertisementType::from(self.kind)
  }
}
