// storefront/src/models/product.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A catalog product. `sizes` and `colors` live in their own tables and are
/// filled in by the store after the product row is read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Product {
  pub id: i64,
  pub name: String,
  pub image: String,
  pub price: f64,
  pub description: String,
  pub manufacturer_id: i64,
  pub basic_color_name: String,
  #[sqlx(skip)]
  #[serde(default)]
  pub sizes: Vec<ProductSize>,
  #[sqlx(skip)]
  #[serde(default)]
  pub colors: Vec<ProductColor>,
}

impl Product {
  /// Replaces the variant lists, rebinding every variant to this product's id.
  pub fn with_variants(mut self, sizes: &[i64], colors: &[&str]) -> Self {
    self.sizes = sizes
      .iter()
      .map(|size_value| ProductSize {
        product_id: self.id,
        size_value: *size_value,
      })
      .collect();
    self.colors = colors
      .iter()
      .map(|color_name| ProductColor {
        product_id: self.id,
        color_name: (*color_name).to_string(),
      })
      .collect();
    self
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct ProductSize {
  pub product_id: i64,
  pub size_value: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct ProductColor {
  pub product_id: i64,
  pub color_name: String,
}
