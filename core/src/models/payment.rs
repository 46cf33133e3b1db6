// storefront/src/models/payment.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Provider id of cash on delivery, the only provider without a card number.
pub const CASH_ON_DELIVERY: &str = "cod";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct PaymentProvider {
  pub id: String,
  pub title: String,
  pub icon: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct UserPaymentProvider {
  pub provider_id: String,
  pub card_number: String,
}

impl UserPaymentProvider {
  pub fn requires_card(&self) -> bool {
    self.provider_id != CASH_ON_DELIVERY
  }
}

/// A provider joined with the user's account on it, as shown at checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct PaymentOption {
  pub provider_id: String,
  pub title: String,
  pub icon: String,
  pub card_number: String,
}
