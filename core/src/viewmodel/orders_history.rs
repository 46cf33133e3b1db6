// storefront/src/viewmodel/orders_history.rs

use super::UiState;
use crate::error::ErrorKind;
use crate::models::OrderDetails;
use crate::repository::{DataResponse, ProductsRepository};
use crate::state::Observable;
use std::sync::Arc;
use tracing::instrument;

#[derive(Clone)]
pub struct OrdersHistoryViewModel {
  products: Arc<dyn ProductsRepository>,
  pub state: Observable<UiState>,
  pub orders: Observable<Vec<OrderDetails>>,
}

impl OrdersHistoryViewModel {
  pub fn new(products: Arc<dyn ProductsRepository>) -> Self {
    Self {
      products,
      state: Observable::default(),
      orders: Observable::default(),
    }
  }

  /// Replaces the held orders with the user's history. An empty or missing
  /// payload is still a success.
  #[instrument(name = "OrdersHistoryViewModel::get_orders", skip(self))]
  pub async fn get_orders(&self, user_id: i64) {
    self.state.set(UiState::Loading);
    match self.products.get_orders_history(user_id).await {
      DataResponse::Success(orders) => {
        self.orders.set(orders.unwrap_or_default());
        self.state.set(UiState::Success);
      }
      DataResponse::Error(kind) => self.state.set(UiState::failed(kind, ErrorKind::Unknown)),
    }
  }
}
