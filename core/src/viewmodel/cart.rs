// storefront/src/viewmodel/cart.rs

use super::UiState;
use crate::error::ErrorKind;
use crate::models::{CartItem, OrderDetails, PaymentOption};
use crate::repository::{DataResponse, ProductsRepository};
use crate::state::Observable;
use futures_util::future::join;
use std::sync::Arc;
use tracing::{event, instrument, Level};

#[derive(Clone)]
pub struct CartViewModel {
  products: Arc<dyn ProductsRepository>,
  pub state: Observable<UiState>,
  pub items: Observable<Vec<CartItem>>,
  pub payment_options: Observable<Vec<PaymentOption>>,
  /// The order produced by the most recent successful checkout.
  pub last_order: Observable<Option<OrderDetails>>,
}

impl CartViewModel {
  pub fn new(products: Arc<dyn ProductsRepository>) -> Self {
    Self {
      products,
      state: Observable::default(),
      items: Observable::default(),
      payment_options: Observable::default(),
      last_order: Observable::default(),
    }
  }

  #[instrument(name = "CartViewModel::load", skip(self))]
  pub async fn load(&self, user_id: i64) {
    self.state.set(UiState::Loading);
    let (items, options) = join(self.products.get_cart_items(user_id), self.products.get_payment_options()).await;
    match (items, options) {
      (DataResponse::Success(items), DataResponse::Success(options)) => {
        self.items.set(items.unwrap_or_default());
        self.payment_options.set(options.unwrap_or_default());
        self.state.set(UiState::Success);
      }
      (DataResponse::Error(kind), _) | (_, DataResponse::Error(kind)) => {
        self.state.set(UiState::failed(kind, ErrorKind::Unknown));
      }
    }
  }

  pub async fn add(&self, item: CartItem) {
    self.state.set(UiState::Loading);
    let response = self.products.add_to_cart(item).await;
    self.apply_cart(response);
  }

  pub async fn remove(&self, user_id: i64, product_id: i64) {
    self.state.set(UiState::Loading);
    let response = self.products.remove_from_cart(user_id, product_id).await;
    self.apply_cart(response);
  }

  /// Places an order for the whole cart. On success the held cart is emptied
  /// and the order is published in `last_order`.
  #[instrument(name = "CartViewModel::checkout", skip(self))]
  pub async fn checkout(&self, user_id: i64, provider_id: &str) {
    self.state.set(UiState::Loading);
    match self.products.place_order(user_id, provider_id).await {
      DataResponse::Success(Some(order)) => {
        event!(Level::INFO, order_id = order.order.id, "Checkout complete.");
        self.items.set(Vec::new());
        self.last_order.set(Some(order));
        self.state.set(UiState::Success);
      }
      DataResponse::Success(None) => self.state.set(UiState::Error(ErrorKind::Unknown)),
      DataResponse::Error(kind) => self.state.set(UiState::failed(kind, ErrorKind::Unknown)),
    }
  }

  fn apply_cart(&self, response: DataResponse<Vec<CartItem>>) {
    match response {
      DataResponse::Success(items) => {
        self.items.set(items.unwrap_or_default());
        self.state.set(UiState::Success);
      }
      DataResponse::Error(kind) => self.state.set(UiState::failed(kind, ErrorKind::Unknown)),
    }
  }
}
