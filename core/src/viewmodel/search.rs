// storefront/src/viewmodel/search.rs

use super::UiState;
use crate::error::ErrorKind;
use crate::models::Product;
use crate::repository::{DataResponse, ProductsRepository};
use crate::state::Observable;
use std::sync::Arc;
use tracing::instrument;

#[derive(Clone)]
pub struct SearchViewModel {
  products: Arc<dyn ProductsRepository>,
  pub state: Observable<UiState>,
  pub query: Observable<String>,
  pub results: Observable<Vec<Product>>,
}

impl SearchViewModel {
  pub fn new(products: Arc<dyn ProductsRepository>) -> Self {
    Self {
      products,
      state: Observable::default(),
      query: Observable::default(),
      results: Observable::default(),
    }
  }

  /// A blank query resets to `Idle` with no results.
  #[instrument(name = "SearchViewModel::search", skip(self))]
  pub async fn search(&self, query: &str) {
    self.query.set(query.to_string());
    let query = query.trim();
    if query.is_empty() {
      self.results.set(Vec::new());
      self.state.set(UiState::Idle);
      return;
    }

    self.state.set(UiState::Loading);
    match self.products.search_products(query).await {
      DataResponse::Success(found) => {
        self.results.set(found.unwrap_or_default());
        self.state.set(UiState::Success);
      }
      DataResponse::Error(kind) => self.state.set(UiState::failed(kind, ErrorKind::Unknown)),
    }
  }
}
