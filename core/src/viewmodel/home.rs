// storefront/src/viewmodel/home.rs

use super::UiState;
use crate::error::ErrorKind;
use crate::models::{Advertisement, Manufacturer, Product};
use crate::repository::{DataResponse, ProductsRepository};
use crate::state::Observable;
use futures_util::future::join3;
use std::sync::Arc;
use tracing::instrument;

/// Home screen: products, manufacturers and advertisement banners.
#[derive(Clone)]
pub struct HomeViewModel {
  products: Arc<dyn ProductsRepository>,
  pub state: Observable<UiState>,
  pub catalog: Observable<Vec<Product>>,
  pub manufacturers: Observable<Vec<Manufacturer>>,
  pub advertisements: Observable<Vec<Advertisement>>,
}

impl HomeViewModel {
  pub fn new(products: Arc<dyn ProductsRepository>) -> Self {
    Self {
      products,
      state: Observable::default(),
      catalog: Observable::default(),
      manufacturers: Observable::default(),
      advertisements: Observable::default(),
    }
  }

  /// Loads the three lists concurrently. Published only if all succeed; the
  /// first failure decides the error state.
  #[instrument(name = "HomeViewModel::load", skip(self))]
  pub async fn load(&self) {
    self.state.set(UiState::Loading);
    let (products, manufacturers, advertisements) = join3(
      self.products.get_products(),
      self.products.get_manufacturers(),
      self.products.get_advertisements(),
    )
    .await;

    match (products, manufacturers, advertisements) {
      (DataResponse::Success(products), DataResponse::Success(manufacturers), DataResponse::Success(ads)) => {
        self.catalog.set(products.unwrap_or_default());
        self.manufacturers.set(manufacturers.unwrap_or_default());
        self.advertisements.set(ads.unwrap_or_default());
        self.state.set(UiState::Success);
      }
      (DataResponse::Error(kind), _, _) | (_, DataResponse::Error(kind), _) | (_, _, DataResponse::Error(kind)) => {
        self.state.set(UiState::failed(kind, ErrorKind::Unknown));
      }
    }
  }
}
