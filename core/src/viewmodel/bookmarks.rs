// storefront/src/viewmodel/bookmarks.rs

use super::UiState;
use crate::models::Product;
use crate::repository::ProductsRepository;
use crate::state::Observable;
use futures_util::StreamExt;
use std::sync::Arc;
use tracing::{event, instrument, Level};

#[derive(Clone)]
pub struct BookmarkViewModel {
  products: Arc<dyn ProductsRepository>,
  pub state: Observable<UiState>,
  pub items: Observable<Vec<Product>>,
}

impl BookmarkViewModel {
  pub fn new(products: Arc<dyn ProductsRepository>) -> Self {
    Self {
      products,
      state: Observable::default(),
      items: Observable::default(),
    }
  }

  /// Follows the user's bookmark snapshots, applying each one as it arrives.
  /// Does nothing if items are already held. The subscription never ends on
  /// its own, so run this on its own task.
  #[instrument(name = "BookmarkViewModel::load_bookmarks", skip(self))]
  pub async fn load_bookmarks(&self, user_id: i64) {
    if self.items.read(|items| !items.is_empty()) {
      return;
    }
    self.state.set(UiState::Loading);
    let mut snapshots = self.products.get_local_bookmarks(user_id);
    while let Some(snapshot) = snapshots.next().await {
      self.apply_snapshot(snapshot);
    }
    event!(Level::DEBUG, "Bookmark subscription ended.");
  }

  /// Clear-then-append: the held list is cleared when the snapshot is empty
  /// or shares at least one product with it, then the snapshot is appended.
  pub fn apply_snapshot(&self, snapshot: Vec<Product>) {
    self.items.update(|held| {
      if snapshot.is_empty() || snapshot.iter().any(|product| held.contains(product)) {
        held.clear();
      }
      held.extend(snapshot);
    });
    self.state.set(UiState::Success);
  }
}
