// storefront/src/repository/products.rs

use super::{DataResponse, ProductsRepository};
use crate::error::StoreError;
use crate::models::{
  Advertisement, CartItem, Location, Manufacturer, Notification, OrderDetails, PaymentOption, Product, Review,
};
use crate::state::distinct_until_changed;
use crate::store::schema::Table;
use crate::store::LocalStore;
use async_trait::async_trait;
use futures_util::stream::{self, BoxStream, StreamExt};
use tracing::{event, instrument, Level};

/// Catalog, cart, bookmark and order repository answering from the local store.
#[derive(Debug, Clone)]
pub struct LocalProductsRepository {
  store: LocalStore,
}

impl LocalProductsRepository {
  pub fn new(store: LocalStore) -> Self {
    Self { store }
  }
}

#[async_trait]
impl ProductsRepository for LocalProductsRepository {
  #[instrument(name = "ProductsRepository::get_products", skip(self))]
  async fn get_products(&self) -> DataResponse<Vec<Product>> {
    DataResponse::from_store("get_products", self.store.get_products().await)
  }

  #[instrument(name = "ProductsRepository::get_product_details", skip(self))]
  async fn get_product_details(&self, product_id: i64) -> DataResponse<Product> {
    DataResponse::from_store_optional("get_product_details", self.store.get_product(product_id).await)
  }

  #[instrument(name = "ProductsRepository::search_products", skip(self))]
  async fn search_products(&self, query: &str) -> DataResponse<Vec<Product>> {
    DataResponse::from_store("search_products", self.store.search_products(query).await)
  }

  async fn get_manufacturers(&self) -> DataResponse<Vec<Manufacturer>> {
    DataResponse::from_store("get_manufacturers", self.store.get_manufacturers().await)
  }

  async fn get_advertisements(&self) -> DataResponse<Vec<Advertisement>> {
    DataResponse::from_store("get_advertisements", self.store.get_advertisements().await)
  }

  fn get_local_bookmarks(&self, user_id: i64) -> BoxStream<'static, Vec<Product>> {
    let store = self.store.clone();
    let changes = store.observe(Table::BookmarkItems);

    let snapshots = stream::unfold((store, changes, true), move |(store, mut changes, first)| async move {
      let mut wait = !first;
      loop {
        if wait && changes.changed().await.is_err() {
          return None;
        }
        wait = true;
        changes.borrow_and_update();
        match store.get_bookmarked_products(user_id).await {
          Ok(products) => return Some((products, (store, changes, false))),
          Err(e) => event!(Level::WARN, user_id, error = %e, "Bookmark snapshot query failed; waiting for next change."),
        }
      }
    });

    distinct_until_changed(snapshots).boxed()
  }

  #[instrument(name = "ProductsRepository::toggle_bookmark", skip(self))]
  async fn toggle_bookmark(&self, user_id: i64, product_id: i64) -> DataResponse<bool> {
    DataResponse::from_store("toggle_bookmark", self.store.toggle_bookmark(user_id, product_id).await)
  }

  async fn get_cart_items(&self, user_id: i64) -> DataResponse<Vec<CartItem>> {
    DataResponse::from_store("get_cart_items", self.store.get_cart_items(user_id).await)
  }

  #[instrument(name = "ProductsRepository::add_to_cart", skip(self))]
  async fn add_to_cart(&self, item: CartItem) -> DataResponse<Vec<CartItem>> {
    let result = match self.store.add_cart_item(&item).await {
      Ok(()) => self.store.get_cart_items(item.user_id).await,
      Err(e) => Err(e),
    };
    DataResponse::from_store("add_to_cart", result)
  }

  #[instrument(name = "ProductsRepository::remove_from_cart", skip(self))]
  async fn remove_from_cart(&self, user_id: i64, product_id: i64) -> DataResponse<Vec<CartItem>> {
    let result = match self.store.remove_cart_item(user_id, product_id).await {
      Ok(_) => self.store.get_cart_items(user_id).await,
      Err(e) => Err(e),
    };
    DataResponse::from_store("remove_from_cart", result)
  }

  #[instrument(name = "ProductsRepository::place_order", skip(self))]
  async fn place_order(&self, user_id: i64, provider_id: &str) -> DataResponse<OrderDetails> {
    match self.store.insert_order(user_id, provider_id).await {
      Err(StoreError::EmptyCart { .. }) => {
        event!(Level::WARN, user_id, "Checkout attempted with an empty cart.");
        DataResponse::unclassified()
      }
      result => DataResponse::from_store("place_order", result),
    }
  }

  #[instrument(name = "ProductsRepository::get_orders_history", skip(self))]
  async fn get_orders_history(&self, user_id: i64) -> DataResponse<Vec<OrderDetails>> {
    DataResponse::from_store("get_orders_history", self.store.get_orders_history(user_id).await)
  }

  async fn get_notifications(&self, user_id: i64) -> DataResponse<Vec<Notification>> {
    DataResponse::from_store("get_notifications", self.store.get_notifications(user_id).await)
  }

  async fn get_payment_options(&self) -> DataResponse<Vec<PaymentOption>> {
    DataResponse::from_store("get_payment_options", self.store.get_payment_options().await)
  }

  async fn get_user_location(&self, user_id: i64) -> DataResponse<Location> {
    DataResponse::from_store_optional("get_user_location", self.store.get_location(user_id).await)
  }

  #[instrument(name = "ProductsRepository::add_review", skip(self, comment))]
  async fn add_review(&self, user_id: i64, product_id: i64, rating: i64, comment: &str) -> DataResponse<Review> {
    if !(1..=5).contains(&rating) {
      event!(Level::WARN, rating, "Review rating out of range.");
      return DataResponse::unclassified();
    }
    DataResponse::from_store("add_review", self.store.insert_review(user_id, product_id, rating, comment).await)
  }
}
