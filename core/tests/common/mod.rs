// tests/common/mod.rs
#![allow(dead_code)] // Not every test binary uses every helper

use async_trait::async_trait;
use futures_util::stream::{self, BoxStream, StreamExt};
use once_cell::sync::Lazy;
use parking_lot::Mutex;
use std::path::PathBuf;
use std::sync::{
  atomic::{AtomicUsize, Ordering},
  Arc,
};
use storefront::models::{
  Advertisement, CartItem, Location, Manufacturer, NewUser, Notification, OrderDetails, PaymentOption, Product,
  Review, User,
};
use storefront::{
  CatalogSeeder, DataResponse, LocalStore, ProductsRepository, StoreCallback, StoreOptions, UserRepository,
};
use tracing::Level;

// --- Tracing ---
static TRACING_INIT: Lazy<()> = Lazy::new(|| {
  tracing_subscriber::fmt()
    .with_max_level(Level::DEBUG)
    .with_test_writer()
    .try_init()
    .ok();
});

pub fn setup_tracing() {
  Lazy::force(&TRACING_INIT);
}

// --- Stores ---
pub async fn seeded_store() -> LocalStore {
  LocalStore::open(StoreOptions::in_memory(), Some(Arc::new(CatalogSeeder)))
    .await
    .expect("in-memory store should open")
}

pub async fn empty_store() -> LocalStore {
  LocalStore::open(StoreOptions::in_memory(), None)
    .await
    .expect("in-memory store should open")
}

/// A fresh database file path under the system temp dir.
pub fn temp_db_path() -> PathBuf {
  std::env::temp_dir().join(format!("storefront_test_{}.db", uuid::Uuid::new_v4().simple()))
}

pub fn remove_db_files(path: &PathBuf) {
  for suffix in ["", "-wal", "-shm", "-journal"] {
    let mut file = path.clone().into_os_string();
    file.push(suffix);
    std::fs::remove_file(file).ok();
  }
}

/// Counts how often the first-creation hook fires.
#[derive(Debug, Default)]
pub struct CountingCallback {
  pub created: AtomicUsize,
}

#[async_trait]
impl StoreCallback for CountingCallback {
  async fn on_create(&self, store: &LocalStore) {
    self.created.fetch_add(1, Ordering::SeqCst);
    CatalogSeeder.on_create(store).await;
  }
}

// --- Fixtures ---
pub fn user(id: i64, email: &str) -> User {
  User {
    user_id: id,
    name: "User".to_string(),
    profile: "user".to_string(),
    phone: format!("+62{}", id),
    email: email.to_string(),
    password: String::new(),
    token: "token".to_string(),
  }
}

pub fn product(id: i64) -> Product {
  Product {
    id,
    name: format!("Product {}", id),
    image: format!("product_{}", id),
    price: 10.0 * id as f64,
    description: String::new(),
    manufacturer_id: 1,
    basic_color_name: "red".to_string(),
    sizes: Vec::new(),
    colors: Vec::new(),
  }
}

pub fn new_user(email: &str, phone: &str) -> NewUser {
  NewUser {
    name: "New".to_string(),
    phone: phone.to_string(),
    email: email.to_string(),
    password: "secret-pass".to_string(),
  }
}

// --- Fake repositories ---

/// User repository answering with canned responses and counting calls.
pub struct FakeUserRepository {
  pub sign_in_calls: AtomicUsize,
  pub sign_in_response: Mutex<DataResponse<User>>,
  pub logged_user_response: Mutex<DataResponse<User>>,
}

impl FakeUserRepository {
  pub fn new(sign_in_response: DataResponse<User>) -> Arc<Self> {
    Arc::new(Self {
      sign_in_calls: AtomicUsize::new(0),
      sign_in_response: Mutex::new(sign_in_response),
      logged_user_response: Mutex::new(DataResponse::Success(None)),
    })
  }

  pub fn sign_in_calls(&self) -> usize {
    self.sign_in_calls.load(Ordering::SeqCst)
  }
}

#[async_trait]
impl UserRepository for FakeUserRepository {
  async fn sign_in_user(&self, _email_or_phone: &str, _password: &str) -> DataResponse<User> {
    self.sign_in_calls.fetch_add(1, Ordering::SeqCst);
    self.sign_in_response.lock().clone()
  }

  async fn get_logged_user(&self, _user_id: i64) -> DataResponse<User> {
    self.logged_user_response.lock().clone()
  }

  async fn sign_up_user(&self, _new_user: NewUser) -> DataResponse<User> {
    DataResponse::unclassified()
  }
}

/// Products repository with scripted bookmark snapshots and order history.
/// Everything else answers with an empty success.
pub struct FakeProductsRepository {
  pub bookmark_snapshots: Vec<Vec<Product>>,
  pub orders_response: Mutex<DataResponse<Vec<OrderDetails>>>,
  pub orders_calls: AtomicUsize,
}

impl FakeProductsRepository {
  pub fn with_snapshots(bookmark_snapshots: Vec<Vec<Product>>) -> Arc<Self> {
    Arc::new(Self {
      bookmark_snapshots,
      orders_response: Mutex::new(DataResponse::Success(None)),
      orders_calls: AtomicUsize::new(0),
    })
  }

  pub fn with_orders(orders_response: DataResponse<Vec<OrderDetails>>) -> Arc<Self> {
    Arc::new(Self {
      bookmark_snapshots: Vec::new(),
      orders_response: Mutex::new(orders_response),
      orders_calls: AtomicUsize::new(0),
    })
  }
}

#[async_trait]
impl ProductsRepository for FakeProductsRepository {
  async fn get_products(&self) -> DataResponse<Vec<Product>> {
    DataResponse::Success(None)
  }

  async fn get_product_details(&self, _product_id: i64) -> DataResponse<Product> {
    DataResponse::Success(None)
  }

  async fn search_products(&self, _query: &str) -> DataResponse<Vec<Product>> {
    DataResponse::Success(None)
  }

  async fn get_manufacturers(&self) -> DataResponse<Vec<Manufacturer>> {
    DataResponse::Success(None)
  }

  async fn get_advertisements(&self) -> DataResponse<Vec<Advertisement>> {
    DataResponse::Success(None)
  }

  fn get_local_bookmarks(&self, _user_id: i64) -> BoxStream<'static, Vec<Product>> {
    stream::iter(self.bookmark_snapshots.clone()).boxed()
  }

  async fn toggle_bookmark(&self, _user_id: i64, _product_id: i64) -> DataResponse<bool> {
    DataResponse::Success(None)
  }

  async fn get_cart_items(&self, _user_id: i64) -> DataResponse<Vec<CartItem>> {
    DataResponse::Success(None)
  }

  async fn add_to_cart(&self, _item: CartItem) -> DataResponse<Vec<CartItem>> {
    DataResponse::Success(None)
  }

  async fn remove_from_cart(&self, _user_id: i64, _product_id: i64) -> DataResponse<Vec<CartItem>> {
    DataResponse::Success(None)
  }

  async fn place_order(&self, _user_id: i64, _provider_id: &str) -> DataResponse<OrderDetails> {
    DataResponse::Success(None)
  }

  async fn get_orders_history(&self, _user_id: i64) -> DataResponse<Vec<OrderDetails>> {
    self.orders_calls.fetch_add(1, Ordering::SeqCst);
    self.orders_response.lock().clone()
  }

  async fn get_notifications(&self, _user_id: i64) -> DataResponse<Vec<Notification>> {
    DataResponse::Success(None)
  }

  async fn get_payment_options(&self) -> DataResponse<Vec<PaymentOption>> {
    DataResponse::Success(None)
  }

  async fn get_user_location(&self, _user_id: i64) -> DataResponse<Location> {
    DataResponse::Success(None)
  }

  async fn add_review(&self, _user_id: i64, _product_id: i64, _rating: i64, _comment: &str) -> DataResponse<Review> {
    DataResponse::Success(None)
  }
}
