// core/examples/seed_catalog.rs

use std::sync::Arc;
use std::time::Duration;
use storefront::store::catalog::{DEMO_USER_EMAIL, DEMO_USER_PASSWORD};
use storefront::viewmodel::{HomeViewModel, LoginViewModel};
use storefront::{
  CatalogSeeder, LocalProductsRepository, LocalStore, LocalUserRepository, Preferences, SessionContext,
  StoreOptions, StoreResult, UiState,
};
use tracing::info;

#[tokio::main]
async fn main() -> StoreResult<()> {
  tracing_subscriber::fmt().with_max_level(tracing::Level::INFO).init();

  info!("--- Seed Catalog Example ---");

  // 1. Open an in-memory store; the seeder fills it because it is new.
  let store = LocalStore::open(StoreOptions::in_memory(), Some(Arc::new(CatalogSeeder))).await?;

  // 2. Wire repositories and shared state by hand.
  let users = Arc::new(LocalUserRepository::new(store.clone()));
  let products = Arc::new(LocalProductsRepository::new(store.clone()));
  let session = SessionContext::new();
  let preferences = Preferences::in_memory();

  // 3. Log in as the demo user.
  let login = LoginViewModel::new(users, session.clone(), preferences).with_login_delay(Duration::from_millis(100));
  login
    .authenticate_user(
      DEMO_USER_EMAIL,
      DEMO_USER_PASSWORD,
      || info!("Authenticated."),
      || info!("Authentication failed."),
    )
    .await;
  info!(state = ?login.state.get(), user = ?session.user_id(), "Login finished.");

  // 4. Load the home screen.
  let home = HomeViewModel::new(products);
  home.load().await;
  if home.state.get() == UiState::Success {
    for product in home.catalog.get() {
      info!(id = product.id, name = %product.name, price = product.price, sizes = product.sizes.len(), "Product");
    }
  }

  store.close().await;
  Ok(())
}
