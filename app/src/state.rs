// storefront_app/src/state.rs

use crate::config::AppConfig;
use crate::errors::Result;
use std::sync::Arc;
use storefront::viewmodel::SplashViewModel;
use storefront::{
  CatalogSeeder, LocalProductsRepository, LocalStore, LocalUserRepository, Preferences, ProductsRepository,
  SessionContext, StoreCallback, StoreOptions, UserRepository,
};
use tracing::{event, instrument, Level};

/// Everything a request handler needs, built once at startup.
#[derive(Clone)]
pub struct AppState {
  pub store: LocalStore,
  pub users: Arc<dyn UserRepository>,
  pub products: Arc<dyn ProductsRepository>,
  pub session: SessionContext,
  pub preferences: Preferences,
  pub config: Arc<AppConfig>,
}

impl AppState {
  /// Opens the store (seeding it on first creation when enabled), loads the
  /// preferences and wires the repositories.
  #[instrument(name = "AppState::build", skip_all, err(Display))]
  pub async fn build(config: AppConfig) -> Result<Self> {
    let callback: Option<Arc<dyn StoreCallback>> = if config.seed_db {
      Some(Arc::new(CatalogSeeder))
    } else {
      None
    };
    let store = LocalStore::open(StoreOptions::from_url(config.database_url.clone()), callback).await?;

    let preferences = match &config.preferences_path {
      Some(path) => Preferences::load(path).await?,
      None => Preferences::in_memory(),
    };

    Ok(Self {
      users: Arc::new(LocalUserRepository::new(store.clone())),
      products: Arc::new(LocalProductsRepository::new(store.clone())),
      store,
      session: SessionContext::new(),
      preferences,
      config: Arc::new(config),
    })
  }

  /// Marks the first launch and restores the previously logged-in user, if any.
  pub async fn restore_session(&self) {
    let splash = SplashViewModel::new(self.users.clone(), self.session.clone(), self.preferences.clone());
    if !splash.is_app_launched_before() {
      event!(Level::INFO, "First launch.");
      splash.mark_app_launched().await;
    }
    if let Some(user_id) = splash.logged_user_id() {
      splash
        .check_logged_user(user_id, || event!(Level::DEBUG, "Logged user check finished."))
        .await;
    }
    match self.session.user_id() {
      Some(user_id) => event!(Level::INFO, user_id, "Session restored."),
      None => event!(Level::INFO, "No session to restore."),
    }
  }
}
