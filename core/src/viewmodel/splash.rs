// storefront/src/viewmodel/splash.rs

use super::UiState;
use crate::preferences::Preferences;
use crate::repository::{DataResponse, UserRepository};
use crate::session::SessionContext;
use crate::state::Observable;
use std::sync::Arc;
use tracing::{event, instrument, Level};

/// Startup checks: first launch, and restoring the previous session.
#[derive(Clone)]
pub struct SplashViewModel {
  users: Arc<dyn UserRepository>,
  session: SessionContext,
  preferences: Preferences,
  pub state: Observable<UiState>,
}

impl SplashViewModel {
  pub fn new(users: Arc<dyn UserRepository>, session: SessionContext, preferences: Preferences) -> Self {
    Self {
      users,
      session,
      preferences,
      state: Observable::default(),
    }
  }

  pub fn is_app_launched_before(&self) -> bool {
    self.preferences.is_app_launched_before()
  }

  pub fn logged_user_id(&self) -> Option<i64> {
    self.preferences.logged_user_id()
  }

  pub async fn mark_app_launched(&self) {
    if let Err(e) = self.preferences.set_app_launched(true).await {
      event!(Level::WARN, error = %e, "Could not persist app launched flag.");
    }
  }

  /// Restores the session for `user_id` if that user still exists, then calls
  /// `on_check_finish` whatever the outcome.
  #[instrument(name = "SplashViewModel::check_logged_user", skip(self, on_check_finish))]
  pub async fn check_logged_user(&self, user_id: i64, on_check_finish: impl FnOnce() + Send) {
    self.state.set(UiState::Loading);
    match self.users.get_logged_user(user_id).await {
      DataResponse::Success(Some(user)) => {
        event!(Level::DEBUG, "Logged user exists; restoring session.");
        self.session.set(user);
        self.state.set(UiState::Success);
      }
      DataResponse::Success(None) => {
        event!(Level::INFO, "Previously logged user is gone.");
        self.state.set(UiState::Success);
      }
      DataResponse::Error(kind) => {
        self.state.set(UiState::failed(kind, crate::error::ErrorKind::Unknown));
      }
    }
    on_check_finish();
  }
}
