// storefront/src/viewmodel/login.rs

use super::UiState;
use crate::error::ErrorKind;
use crate::preferences::Preferences;
use crate::repository::{DataResponse, UserRepository};
use crate::session::SessionContext;
use crate::state::Observable;
use std::sync::Arc;
use std::time::Duration;
use tracing::{event, instrument, Level};

/// Simulated network latency before a sign-in attempt.
pub const DEFAULT_LOGIN_DELAY: Duration = Duration::from_millis(3000);

#[derive(Clone)]
pub struct LoginViewModel {
  users: Arc<dyn UserRepository>,
  session: SessionContext,
  preferences: Preferences,
  login_delay: Duration,
  pub state: Observable<UiState>,
  pub email_or_phone: Observable<String>,
  pub password: Observable<String>,
}

impl LoginViewModel {
  pub fn new(users: Arc<dyn UserRepository>, session: SessionContext, preferences: Preferences) -> Self {
    Self {
      users,
      session,
      preferences,
      login_delay: DEFAULT_LOGIN_DELAY,
      state: Observable::default(),
      email_or_phone: Observable::default(),
      password: Observable::default(),
    }
  }

  pub fn with_login_delay(mut self, delay: Duration) -> Self {
    self.login_delay = delay;
    self
  }

  pub fn update_email_or_phone(&self, value: impl Into<String>) {
    self.email_or_phone.set(value.into());
  }

  pub fn update_password(&self, value: impl Into<String>) {
    self.password.set(value.into());
  }

  /// Signs in with the given credentials.
  ///
  /// Blank input fails immediately without touching the repository or the
  /// state. Otherwise the state goes to `Loading`, and after the login delay
  /// to `Success` (session populated, user id persisted) or `Error`.
  #[instrument(name = "LoginViewModel::authenticate_user", skip_all)]
  pub async fn authenticate_user(
    &self,
    email_or_phone: &str,
    password: &str,
    on_authenticated: impl FnOnce() + Send,
    on_authentication_failed: impl FnOnce() + Send,
  ) {
    if email_or_phone.trim().is_empty() || password.trim().is_empty() {
      event!(Level::DEBUG, "Blank credentials; sign-in not attempted.");
      on_authentication_failed();
      return;
    }

    self.state.set(UiState::Loading);
    tokio::time::sleep(self.login_delay).await;

    match self.users.sign_in_user(email_or_phone, password).await {
      DataResponse::Success(Some(user)) => {
        let user_id = user.user_id;
        self.session.set(user);
        if let Err(e) = self.preferences.set_logged_user_id(Some(user_id)).await {
          event!(Level::WARN, user_id, error = %e, "Could not persist logged user id.");
        }
        self.state.set(UiState::Success);
        on_authenticated();
      }
      DataResponse::Success(None) => {
        event!(Level::WARN, "Sign-in succeeded without a user.");
        self.state.set(UiState::Error(ErrorKind::Unknown));
        on_authentication_failed();
      }
      DataResponse::Error(kind) => {
        self.state.set(UiState::failed(kind, ErrorKind::Network));
        on_authentication_failed();
      }
    }
  }
}
