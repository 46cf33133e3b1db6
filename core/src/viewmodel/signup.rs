// storefront/src/viewmodel/signup.rs

use super::UiState;
use crate::error::ErrorKind;
use crate::models::NewUser;
use crate::preferences::Preferences;
use crate::repository::{DataResponse, UserRepository};
use crate::session::SessionContext;
use crate::state::Observable;
use std::sync::Arc;
use tracing::{event, instrument, Level};

#[derive(Clone)]
pub struct SignupViewModel {
  users: Arc<dyn UserRepository>,
  session: SessionContext,
  preferences: Preferences,
  pub state: Observable<UiState>,
}

impl SignupViewModel {
  pub fn new(users: Arc<dyn UserRepository>, session: SessionContext, preferences: Preferences) -> Self {
    Self {
      users,
      session,
      preferences,
      state: Observable::default(),
    }
  }

  /// Registers the user and logs them in. Any blank field fails without a
  /// repository call. A taken email or phone ends in `Error(Unknown)`.
  #[instrument(name = "SignupViewModel::sign_up", skip_all, fields(email = %new_user.email))]
  pub async fn sign_up(&self, new_user: NewUser, on_signed_up: impl FnOnce() + Send, on_failed: impl FnOnce() + Send) {
    let blank = [&new_user.name, &new_user.phone, &new_user.email, &new_user.password]
      .iter()
      .any(|field| field.trim().is_empty());
    if blank {
      event!(Level::DEBUG, "Blank sign-up field; not submitted.");
      on_failed();
      return;
    }

    self.state.set(UiState::Loading);
    match self.users.sign_up_user(new_user).await {
      DataResponse::Success(Some(user)) => {
        let user_id = user.user_id;
        self.session.set(user);
        if let Err(e) = self.preferences.set_logged_user_id(Some(user_id)).await {
          event!(Level::WARN, user_id, error = %e, "Could not persist logged user id.");
        }
        self.state.set(UiState::Success);
        on_signed_up();
      }
      DataResponse::Success(None) => {
        self.state.set(UiState::Error(ErrorKind::Unknown));
        on_failed();
      }
      DataResponse::Error(kind) => {
        self.state.set(UiState::failed(kind, ErrorKind::Unknown));
        on_failed();
      }
    }
  }
}
