// storefront/src/viewmodel/profile.rs

use crate::models::User;
use crate::preferences::Preferences;
use crate::session::SessionContext;
use tracing::{event, instrument, Level};

#[derive(Clone)]
pub struct ProfileViewModel {
  session: SessionContext,
  preferences: Preferences,
}

impl ProfileViewModel {
  pub fn new(session: SessionContext, preferences: Preferences) -> Self {
    Self { session, preferences }
  }

  pub fn user(&self) -> Option<User> {
    self.session.current()
  }

  /// Ends the session and forgets the persisted user id so the next start
  /// does not restore it.
  #[instrument(name = "ProfileViewModel::logout", skip_all)]
  pub async fn logout(&self, on_logged_out: impl FnOnce() + Send) {
    self.session.clear();
    if let Err(e) = self.preferences.set_logged_user_id(None).await {
      event!(Level::WARN, error = %e, "Could not clear persisted user id.");
    }
    on_logged_out();
  }
}
