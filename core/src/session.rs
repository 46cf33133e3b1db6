// storefront/src/session.rs

//! The current logged-in identity, passed explicitly to whoever needs it.
//!
//! Lifecycle: empty at process start; set on successful sign-in or when a
//! previously logged-in user is restored at startup; cleared on logout.

use crate::models::User;
use parking_lot::{MappedRwLockReadGuard, RwLock, RwLockReadGuard};
use std::sync::Arc;
use tracing::{event, Level};

/// Shared session holder. Clones refer to the same session.
///
/// Guards returned by `map_read` are blocking locks and must be dropped
/// before any `.await`.
#[derive(Debug, Clone, Default)]
pub struct SessionContext(Arc<RwLock<Option<User>>>);

impl SessionContext {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn set(&self, user: User) {
    event!(Level::INFO, user_id = user.user_id, "Session started.");
    *self.0.write() = Some(user);
  }

  /// Ends the session. Returns the user that was logged in, if any.
  pub fn clear(&self) -> Option<User> {
    let previous = self.0.write().take();
    if let Some(user) = &previous {
      event!(Level::INFO, user_id = user.user_id, "Session cleared.");
    }
    previous
  }

  pub fn current(&self) -> Option<User> {
    self.0.read().clone()
  }

  pub fn user_id(&self) -> Option<i64> {
    self.0.read().as_ref().map(|user| user.user_id)
  }

  pub fn is_logged_in(&self) -> bool {
    self.0.read().is_some()
  }

  /// Borrows part of the logged-in user without cloning it.
  pub fn map_read<U: ?Sized>(&self, f: impl FnOnce(&User) -> &U) -> Option<MappedRwLockReadGuard<'_, U>> {
    RwLockReadGuard::try_map(self.0.read(), |session| session.as_ref().map(f)).ok()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn user(id: i64) -> User {
    User {
      user_id: id,
      name: "User".into(),
      profile: "user".into(),
      phone: "+100".into(),
      email: "u@example.com".into(),
      password: String::new(),
      token: "t".into(),
    }
  }

  #[test]
  fn empty_at_start() {
    let session = SessionContext::new();
    assert!(!session.is_logged_in());
    assert_eq!(session.user_id(), None);
    assert!(session.map_read(|u| u.email.as_str()).is_none());
  }

  #[test]
  fn set_read_clear() {
    let session = SessionContext::new();
    let shared = session.clone();
    session.set(user(7));
    assert_eq!(shared.user_id(), Some(7));
    assert_eq!(&*shared.map_read(|u| u.email.as_str()).unwrap(), "u@example.com");
    assert_eq!(shared.clear().map(|u| u.user_id), Some(7));
    assert!(!session.is_logged_in());
    assert!(session.clear().is_none());
  }
}
