// storefront/src/viewmodel/mod.rs

//! Screen-level state machines a presentation layer binds to.
//!
//! Each operation walks `Idle -> Loading -> Success | Error`. Running an
//! operation again starts over at `Loading` whatever the current state is.
//! State and payloads are published through [`Observable`](crate::state::Observable)
//! cells; subscribe to them to get notified of every transition.

mod bookmarks;
mod cart;
mod home;
mod login;
mod orders_history;
mod profile;
mod search;
mod signup;
mod splash;

pub use bookmarks::BookmarkViewModel;
pub use cart::CartViewModel;
pub use home::HomeViewModel;
pub use login::{LoginViewModel, DEFAULT_LOGIN_DELAY};
pub use orders_history::OrdersHistoryViewModel;
pub use profile::ProfileViewModel;
pub use search::SearchViewModel;
pub use signup::SignupViewModel;
pub use splash::SplashViewModel;

use crate::error::ErrorKind;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UiState {
  /// Nothing attempted yet.
  #[default]
  Idle,
  Loading,
  Success,
  Error(ErrorKind),
}

impl UiState {
  pub fn is_loading(&self) -> bool {
    matches!(self, UiState::Loading)
  }

  /// Error state for an optional classification, falling back to `default`.
  pub fn failed(kind: Option<ErrorKind>, default: ErrorKind) -> Self {
    UiState::Error(kind.unwrap_or(default))
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn starts_idle() {
    assert_eq!(UiState::default(), UiState::Idle);
  }

  #[test]
  fn failed_uses_the_call_site_default() {
    assert_eq!(UiState::failed(None, ErrorKind::Network), UiState::Error(ErrorKind::Network));
    assert_eq!(UiState::failed(Some(ErrorKind::Unknown), ErrorKind::Network), UiState::Error(ErrorKind::Unknown));
  }
}
