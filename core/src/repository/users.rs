// storefront/src/repository/users.rs

use super::{DataResponse, UserRepository};
use crate::auth;
use crate::error::StoreResult;
use crate::models::{NewUser, User};
use crate::store::LocalStore;
use async_trait::async_trait;
use tracing::{event, instrument, warn, Level};

/// User repository answering from the local store.
#[derive(Debug, Clone)]
pub struct LocalUserRepository {
  store: LocalStore,
}

impl LocalUserRepository {
  pub fn new(store: LocalStore) -> Self {
    Self { store }
  }

  /// `Ok(None)` is a credential mismatch, not a failure.
  async fn authenticate(&self, email_or_phone: &str, password: &str) -> StoreResult<Option<User>> {
    let Some(mut user) = self.store.find_user_by_email_or_phone(email_or_phone).await? else {
      warn!("No user matches the sign-in identity.");
      return Ok(None);
    };
    if !auth::verify_password(&user.password, password)? {
      warn!(user_id = user.user_id, "Password mismatch on sign-in.");
      return Ok(None);
    }
    user.token = auth::issue_session_token(user.user_id);
    self.store.save_user(&user).await?;
    Ok(Some(user))
  }

  async fn register(&self, new_user: &NewUser) -> StoreResult<Option<User>> {
    for identity in [&new_user.email, &new_user.phone] {
      if self.store.find_user_by_email_or_phone(identity).await?.is_some() {
        warn!("Sign-up identity already registered.");
        return Ok(None);
      }
    }
    let password_hash = auth::hash_password(&new_user.password)?;
    let mut user = self.store.insert_new_user(new_user, &password_hash, "").await?;
    user.token = auth::issue_session_token(user.user_id);
    self.store.save_user(&user).await?;
    Ok(Some(user))
  }
}

#[async_trait]
impl UserRepository for LocalUserRepository {
  #[instrument(name = "UserRepository::sign_in_user", skip(self, password))]
  async fn sign_in_user(&self, email_or_phone: &str, password: &str) -> DataResponse<User> {
    match self.authenticate(email_or_phone, password).await {
      Ok(Some(user)) => {
        event!(Level::INFO, user_id = user.user_id, "User signed in.");
        DataResponse::success(user)
      }
      Ok(None) => DataResponse::unclassified(),
      Err(e) => DataResponse::from_store("sign_in_user", Err(e)),
    }
  }

  #[instrument(name = "UserRepository::get_logged_user", skip(self))]
  async fn get_logged_user(&self, user_id: i64) -> DataResponse<User> {
    DataResponse::from_store_optional("get_logged_user", self.store.get_user(user_id).await)
  }

  #[instrument(name = "UserRepository::sign_up_user", skip_all, fields(email = %new_user.email))]
  async fn sign_up_user(&self, new_user: NewUser) -> DataResponse<User> {
    match self.register(&new_user).await {
      Ok(Some(user)) => DataResponse::success(user),
      Ok(None) => DataResponse::unclassified(),
      Err(e) => DataResponse::from_store("sign_up_user", Err(e)),
    }
  }
}
