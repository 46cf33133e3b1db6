// tests/viewmodel_tests.rs
mod common;

use common::*;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use storefront::models::CartItem;
use storefront::store::catalog::{DEMO_USER_EMAIL, DEMO_USER_ID, DEMO_USER_PASSWORD};
use storefront::viewmodel::{
  BookmarkViewModel, CartViewModel, HomeViewModel, LoginViewModel, OrdersHistoryViewModel, ProfileViewModel,
  SearchViewModel, SignupViewModel, SplashViewModel,
};
use storefront::{
  DataResponse, ErrorKind, LocalProductsRepository, LocalUserRepository, Preferences, SessionContext, UiState,
};

fn flag() -> Arc<AtomicBool> {
  Arc::new(AtomicBool::new(false))
}

/// Collects every state a view model publishes, starting with the current one.
fn record_states(state: &storefront::Observable<UiState>) -> tokio::task::JoinHandle<Vec<UiState>> {
  let mut rx = state.subscribe();
  let initial = *rx.borrow_and_update();
  tokio::spawn(async move {
    let mut seen = vec![initial];
    while rx.changed().await.is_ok() {
      let current = *rx.borrow_and_update();
      seen.push(current);
      if matches!(current, UiState::Success | UiState::Error(_)) {
        break;
      }
    }
    seen
  })
}

// --- Login ---

#[tokio::test]
async fn test_blank_credentials_fail_without_repository_call() {
  setup_tracing();
  let users = FakeUserRepository::new(DataResponse::success(user(1, "a@b.c")));
  let vm = LoginViewModel::new(users.clone(), SessionContext::new(), Preferences::in_memory())
    .with_login_delay(Duration::ZERO);

  let (ok, failed) = (flag(), flag());
  for (email, password) in [("", "12345678"), ("   ", "12345678"), ("a@b.c", "")] {
    failed.store(false, Ordering::SeqCst);
    let (ok_c, failed_c) = (ok.clone(), failed.clone());
    vm.authenticate_user(
      email,
      password,
      move || ok_c.store(true, Ordering::SeqCst),
      move || failed_c.store(true, Ordering::SeqCst),
    )
    .await;
    assert!(failed.load(Ordering::SeqCst));
  }

  assert!(!ok.load(Ordering::SeqCst));
  assert_eq!(users.sign_in_calls(), 0);
  assert_eq!(vm.state.get(), UiState::Idle);
}

#[tokio::test]
async fn test_valid_login_goes_idle_loading_success() {
  setup_tracing();
  let store = seeded_store().await;
  let session = SessionContext::new();
  let preferences = Preferences::in_memory();
  let vm = LoginViewModel::new(Arc::new(LocalUserRepository::new(store)), session.clone(), preferences.clone())
    .with_login_delay(Duration::from_millis(10));

  let states = record_states(&vm.state);
  let authenticated = flag();
  let authenticated_c = authenticated.clone();
  vm.authenticate_user(
    DEMO_USER_EMAIL,
    DEMO_USER_PASSWORD,
    move || authenticated_c.store(true, Ordering::SeqCst),
    || panic!("authentication should not fail"),
  )
  .await;

  assert_eq!(states.await.unwrap(), vec![UiState::Idle, UiState::Loading, UiState::Success]);
  assert!(authenticated.load(Ordering::SeqCst));
  assert_eq!(session.user_id(), Some(DEMO_USER_ID));
  assert_eq!(preferences.logged_user_id(), Some(DEMO_USER_ID));
}

#[tokio::test]
async fn test_login_error_without_kind_defaults_to_network() {
  setup_tracing();
  let users = FakeUserRepository::new(DataResponse::unclassified());
  let session = SessionContext::new();
  let vm = LoginViewModel::new(users.clone(), session.clone(), Preferences::in_memory())
    .with_login_delay(Duration::ZERO);

  let failed = flag();
  let failed_c = failed.clone();
  vm.authenticate_user("x@y.z", "pw", || {}, move || failed_c.store(true, Ordering::SeqCst))
    .await;

  assert!(failed.load(Ordering::SeqCst));
  assert_eq!(users.sign_in_calls(), 1);
  assert_eq!(vm.state.get(), UiState::Error(ErrorKind::Network));
  assert!(!session.is_logged_in());
}

#[tokio::test]
async fn test_login_success_without_user_is_an_error() {
  setup_tracing();
  let users = FakeUserRepository::new(DataResponse::Success(None));
  let vm = LoginViewModel::new(users, SessionContext::new(), Preferences::in_memory()).with_login_delay(Duration::ZERO);
  vm.authenticate_user("x@y.z", "pw", || panic!("must not authenticate"), || {})
    .await;
  assert_eq!(vm.state.get(), UiState::Error(ErrorKind::Unknown));
}

#[tokio::test]
async fn test_retry_restarts_from_loading() {
  setup_tracing();
  let users = FakeUserRepository::new(DataResponse::error(ErrorKind::Unknown));
  let vm = LoginViewModel::new(users.clone(), SessionContext::new(), Preferences::in_memory())
    .with_login_delay(Duration::from_millis(10));
  vm.authenticate_user("x@y.z", "pw", || {}, || {}).await;
  assert_eq!(vm.state.get(), UiState::Error(ErrorKind::Unknown));

  *users.sign_in_response.lock() = DataResponse::success(user(5, "x@y.z"));
  let states = record_states(&vm.state);
  vm.authenticate_user("x@y.z", "pw", || {}, || {}).await;
  assert_eq!(
    states.await.unwrap(),
    vec![UiState::Error(ErrorKind::Unknown), UiState::Loading, UiState::Success]
  );
}

// --- Bookmarks ---

#[tokio::test]
async fn test_bookmarks_clear_after_empty_snapshot() {
  setup_tracing();
  let s1 = vec![product(1), product(2), product(3)];
  let vm = BookmarkViewModel::new(FakeProductsRepository::with_snapshots(vec![s1, Vec::new()]));

  vm.load_bookmarks(DEMO_USER_ID).await;
  assert!(vm.items.get().is_empty());
  assert_eq!(vm.state.get(), UiState::Success);
}

#[tokio::test]
async fn test_bookmarks_overlapping_snapshot_replaces_items() {
  setup_tracing();
  let s1 = vec![product(1), product(2), product(3)];
  let s3 = vec![product(3), product(4), product(5)];
  let vm = BookmarkViewModel::new(FakeProductsRepository::with_snapshots(vec![s1, s3.clone()]));

  vm.load_bookmarks(DEMO_USER_ID).await;
  assert_eq!(vm.items.get(), s3);
}

#[tokio::test]
async fn test_bookmarks_disjoint_snapshot_appends() {
  setup_tracing();
  let vm = BookmarkViewModel::new(FakeProductsRepository::with_snapshots(Vec::new()));
  vm.apply_snapshot(vec![product(1)]);
  vm.apply_snapshot(vec![product(2)]);
  let ids: Vec<i64> = vm.items.get().iter().map(|p| p.id).collect();
  assert_eq!(ids, vec![1, 2]);
}

#[tokio::test]
async fn test_bookmarks_load_is_skipped_when_items_are_held() {
  setup_tracing();
  let vm = BookmarkViewModel::new(FakeProductsRepository::with_snapshots(vec![Vec::new()]));
  vm.apply_snapshot(vec![product(9)]);
  vm.load_bookmarks(DEMO_USER_ID).await;
  assert_eq!(vm.items.get().len(), 1);
}

#[tokio::test]
async fn test_bookmarks_follow_the_store() {
  setup_tracing();
  let store = seeded_store().await;
  let products = Arc::new(LocalProductsRepository::new(store.clone()));
  let vm = BookmarkViewModel::new(products.clone());
  let mut items = vm.items.subscribe();

  let task = tokio::spawn({
    let vm = vm.clone();
    async move { vm.load_bookmarks(DEMO_USER_ID).await }
  });

  tokio::time::timeout(Duration::from_secs(5), async {
    while vm.state.get() != UiState::Success {
      tokio::task::yield_now().await;
    }
  })
  .await
  .unwrap();

  store.insert_bookmark(DEMO_USER_ID, 6).await.unwrap();
  tokio::time::timeout(Duration::from_secs(5), items.wait_for(|held| held.iter().any(|p| p.id == 6)))
    .await
    .unwrap()
    .unwrap();
  task.abort();
}

// --- Orders history ---

#[tokio::test]
async fn test_orders_success_with_empty_payload() {
  setup_tracing();
  for response in [DataResponse::Success(None), DataResponse::success(Vec::new())] {
    let vm = OrdersHistoryViewModel::new(FakeProductsRepository::with_orders(response));
    vm.get_orders(DEMO_USER_ID).await;
    assert_eq!(vm.state.get(), UiState::Success);
    assert!(vm.orders.get().is_empty());
  }
}

#[tokio::test]
async fn test_orders_error_without_kind_defaults_to_unknown() {
  setup_tracing();
  let vm = OrdersHistoryViewModel::new(FakeProductsRepository::with_orders(DataResponse::unclassified()));
  vm.get_orders(DEMO_USER_ID).await;
  assert_eq!(vm.state.get(), UiState::Error(ErrorKind::Unknown));
}

// --- Splash, signup, profile ---

#[tokio::test]
async fn test_splash_restores_logged_user() {
  setup_tracing();
  let store = seeded_store().await;
  let session = SessionContext::new();
  let preferences = Preferences::in_memory();
  let vm = SplashViewModel::new(Arc::new(LocalUserRepository::new(store)), session.clone(), preferences.clone());

  assert!(!vm.is_app_launched_before());
  vm.mark_app_launched().await;
  assert!(vm.is_app_launched_before());
  assert_eq!(vm.logged_user_id(), None);

  let finished = flag();
  let finished_c = finished.clone();
  vm.check_logged_user(DEMO_USER_ID, move || finished_c.store(true, Ordering::SeqCst))
    .await;
  assert!(finished.load(Ordering::SeqCst));
  assert_eq!(session.user_id(), Some(DEMO_USER_ID));

  session.clear();
  vm.check_logged_user(404, || {}).await;
  assert!(!session.is_logged_in());
}

#[tokio::test]
async fn test_signup_logs_the_new_user_in() {
  setup_tracing();
  let store = seeded_store().await;
  let session = SessionContext::new();
  let preferences = Preferences::in_memory();
  let vm = SignupViewModel::new(Arc::new(LocalUserRepository::new(store)), session.clone(), preferences.clone());

  vm.sign_up(new_user("fresh@example.com", "+6211111"), || {}, || panic!("sign-up should succeed"))
    .await;
  assert_eq!(vm.state.get(), UiState::Success);
  assert_eq!(preferences.logged_user_id(), session.user_id());

  let failed = flag();
  let failed_c = failed.clone();
  vm.sign_up(new_user("", "+6222222"), || {}, move || failed_c.store(true, Ordering::SeqCst))
    .await;
  assert!(failed.load(Ordering::SeqCst));
}

#[tokio::test]
async fn test_logout_clears_session_and_preference() {
  setup_tracing();
  let session = SessionContext::new();
  let preferences = Preferences::in_memory();
  session.set(user(DEMO_USER_ID, DEMO_USER_EMAIL));
  preferences.set_logged_user_id(Some(DEMO_USER_ID)).await.unwrap();

  let vm = ProfileViewModel::new(session.clone(), preferences.clone());
  assert_eq!(vm.user().map(|u| u.user_id), Some(DEMO_USER_ID));

  let logged_out = flag();
  let logged_out_c = logged_out.clone();
  vm.logout(move || logged_out_c.store(true, Ordering::SeqCst)).await;
  assert!(logged_out.load(Ordering::SeqCst));
  assert!(!session.is_logged_in());
  assert_eq!(preferences.logged_user_id(), None);
}

// --- Home, search, cart ---

#[tokio::test]
async fn test_home_loads_catalog() {
  setup_tracing();
  let vm = HomeViewModel::new(Arc::new(LocalProductsRepository::new(seeded_store().await)));
  vm.load().await;
  assert_eq!(vm.state.get(), UiState::Success);
  assert_eq!(vm.catalog.get().len(), 8);
  assert_eq!(vm.manufacturers.get().len(), 3);
  assert_eq!(vm.advertisements.get().len(), 3);
}

#[tokio::test]
async fn test_search_blank_query_resets() {
  setup_tracing();
  let vm = SearchViewModel::new(Arc::new(LocalProductsRepository::new(seeded_store().await)));
  vm.search("burger").await;
  assert_eq!(vm.state.get(), UiState::Success);
  assert!(!vm.results.get().is_empty());

  vm.search("  ").await;
  assert_eq!(vm.state.get(), UiState::Idle);
  assert!(vm.results.get().is_empty());
}

#[tokio::test]
async fn test_cart_checkout_flow() {
  setup_tracing();
  let vm = CartViewModel::new(Arc::new(LocalProductsRepository::new(seeded_store().await)));
  vm.load(DEMO_USER_ID).await;
  assert_eq!(vm.state.get(), UiState::Success);
  assert!(vm.items.get().is_empty());
  assert_eq!(vm.payment_options.get().len(), 4);

  vm.add(CartItem {
    user_id: DEMO_USER_ID,
    product_id: 1,
    quantity: 1,
    size: Some(38),
  })
  .await;
  assert_eq!(vm.items.get().len(), 1);

  vm.checkout(DEMO_USER_ID, "apple").await;
  assert_eq!(vm.state.get(), UiState::Success);
  assert!(vm.items.get().is_empty());
  assert_eq!(vm.last_order.get().map(|o| o.items.len()), Some(1));

  vm.checkout(DEMO_USER_ID, "apple").await;
  assert_eq!(vm.state.get(), UiState::Error(ErrorKind::Unknown));
}
