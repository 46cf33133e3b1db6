// storefront/src/store/seed.rs

//! First-run population of the store with the demo catalog.
//!
//! The work is split into named batches. Each batch is one transaction and
//! either commits completely or not at all; a failing batch is logged and
//! reported but never stops the others. Batches run concurrently in two
//! waves so that every foreign key a batch writes already exists:
//!
//! 1. user, manufacturers, advertisements, payment providers
//! 2. one batch per product category, user payment accounts, user location
//!
//! Inside a category batch each product row is written before its variants.

use super::catalog::{self, ProductCategory, DEMO_USER_PASSWORD};
use super::dao;
use super::schema::Table;
use super::{LocalStore, StoreCallback};
use crate::auth;
use crate::error::StoreResult;
use async_trait::async_trait;
use futures_util::future::join_all;
use std::future::Future;
use std::pin::Pin;
use tracing::{event, info_span, instrument, Instrument, Level};

type BatchFuture<'a> = Pin<Box<dyn Future<Output = StoreResult<usize>> + Send + 'a>>;

struct SeedBatch<'a> {
  name: String,
  work: BatchFuture<'a>,
}

impl<'a> SeedBatch<'a> {
  fn new(name: impl Into<String>, work: impl Future<Output = StoreResult<usize>> + Send + 'a) -> Self {
    Self {
      name: name.into(),
      work: Box::pin(work),
    }
  }
}

/// Result of one batch: rows written, or the error message.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchOutcome {
  pub name: String,
  pub result: Result<usize, String>,
}

#[derive(Debug, Clone, Default)]
pub struct SeedReport {
  pub batches: Vec<BatchOutcome>,
}

impl SeedReport {
  pub fn is_complete(&self) -> bool {
    self.batches.iter().all(|b| b.result.is_ok())
  }

  pub fn failed(&self) -> impl Iterator<Item = &BatchOutcome> {
    self.batches.iter().filter(|b| b.result.is_err())
  }

  pub fn rows_written(&self) -> usize {
    self.batches.iter().filter_map(|b| b.result.as_ref().ok()).sum()
  }

  pub fn batch(&self, name: &str) -> Option<&BatchOutcome> {
    self.batches.iter().find(|b| b.name == name)
  }
}

/// Seeds the catalog when the store is created for the first time.
#[derive(Debug, Default, Clone, Copy)]
pub struct CatalogSeeder;

#[async_trait]
impl StoreCallback for CatalogSeeder {
  async fn on_create(&self, store: &LocalStore) {
    let report = bootstrap(store).await;
    if report.is_complete() {
      event!(Level::INFO, rows = report.rows_written(), "Demo catalog seeded.");
    } else {
      let failed: Vec<&str> = report.failed().map(|b| b.name.as_str()).collect();
      event!(Level::WARN, ?failed, rows = report.rows_written(), "Demo catalog seeded partially.");
    }
  }
}

/// Writes the whole demo catalog. Safe to run against a populated store:
/// every write upserts on its primary key, so no row is duplicated.
#[instrument(name = "seed::bootstrap", skip_all)]
pub async fn bootstrap(store: &LocalStore) -> SeedReport {
  let mut report = SeedReport::default();

  let wave_one = vec![
    SeedBatch::new("user", seed_user(store)),
    SeedBatch::new("manufacturers", seed_manufacturers(store)),
    SeedBatch::new("advertisements", seed_advertisements(store)),
    SeedBatch::new("payment_providers", seed_payment_providers(store)),
  ];
  report.batches.extend(run_wave(wave_one).await);

  let mut wave_two: Vec<SeedBatch<'_>> = catalog::product_categories()
    .into_iter()
    .map(|category| SeedBatch::new(format!("products_{}", category.name), seed_category(store, category)))
    .collect();
  wave_two.push(SeedBatch::new("user_payment_providers", seed_user_payment_providers(store)));
  wave_two.push(SeedBatch::new("user_location", seed_location(store)));
  report.batches.extend(run_wave(wave_two).await);

  report
}

async fn run_wave(batches: Vec<SeedBatch<'_>>) -> Vec<BatchOutcome> {
  join_all(batches.into_iter().map(|batch| {
    let span = info_span!("seed_batch", batch = %batch.name);
    async move {
      let result = match batch.work.await {
        Ok(rows) => {
          event!(Level::DEBUG, rows, "Seed batch committed.");
          Ok(rows)
        }
        Err(e) => {
          event!(Level::ERROR, error = %e, "Seed batch failed; other batches continue.");
          Err(e.to_string())
        }
      };
      BatchOutcome {
        name: batch.name,
        result,
      }
    }
    .instrument(span)
  }))
  .await
}

async fn seed_user(store: &LocalStore) -> StoreResult<usize> {
  let password_hash = auth::hash_password(DEMO_USER_PASSWORD)?;
  let mut tx = store.pool().begin().await?;
  dao::upsert_user(&mut tx, &catalog::demo_user(password_hash)).await?;
  tx.commit().await?;
  store.notify(Table::Users);
  Ok(1)
}

async fn seed_manufacturers(store: &LocalStore) -> StoreResult<usize> {
  let manufacturers = catalog::manufacturers();
  let mut tx = store.pool().begin().await?;
  for manufacturer in &manufacturers {
    dao::upsert_manufacturer(&mut tx, manufacturer).await?;
  }
  tx.commit().await?;
  store.notify(Table::Manufacturers);
  Ok(manufacturers.len())
}

async fn seed_advertisements(store: &LocalStore) -> StoreResult<usize> {
  let advertisements = catalog::advertisements();
  let mut tx = store.pool().begin().await?;
  for ad in &advertisements {
    dao::upsert_advertisement(&mut tx, ad).await?;
  }
  tx.commit().await?;
  store.notify(Table::Advertisements);
  Ok(advertisements.len())
}

/// Rows written count the product plus each of its variants.
async fn seed_category(store: &LocalStore, category: ProductCategory) -> StoreResult<usize> {
  let mut rows = 0;
  let mut tx = store.pool().begin().await?;
  for product in &category.products {
    dao::upsert_product_with_variants(&mut tx, product).await?;
    rows += 1 + product.sizes.len() + product.colors.len();
  }
  tx.commit().await?;
  store.notify(Table::Products);
  store.notify(Table::ProductSizes);
  store.notify(Table::ProductColors);
  Ok(rows)
}

async fn seed_payment_providers(store: &LocalStore) -> StoreResult<usize> {
  let providers = catalog::payment_providers();
  let mut tx = store.pool().begin().await?;
  for provider in &providers {
    dao::upsert_payment_provider(&mut tx, provider).await?;
  }
  tx.commit().await?;
  store.notify(Table::PaymentProviders);
  Ok(providers.len())
}

async fn seed_user_payment_providers(store: &LocalStore) -> StoreResult<usize> {
  let accounts = catalog::user_payment_accounts();
  let mut tx = store.pool().begin().await?;
  for account in &accounts {
    dao::upsert_user_payment_provider(&mut tx, account).await?;
  }
  tx.commit().await?;
  store.notify(Table::UserPaymentProviders);
  Ok(accounts.len())
}

async fn seed_location(store: &LocalStore) -> StoreResult<usize> {
  let mut tx = store.pool().begin().await?;
  dao::upsert_location(&mut tx, &catalog::user_location()).await?;
  tx.commit().await?;
  store.notify(Table::Locations);
  Ok(1)
}
