// storefront/src/store/mod.rs

//! The local relational store: one SQLite database holding every entity,
//! with a first-creation hook used to seed the demo catalog.

pub mod catalog;
mod dao;
pub mod schema;
pub mod seed;

use crate::error::{StoreError, StoreResult};
use async_trait::async_trait;
use schema::{Table, SCHEMA_VERSION};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::collections::HashMap;
use std::str::FromStr;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{event, instrument, Level};

/// Where the store lives and how many connections it may hold.
#[derive(Debug, Clone)]
pub struct StoreOptions {
  pub url: String,
  pub max_connections: u32,
}

impl StoreOptions {
  /// A private in-memory database. It lives as long as the store's single connection.
  pub fn in_memory() -> Self {
    Self {
      url: "sqlite::memory:".to_string(),
      max_connections: 1,
    }
  }

  pub fn file(path: impl AsRef<std::path::Path>) -> Self {
    Self {
      url: format!("sqlite://{}", path.as_ref().display()),
      max_connections: 4,
    }
  }

  pub fn from_url(url: impl Into<String>) -> Self {
    Self {
      url: url.into(),
      max_connections: 4,
    }
  }

  fn is_in_memory(&self) -> bool {
    self.url.contains(":memory:") || self.url.contains("mode=memory")
  }
}

/// Lifecycle hook invoked by `LocalStore::open`.
#[async_trait]
pub trait StoreCallback: Send + Sync {
  /// Runs once, right after the tables were created for the first time
  /// (or recreated by a destructive rebuild). Never runs on a plain reopen.
  async fn on_create(&self, store: &LocalStore);
}

/// One `watch` counter per table, bumped after every committed write.
#[derive(Debug)]
struct InvalidationTracker {
  channels: HashMap<Table, watch::Sender<u64>>,
}

impl InvalidationTracker {
  fn new() -> Self {
    let channels = Table::ALL
      .iter()
      .map(|table| (*table, watch::channel(0u64).0))
      .collect();
    Self { channels }
  }

  fn notify(&self, table: Table) {
    if let Some(sender) = self.channels.get(&table) {
      sender.send_modify(|version| *version = version.wrapping_add(1));
    }
  }

  fn subscribe(&self, table: Table) -> watch::Receiver<u64> {
    match self.channels.get(&table) {
      Some(sender) => sender.subscribe(),
      // Every table gets a channel in `new`; this arm only keeps the lookup total.
      None => watch::channel(0u64).1,
    }
  }
}

/// Shared handle to the local database. Cheap to clone.
#[derive(Debug, Clone)]
pub struct LocalStore {
  pool: SqlitePool,
  invalidation: Arc<InvalidationTracker>,
}

impl LocalStore {
  /// Opens (creating if needed) the store described by `options`.
  ///
  /// - Version 0 means a fresh file: tables are created and `callback.on_create` runs.
  /// - A version other than `SCHEMA_VERSION` is rebuilt destructively, then
  ///   treated as a fresh store.
  /// - A matching version is opened as-is.
  #[instrument(name = "LocalStore::open", skip(callback), fields(url = %options.url), err(Display))]
  pub async fn open(options: StoreOptions, callback: Option<Arc<dyn StoreCallback>>) -> StoreResult<Self> {
    let connect_options = SqliteConnectOptions::from_str(&options.url)?
      .create_if_missing(true)
      .foreign_keys(true);

    let mut pool_options = SqlitePoolOptions::new().max_connections(options.max_connections.max(1));
    if options.is_in_memory() {
      // Each in-memory connection is its own database; pin exactly one for the store's lifetime.
      pool_options = pool_options
        .max_connections(1)
        .min_connections(1)
        .idle_timeout(None)
        .max_lifetime(None);
    }
    let pool = pool_options.connect_with(connect_options).await?;

    let store = LocalStore {
      pool,
      invalidation: Arc::new(InvalidationTracker::new()),
    };

    let found_version = store.schema_version().await?;
    let created = if found_version == SCHEMA_VERSION {
      event!(Level::DEBUG, version = found_version, "Store schema is current.");
      false
    } else {
      if found_version != 0 {
        event!(
          Level::WARN,
          found = found_version,
          expected = SCHEMA_VERSION,
          "Store schema version mismatch; rebuilding from scratch."
        );
      }
      store.rebuild_tables().await?;
      true
    };

    if created {
      event!(Level::INFO, "Store created.");
      if let Some(callback) = callback {
        callback.on_create(&store).await;
      }
    }
    Ok(store)
  }

  pub fn pool(&self) -> &SqlitePool {
    &self.pool
  }

  pub async fn close(&self) {
    self.pool.close().await;
  }

  pub async fn schema_version(&self) -> StoreResult<i64> {
    let version: i64 = sqlx::query_scalar("PRAGMA user_version").fetch_one(&self.pool).await?;
    Ok(version)
  }

  /// Subscribes to write notifications for `table`. The received value is a
  /// counter with no meaning beyond "changed since you last looked".
  pub fn observe(&self, table: Table) -> watch::Receiver<u64> {
    self.invalidation.subscribe(table)
  }

  pub(crate) fn notify(&self, table: Table) {
    self.invalidation.notify(table);
  }

  pub async fn count_rows(&self, table: Table) -> StoreResult<i64> {
    let sql = format!("SELECT COUNT(*) FROM {}", table.name());
    let count: i64 = sqlx::query_scalar(&sql).fetch_one(&self.pool).await?;
    Ok(count)
  }

  /// Drops every known table and recreates the schema in one transaction.
  async fn rebuild_tables(&self) -> StoreResult<()> {
    let mut tx = self.pool.begin().await?;
    for table in Table::ALL.iter().rev() {
      let sql = format!("DROP TABLE IF EXISTS {}", table.name());
      sqlx::query(&sql)
        .execute(&mut *tx)
        .await
        .map_err(|e| StoreError::Migration(format!("dropping {}: {}", table.name(), e)))?;
    }
    for table in Table::ALL {
      sqlx::query(table.ddl())
        .execute(&mut *tx)
        .await
        .map_err(|e| StoreError::Migration(format!("creating {}: {}", table.name(), e)))?;
    }
    let set_version = format!("PRAGMA user_version = {}", SCHEMA_VERSION);
    sqlx::query(&set_version).execute(&mut *tx).await?;
    tx.commit().await?;
    event!(Level::DEBUG, tables = Table::ALL.len(), "Schema created.");
    Ok(())
  }
}
