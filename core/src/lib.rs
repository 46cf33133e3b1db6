// src/lib.rs

//! Storefront: the data core of a small shop app.
//!
//! The crate holds everything below the UI:
//!  - A local SQLite store with one table per entity and enforced foreign keys.
//!  - A one-time seed that fills a freshly created store with the demo catalog.
//!  - Repositories answering every call with a tagged `DataResponse`.
//!  - View models whose `UiState` a presentation layer observes.
//!  - An explicit session context and persisted preferences.

pub mod auth;
pub mod error;
pub mod models;
pub mod preferences;
pub mod repository;
pub mod session;
pub mod state;
pub mod store;
pub mod viewmodel;

// --- Re-exports for the Public API ---

pub use crate::error::{ErrorKind, StoreError, StoreResult};

pub use crate::store::schema::{Table, SCHEMA_VERSION};
pub use crate::store::seed::{bootstrap, CatalogSeeder, SeedReport};
pub use crate::store::{LocalStore, StoreCallback, StoreOptions};

pub use crate::repository::{
  DataResponse, LocalProductsRepository, LocalUserRepository, ProductsRepository, UserRepository,
};

pub use crate::preferences::Preferences;
pub use crate::session::SessionContext;
pub use crate::state::Observable;
pub use crate::viewmodel::UiState;

/*
    Typical wiring at startup:
    1. `LocalStore::open(options, Some(Arc::new(CatalogSeeder)))`; the seeder
       runs only when the tables are created.
    2. Wrap the store in `LocalUserRepository` / `LocalProductsRepository`
       behind `Arc<dyn ..>`.
    3. Load `Preferences`, create one `SessionContext`, and hand both with the
       repositories to the view models that need them.
*/
