// storefront/src/store/schema.rs

//! Explicit table definitions. Every primary and foreign key is declared here;
//! nothing is inferred. Foreign keys carry no cascade actions.

/// Stored in `PRAGMA user_version`. Bump on any DDL change: a mismatching
/// store is dropped and rebuilt (see `LocalStore::open`).
pub const SCHEMA_VERSION: i64 = 2;

/// Tables that can be observed for changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Table {
  Users,
  Manufacturers,
  Advertisements,
  Products,
  ProductSizes,
  ProductColors,
  PaymentProviders,
  UserPaymentProviders,
  Locations,
  CartItems,
  Orders,
  OrderItems,
  OrderPayments,
  Notifications,
  BookmarkItems,
  Reviews,
}

impl Table {
  /// Creation order. Referenced tables come before the tables that reference them.
  pub const ALL: [Table; 16] = [
    Table::Users,
    Table::Manufacturers,
    Table::Advertisements,
    Table::Products,
    Table::ProductSizes,
    Table::ProductColors,
    Table::PaymentProviders,
    Table::UserPaymentProviders,
    Table::Locations,
    Table::CartItems,
    Table::Orders,
    Table::OrderItems,
    Table::OrderPayments,
    Table::Notifications,
    Table::BookmarkItems,
    Table::Reviews,
  ];

  pub fn name(self) -> &'static str {
    match self {
      Table::Users => "users",
      Table::Manufacturers => "manufacturers",
      Table::Advertisements => "advertisements",
      Table::Products => "products",
      Table::ProductSizes => "product_sizes",
      Table::ProductColors => "product_colors",
      Table::PaymentProviders => "payment_providers",
      Table::UserPaymentProviders => "user_payment_providers",
      Table::Locations => "locations",
      Table::CartItems => "cart_items",
      Table::Orders => "orders",
      Table::OrderItems => "order_items",
      Table::OrderPayments => "order_payments",
      Table::Notifications => "notifications",
      Table::BookmarkItems => "bookmark_items",
      Table::Reviews => "reviews",
    }
  }

  pub(crate) fn ddl(self) -> &'static str {
    match self {
      Table::Users => {
        "CREATE TABLE users (
          user_id   INTEGER PRIMARY KEY NOT NULL,
          name      TEXT NOT NULL,
          profile   TEXT NOT NULL,
          phone     TEXT NOT NULL,
          email     TEXT NOT NULL UNIQUE,
          password  TEXT NOT NULL,
          token     TEXT NOT NULL
        )"
      }
      Table::Manufacturers => {
        "CREATE TABLE manufacturers (
          id    INTEGER PRIMARY KEY NOT NULL,
          name  TEXT NOT NULL,
          icon  TEXT NOT NULL
        )"
      }
      // advertised_id points at a product or a store depending on `type`,
      // so it cannot carry a foreign key.
      Table::Advertisements => {
        "CREATE TABLE advertisements (
          id             INTEGER PRIMARY KEY NOT NULL,
          image          TEXT NOT NULL,
          advertised_id  INTEGER NOT NULL,
          type           INTEGER NOT NULL DEFAULT 0
        )"
      }
      Table::Products => {
        "CREATE TABLE products (
          id                INTEGER PRIMARY KEY NOT NULL,
          name              TEXT NOT NULL,
          image             TEXT NOT NULL,
          price             REAL NOT NULL,
          description       TEXT NOT NULL,
          manufacturer_id   INTEGER NOT NULL REFERENCES manufacturers(id),
          basic_color_name  TEXT NOT NULL
        )"
      }
      Table::ProductSizes => {
        "CREATE TABLE product_sizes (
          product_id  INTEGER NOT NULL REFERENCES products(id),
          size_value  INTEGER NOT NULL,
          PRIMARY KEY (product_id, size_value)
        )"
      }
      Table::ProductColors => {
        "CREATE TABLE product_colors (
          product_id  INTEGER NOT NULL REFERENCES products(id),
          color_name  TEXT NOT NULL,
          PRIMARY KEY (product_id, color_name)
        )"
      }
      Table::PaymentProviders => {
        "CREATE TABLE payment_providers (
          id     TEXT PRIMARY KEY NOT NULL,
          title  TEXT NOT NULL,
          icon   TEXT NOT NULL
        )"
      }
      Table::UserPaymentProviders => {
        "CREATE TABLE user_payment_providers (
          provider_id  TEXT PRIMARY KEY NOT NULL REFERENCES payment_providers(id),
          card_number  TEXT NOT NULL,
          CHECK ((provider_id = 'cod') = (card_number = ''))
        )"
      }
      Table::Locations => {
        "CREATE TABLE locations (
          id       INTEGER PRIMARY KEY NOT NULL,
          user_id  INTEGER NOT NULL UNIQUE REFERENCES users(user_id),
          address  TEXT NOT NULL,
          city     TEXT NOT NULL,
          country  TEXT NOT NULL
        )"
      }
      Table::CartItems => {
        "CREATE TABLE cart_items (
          user_id     INTEGER NOT NULL REFERENCES users(user_id),
          product_id  INTEGER NOT NULL REFERENCES products(id),
          quantity    INTEGER NOT NULL CHECK (quantity > 0),
          size        INTEGER,
          PRIMARY KEY (user_id, product_id)
        )"
      }
      Table::Orders => {
        "CREATE TABLE orders (
          id          INTEGER PRIMARY KEY AUTOINCREMENT,
          user_id     INTEGER NOT NULL REFERENCES users(user_id),
          status      TEXT NOT NULL,
          total       REAL NOT NULL,
          created_at  TEXT NOT NULL
        )"
      }
      Table::OrderItems => {
        "CREATE TABLE order_items (
          id          INTEGER PRIMARY KEY AUTOINCREMENT,
          order_id    INTEGER NOT NULL REFERENCES orders(id),
          product_id  INTEGER NOT NULL REFERENCES products(id),
          quantity    INTEGER NOT NULL,
          price       REAL NOT NULL
        )"
      }
      Table::OrderPayments => {
        "CREATE TABLE order_payments (
          order_id     INTEGER PRIMARY KEY NOT NULL REFERENCES orders(id),
          provider_id  TEXT NOT NULL REFERENCES payment_providers(id),
          amount       REAL NOT NULL
        )"
      }
      Table::Notifications => {
        "CREATE TABLE notifications (
          id          INTEGER PRIMARY KEY AUTOINCREMENT,
          user_id     INTEGER NOT NULL REFERENCES users(user_id),
          title       TEXT NOT NULL,
          body        TEXT NOT NULL,
          created_at  TEXT NOT NULL,
          is_read     INTEGER NOT NULL DEFAULT 0
        )"
      }
      Table::BookmarkItems => {
        "CREATE TABLE bookmark_items (
          user_id     INTEGER NOT NULL REFERENCES users(user_id),
          product_id  INTEGER NOT NULL REFERENCES products(id),
          created_at  TEXT NOT NULL,
          PRIMARY KEY (user_id, product_id)
        )"
      }
      Table::Reviews => {
        "CREATE TABLE reviews (
          id          INTEGER PRIMARY KEY AUTOINCREMENT,
          user_id     INTEGER NOT NULL REFERENCES users(user_id),
          product_id  INTEGER NOT NULL REFERENCES products(id),
          rating      INTEGER NOT NULL CHECK (rating BETWEEN 1 AND 5),
          comment     TEXT NOT NULL,
          created_at  TEXT NOT NULL
        )"
      }
    }
  }
}
