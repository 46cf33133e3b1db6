// storefront/src/store/dao.rs

//! The data-access surface: one write per entity plus the reads each screen
//! needs. Single-row writes are also exposed as free functions over a
//! connection so the seed can run them inside a batch transaction.

use super::schema::Table;
use super::LocalStore;
use crate::error::{StoreError, StoreResult};
use crate::models::{
  Advertisement, CartItem, Location, Manufacturer, NewUser, Notification, Order, OrderDetails, OrderItem,
  OrderPayment, OrderStatus, PaymentOption, PaymentProvider, Product, ProductColor, ProductSize, Review, User,
  UserPaymentProvider, CASH_ON_DELIVERY,
};
use chrono::Utc;
use sqlx::SqliteConnection;
use std::collections::HashMap;
use tracing::{event, instrument, Level};

const PRODUCT_COLUMNS: &str = "p.id, p.name, p.image, p.price, p.description, p.manufacturer_id, p.basic_color_name";

// --- Single-row writes (connection level) ---

pub(crate) async fn upsert_user(conn: &mut SqliteConnection, user: &User) -> StoreResult<()> {
  sqlx::query(
    "INSERT INTO users (user_id, name, profile, phone, email, password, token) VALUES (?, ?, ?, ?, ?, ?, ?)
     ON CONFLICT(user_id) DO UPDATE SET
       name = excluded.name, profile = excluded.profile, phone = excluded.phone,
       email = excluded.email, password = excluded.password, token = excluded.token",
  )
  .bind(user.user_id)
  .bind(&user.name)
  .bind(&user.profile)
  .bind(&user.phone)
  .bind(&user.email)
  .bind(&user.password)
  .bind(&user.token)
  .execute(&mut *conn)
  .await
  .map_err(|e| StoreError::from_write("users", e))?;
  Ok(())
}

pub(crate) async fn upsert_manufacturer(conn: &mut SqliteConnection, manufacturer: &Manufacturer) -> StoreResult<()> {
  sqlx::query(
    "INSERT INTO manufacturers (id, name, icon) VALUES (?, ?, ?)
     ON CONFLICT(id) DO UPDATE SET name = excluded.name, icon = excluded.icon",
  )
  .bind(manufacturer.id)
  .bind(&manufacturer.name)
  .bind(&manufacturer.icon)
  .execute(&mut *conn)
  .await
  .map_err(|e| StoreError::from_write("manufacturers", e))?;
  Ok(())
}

pub(crate) async fn upsert_advertisement(conn: &mut SqliteConnection, ad: &Advertisement) -> StoreResult<()> {
  sqlx::query(
    "INSERT INTO advertisements (id, image, advertised_id, type) VALUES (?, ?, ?, ?)
     ON CONFLICT(id) DO UPDATE SET image = excluded.image, advertised_id = excluded.advertised_id, type = excluded.type",
  )
  .bind(ad.id)
  .bind(&ad.image)
  .bind(ad.advertised_id)
  .bind(ad.kind)
  .execute(&mut *conn)
  .await
  .map_err(|e| StoreError::from_write("advertisements", e))?;
  Ok(())
}

/// Writes the product row only; variants are separate writes.
pub(crate) async fn upsert_product(conn: &mut SqliteConnection, product: &Product) -> StoreResult<()> {
  sqlx::query(
    "INSERT INTO products (id, name, image, price, description, manufacturer_id, basic_color_name)
     VALUES (?, ?, ?, ?, ?, ?, ?)
     ON CONFLICT(id) DO UPDATE SET
       name = excluded.name, image = excluded.image, price = excluded.price,
       description = excluded.description, manufacturer_id = excluded.manufacturer_id,
       basic_color_name = excluded.basic_color_name",
  )
  .bind(product.id)
  .bind(&product.name)
  .bind(&product.image)
  .bind(product.price)
  .bind(&product.description)
  .bind(product.manufacturer_id)
  .bind(&product.basic_color_name)
  .execute(&mut *conn)
  .await
  .map_err(|e| StoreError::from_write("products", e))?;
  Ok(())
}

pub(crate) async fn insert_size(conn: &mut SqliteConnection, size: &ProductSize) -> StoreResult<()> {
  sqlx::query("INSERT INTO product_sizes (product_id, size_value) VALUES (?, ?) ON CONFLICT DO NOTHING")
    .bind(size.product_id)
    .bind(size.size_value)
    .execute(&mut *conn)
    .await
    .map_err(|e| StoreError::from_write("product_sizes", e))?;
  Ok(())
}

pub(crate) async fn insert_color(conn: &mut SqliteConnection, color: &ProductColor) -> StoreResult<()> {
  sqlx::query("INSERT INTO product_colors (product_id, color_name) VALUES (?, ?) ON CONFLICT DO NOTHING")
    .bind(color.product_id)
    .bind(&color.color_name)
    .execute(&mut *conn)
    .await
    .map_err(|e| StoreError::from_write("product_colors", e))?;
  Ok(())
}

/// Product row first, then its colors and sizes, strictly in that order.
pub(crate) async fn upsert_product_with_variants(conn: &mut SqliteConnection, product: &Product) -> StoreResult<()> {
  upsert_product(&mut *conn, product).await?;
  for color in &product.colors {
    insert_color(&mut *conn, color).await?;
  }
  for size in &product.sizes {
    insert_size(&mut *conn, size).await?;
  }
  Ok(())
}

pub(crate) async fn upsert_payment_provider(conn: &mut SqliteConnection, provider: &PaymentProvider) -> StoreResult<()> {
  sqlx::query(
    "INSERT INTO payment_providers (id, title, icon) VALUES (?, ?, ?)
     ON CONFLICT(id) DO UPDATE SET title = excluded.title, icon = excluded.icon",
  )
  .bind(&provider.id)
  .bind(&provider.title)
  .bind(&provider.icon)
  .execute(&mut *conn)
  .await
  .map_err(|e| StoreError::from_write("payment_providers", e))?;
  Ok(())
}

/// Cash on delivery must carry an empty card number; every other provider a non-empty one.
pub(crate) async fn upsert_user_payment_provider(
  conn: &mut SqliteConnection,
  account: &UserPaymentProvider,
) -> StoreResult<()> {
  if account.requires_card() == account.card_number.trim().is_empty() {
    return Err(StoreError::InvalidPaymentAccount {
      provider_id: account.provider_id.clone(),
    });
  }
  sqlx::query(
    "INSERT INTO user_payment_providers (provider_id, card_number) VALUES (?, ?)
     ON CONFLICT(provider_id) DO UPDATE SET card_number = excluded.card_number",
  )
  .bind(&account.provider_id)
  .bind(&account.card_number)
  .execute(&mut *conn)
  .await
  .map_err(|e| StoreError::from_write("user_payment_providers", e))?;
  Ok(())
}

pub(crate) async fn upsert_location(conn: &mut SqliteConnection, location: &Location) -> StoreResult<()> {
  sqlx::query(
    "INSERT INTO locations (id, user_id, address, city, country) VALUES (?, ?, ?, ?, ?)
     ON CONFLICT(id) DO UPDATE SET
       user_id = excluded.user_id, address = excluded.address, city = excluded.city, country = excluded.country",
  )
  .bind(location.id)
  .bind(location.user_id)
  .bind(&location.address)
  .bind(&location.city)
  .bind(&location.country)
  .execute(&mut *conn)
  .await
  .map_err(|e| StoreError::from_write("locations", e))?;
  Ok(())
}

fn escape_like(raw: &str) -> String {
  let mut escaped = String::with_capacity(raw.len());
  for c in raw.chars() {
    if matches!(c, '\\' | '%' | '_') {
      escaped.push('\\');
    }
    escaped.push(c);
  }
  escaped
}

async fn load_variants(
  conn: &mut SqliteConnection,
) -> StoreResult<(HashMap<i64, Vec<ProductSize>>, HashMap<i64, Vec<ProductColor>>)> {
  let sizes: Vec<ProductSize> =
    sqlx::query_as("SELECT product_id, size_value FROM product_sizes ORDER BY product_id, size_value")
      .fetch_all(&mut *conn)
      .await?;
  let colors: Vec<ProductColor> =
    sqlx::query_as("SELECT product_id, color_name FROM product_colors ORDER BY product_id, color_name")
      .fetch_all(&mut *conn)
      .await?;

  let mut sizes_by_product: HashMap<i64, Vec<ProductSize>> = HashMap::new();
  for size in sizes {
    sizes_by_product.entry(size.product_id).or_default().push(size);
  }
  let mut colors_by_product: HashMap<i64, Vec<ProductColor>> = HashMap::new();
  for color in colors {
    colors_by_product.entry(color.product_id).or_default().push(color);
  }
  Ok((sizes_by_product, colors_by_product))
}

// --- Store-level operations ---

impl LocalStore {
  async fn with_variants(&self, mut products: Vec<Product>) -> StoreResult<Vec<Product>> {
    if products.is_empty() {
      return Ok(products);
    }
    let mut conn = self.pool.acquire().await?;
    let (sizes, colors) = load_variants(&mut conn).await?;
    for product in products.iter_mut() {
      product.sizes = sizes.get(&product.id).cloned().unwrap_or_default();
      product.colors = colors.get(&product.id).cloned().unwrap_or_default();
    }
    Ok(products)
  }

  // Users

  pub async fn save_user(&self, user: &User) -> StoreResult<()> {
    let mut conn = self.pool.acquire().await?;
    upsert_user(&mut conn, user).await?;
    self.notify(Table::Users);
    Ok(())
  }

  /// Inserts a user with a store-assigned id.
  #[instrument(name = "LocalStore::insert_new_user", skip(self, new_user, password_hash, token), fields(email = %new_user.email), err(Display))]
  pub async fn insert_new_user(&self, new_user: &NewUser, password_hash: &str, token: &str) -> StoreResult<User> {
    let result = sqlx::query(
      "INSERT INTO users (name, profile, phone, email, password, token) VALUES (?, ?, ?, ?, ?, ?)",
    )
    .bind(&new_user.name)
    .bind("user")
    .bind(&new_user.phone)
    .bind(&new_user.email)
    .bind(password_hash)
    .bind(token)
    .execute(&self.pool)
    .await
    .map_err(|e| StoreError::from_write("users", e))?;
    self.notify(Table::Users);

    let user_id = result.last_insert_rowid();
    event!(Level::INFO, user_id, "User created.");
    self
      .get_user(user_id)
      .await?
      .ok_or(StoreError::Sqlx(sqlx::Error::RowNotFound))
  }

  pub async fn get_user(&self, user_id: i64) -> StoreResult<Option<User>> {
    let user = sqlx::query_as::<_, User>(
      "SELECT user_id, name, profile, phone, email, password, token FROM users WHERE user_id = ?",
    )
    .bind(user_id)
    .fetch_optional(&self.pool)
    .await?;
    Ok(user)
  }

  pub async fn find_user_by_email_or_phone(&self, email_or_phone: &str) -> StoreResult<Option<User>> {
    let user = sqlx::query_as::<_, User>(
      "SELECT user_id, name, profile, phone, email, password, token FROM users WHERE email = ? OR phone = ? LIMIT 1",
    )
    .bind(email_or_phone)
    .bind(email_or_phone)
    .fetch_optional(&self.pool)
    .await?;
    Ok(user)
  }

  // Catalog

  pub async fn insert_manufacturer(&self, manufacturer: &Manufacturer) -> StoreResult<()> {
    let mut conn = self.pool.acquire().await?;
    upsert_manufacturer(&mut conn, manufacturer).await?;
    self.notify(Table::Manufacturers);
    Ok(())
  }

  pub async fn get_manufacturers(&self) -> StoreResult<Vec<Manufacturer>> {
    let manufacturers = sqlx::query_as::<_, Manufacturer>("SELECT id, name, icon FROM manufacturers ORDER BY id")
      .fetch_all(&self.pool)
      .await?;
    Ok(manufacturers)
  }

  pub async fn insert_advertisement(&self, ad: &Advertisement) -> StoreResult<()> {
    let mut conn = self.pool.acquire().await?;
    upsert_advertisement(&mut conn, ad).await?;
    self.notify(Table::Advertisements);
    Ok(())
  }

  pub async fn get_advertisements(&self) -> StoreResult<Vec<Advertisement>> {
    let ads = sqlx::query_as::<_, Advertisement>(
      "SELECT id, image, advertised_id, type FROM advertisements ORDER BY id",
    )
    .fetch_all(&self.pool)
    .await?;
    Ok(ads)
  }

  /// Writes the product row alone. Its `sizes`/`colors` are ignored.
  pub async fn insert_product(&self, product: &Product) -> StoreResult<()> {
    let mut conn = self.pool.acquire().await?;
    upsert_product(&mut conn, product).await?;
    self.notify(Table::Products);
    Ok(())
  }

  pub async fn insert_size(&self, size: &ProductSize) -> StoreResult<()> {
    let mut conn = self.pool.acquire().await?;
    insert_size(&mut conn, size).await?;
    self.notify(Table::ProductSizes);
    Ok(())
  }

  pub async fn insert_color(&self, color: &ProductColor) -> StoreResult<()> {
    let mut conn = self.pool.acquire().await?;
    insert_color(&mut conn, color).await?;
    self.notify(Table::ProductColors);
    Ok(())
  }

  /// Writes a product and its variants in one transaction.
  pub async fn save_product_with_variants(&self, product: &Product) -> StoreResult<()> {
    let mut tx = self.pool.begin().await?;
    upsert_product_with_variants(&mut tx, product).await?;
    tx.commit().await?;
    self.notify(Table::Products);
    self.notify(Table::ProductSizes);
    self.notify(Table::ProductColors);
    Ok(())
  }

  pub async fn get_products(&self) -> StoreResult<Vec<Product>> {
    let sql = format!("SELECT {} FROM products p ORDER BY p.id", PRODUCT_COLUMNS);
    let products = sqlx::query_as::<_, Product>(&sql).fetch_all(&self.pool).await?;
    self.with_variants(products).await
  }

  pub async fn get_product(&self, product_id: i64) -> StoreResult<Option<Product>> {
    let sql = format!("SELECT {} FROM products p WHERE p.id = ?", PRODUCT_COLUMNS);
    let product = sqlx::query_as::<_, Product>(&sql)
      .bind(product_id)
      .fetch_optional(&self.pool)
      .await?;
    match product {
      Some(product) => Ok(self.with_variants(vec![product]).await?.pop()),
      None => Ok(None),
    }
  }

  /// Case-insensitive substring match on the product name. `%` and `_` in
  /// the query match themselves.
  pub async fn search_products(&self, query: &str) -> StoreResult<Vec<Product>> {
    let sql = format!(
      "SELECT {} FROM products p WHERE p.name LIKE '%' || ? || '%' ESCAPE '\\' ORDER BY p.id",
      PRODUCT_COLUMNS
    );
    let products = sqlx::query_as::<_, Product>(&sql)
      .bind(escape_like(query.trim()))
      .fetch_all(&self.pool)
      .await?;
    self.with_variants(products).await
  }

  // Payments and location

  pub async fn save_payment_provider(&self, provider: &PaymentProvider) -> StoreResult<()> {
    let mut conn = self.pool.acquire().await?;
    upsert_payment_provider(&mut conn, provider).await?;
    self.notify(Table::PaymentProviders);
    Ok(())
  }

  pub async fn get_payment_providers(&self) -> StoreResult<Vec<PaymentProvider>> {
    let providers = sqlx::query_as::<_, PaymentProvider>("SELECT id, title, icon FROM payment_providers ORDER BY id")
      .fetch_all(&self.pool)
      .await?;
    Ok(providers)
  }

  pub async fn save_user_payment_provider(&self, account: &UserPaymentProvider) -> StoreResult<()> {
    let mut conn = self.pool.acquire().await?;
    upsert_user_payment_provider(&mut conn, account).await?;
    self.notify(Table::UserPaymentProviders);
    Ok(())
  }

  pub async fn get_user_payment_providers(&self) -> StoreResult<Vec<UserPaymentProvider>> {
    let accounts = sqlx::query_as::<_, UserPaymentProvider>(
      "SELECT provider_id, card_number FROM user_payment_providers ORDER BY provider_id",
    )
    .fetch_all(&self.pool)
    .await?;
    Ok(accounts)
  }

  pub async fn get_payment_options(&self) -> StoreResult<Vec<PaymentOption>> {
    let options = sqlx::query_as::<_, PaymentOption>(
      "SELECT pp.id AS provider_id, pp.title, pp.icon, upp.card_number
       FROM payment_providers pp
       JOIN user_payment_providers upp ON upp.provider_id = pp.id
       ORDER BY pp.id",
    )
    .fetch_all(&self.pool)
    .await?;
    Ok(options)
  }

  pub async fn save_location(&self, location: &Location) -> StoreResult<()> {
    let mut conn = self.pool.acquire().await?;
    upsert_location(&mut conn, location).await?;
    self.notify(Table::Locations);
    Ok(())
  }

  pub async fn get_location(&self, user_id: i64) -> StoreResult<Option<Location>> {
    let location = sqlx::query_as::<_, Location>(
      "SELECT id, user_id, address, city, country FROM locations WHERE user_id = ?",
    )
    .bind(user_id)
    .fetch_optional(&self.pool)
    .await?;
    Ok(location)
  }

  // Cart

  /// Adds `item.quantity` to the user's line for that product, creating it if needed.
  pub async fn add_cart_item(&self, item: &CartItem) -> StoreResult<()> {
    sqlx::query(
      "INSERT INTO cart_items (user_id, product_id, quantity, size) VALUES (?, ?, ?, ?)
       ON CONFLICT(user_id, product_id) DO UPDATE SET
         quantity = cart_items.quantity + excluded.quantity, size = excluded.size",
    )
    .bind(item.user_id)
    .bind(item.product_id)
    .bind(item.quantity)
    .bind(item.size)
    .execute(&self.pool)
    .await
    .map_err(|e| StoreError::from_write("cart_items", e))?;
    self.notify(Table::CartItems);
    Ok(())
  }

  pub async fn remove_cart_item(&self, user_id: i64, product_id: i64) -> StoreResult<bool> {
    let result = sqlx::query("DELETE FROM cart_items WHERE user_id = ? AND product_id = ?")
      .bind(user_id)
      .bind(product_id)
      .execute(&self.pool)
      .await?;
    self.notify(Table::CartItems);
    Ok(result.rows_affected() > 0)
  }

  pub async fn get_cart_items(&self, user_id: i64) -> StoreResult<Vec<CartItem>> {
    let items = sqlx::query_as::<_, CartItem>(
      "SELECT user_id, product_id, quantity, size FROM cart_items WHERE user_id = ? ORDER BY product_id",
    )
    .bind(user_id)
    .fetch_all(&self.pool)
    .await?;
    Ok(items)
  }

  // Bookmarks

  /// Returns whether a new bookmark row was written.
  pub async fn insert_bookmark(&self, user_id: i64, product_id: i64) -> StoreResult<bool> {
    let result = sqlx::query(
      "INSERT INTO bookmark_items (user_id, product_id, created_at) VALUES (?, ?, ?) ON CONFLICT DO NOTHING",
    )
    .bind(user_id)
    .bind(product_id)
    .bind(Utc::now())
    .execute(&self.pool)
    .await
    .map_err(|e| StoreError::from_write("bookmark_items", e))?;
    self.notify(Table::BookmarkItems);
    Ok(result.rows_affected() > 0)
  }

  pub async fn delete_bookmark(&self, user_id: i64, product_id: i64) -> StoreResult<bool> {
    let result = sqlx::query("DELETE FROM bookmark_items WHERE user_id = ? AND product_id = ?")
      .bind(user_id)
      .bind(product_id)
      .execute(&self.pool)
      .await?;
    self.notify(Table::BookmarkItems);
    Ok(result.rows_affected() > 0)
  }

  /// Flips the bookmark in one transaction. Returns the new state.
  pub async fn toggle_bookmark(&self, user_id: i64, product_id: i64) -> StoreResult<bool> {
    let mut tx = self.pool.begin_with("BEGIN IMMEDIATE").await?;
    let removed = sqlx::query("DELETE FROM bookmark_items WHERE user_id = ? AND product_id = ?")
      .bind(user_id)
      .bind(product_id)
      .execute(&mut *tx)
      .await?
      .rows_affected()
      > 0;
    if !removed {
      sqlx::query("INSERT INTO bookmark_items (user_id, product_id, created_at) VALUES (?, ?, ?)")
        .bind(user_id)
        .bind(product_id)
        .bind(Utc::now())
        .execute(&mut *tx)
        .await
        .map_err(|e| StoreError::from_write("bookmark_items", e))?;
    }
    tx.commit().await?;
    self.notify(Table::BookmarkItems);
    Ok(!removed)
  }

  pub async fn is_bookmarked(&self, user_id: i64, product_id: i64) -> StoreResult<bool> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM bookmark_items WHERE user_id = ? AND product_id = ?")
      .bind(user_id)
      .bind(product_id)
      .fetch_one(&self.pool)
      .await?;
    Ok(count > 0)
  }

  /// Bookmarked products in the order they were bookmarked.
  pub async fn get_bookmarked_products(&self, user_id: i64) -> StoreResult<Vec<Product>> {
    let sql = format!(
      "SELECT {} FROM products p
       JOIN bookmark_items b ON b.product_id = p.id
       WHERE b.user_id = ?
       ORDER BY b.created_at, p.id",
      PRODUCT_COLUMNS
    );
    let products = sqlx::query_as::<_, Product>(&sql)
      .bind(user_id)
      .fetch_all(&self.pool)
      .await?;
    self.with_variants(products).await
  }

  // Orders

  /// Turns the user's cart into an order paid with `provider_id`, then empties
  /// the cart. Everything happens in one transaction.
  #[instrument(name = "LocalStore::insert_order", skip(self), err(Display))]
  pub async fn insert_order(&self, user_id: i64, provider_id: &str) -> StoreResult<OrderDetails> {
    // Reads the cart before writing; take the write lock up front so a
    // concurrent writer makes this wait on the busy timeout instead of failing.
    let mut tx = self.pool.begin_with("BEGIN IMMEDIATE").await?;

    let lines: Vec<(i64, i64, f64)> = sqlx::query_as(
      "SELECT c.product_id, c.quantity, p.price
       FROM cart_items c JOIN products p ON p.id = c.product_id
       WHERE c.user_id = ? ORDER BY c.product_id",
    )
    .bind(user_id)
    .fetch_all(&mut *tx)
    .await?;
    if lines.is_empty() {
      return Err(StoreError::EmptyCart { user_id });
    }

    let total: f64 = lines.iter().map(|(_, quantity, price)| *quantity as f64 * price).sum();
    let status = if provider_id == CASH_ON_DELIVERY {
      OrderStatus::Pending
    } else {
      OrderStatus::Paid
    };

    let order_id = sqlx::query("INSERT INTO orders (user_id, status, total, created_at) VALUES (?, ?, ?, ?)")
      .bind(user_id)
      .bind(status)
      .bind(total)
      .bind(Utc::now())
      .execute(&mut *tx)
      .await
      .map_err(|e| StoreError::from_write("orders", e))?
      .last_insert_rowid();

    for (product_id, quantity, price) in &lines {
      sqlx::query("INSERT INTO order_items (order_id, product_id, quantity, price) VALUES (?, ?, ?, ?)")
        .bind(order_id)
        .bind(product_id)
        .bind(quantity)
        .bind(price)
        .execute(&mut *tx)
        .await
        .map_err(|e| StoreError::from_write("order_items", e))?;
    }

    sqlx::query("INSERT INTO order_payments (order_id, provider_id, amount) VALUES (?, ?, ?)")
      .bind(order_id)
      .bind(provider_id)
      .bind(total)
      .execute(&mut *tx)
      .await
      .map_err(|e| StoreError::from_write("order_payments", e))?;

    sqlx::query("DELETE FROM cart_items WHERE user_id = ?")
      .bind(user_id)
      .execute(&mut *tx)
      .await?;

    tx.commit().await?;
    for table in [Table::Orders, Table::OrderItems, Table::OrderPayments, Table::CartItems] {
      self.notify(table);
    }
    event!(Level::INFO, order_id, lines = lines.len(), total, "Order placed.");

    self
      .get_order_details(order_id)
      .await?
      .ok_or(StoreError::Sqlx(sqlx::Error::RowNotFound))
  }

  pub async fn get_order_details(&self, order_id: i64) -> StoreResult<Option<OrderDetails>> {
    let order = sqlx::query_as::<_, Order>("SELECT id, user_id, status, total, created_at FROM orders WHERE id = ?")
      .bind(order_id)
      .fetch_optional(&self.pool)
      .await?;
    match order {
      Some(order) => Ok(self.assemble_orders(vec![order]).await?.pop()),
      None => Ok(None),
    }
  }

  /// Newest first.
  pub async fn get_orders_history(&self, user_id: i64) -> StoreResult<Vec<OrderDetails>> {
    let orders = sqlx::query_as::<_, Order>(
      "SELECT id, user_id, status, total, created_at FROM orders WHERE user_id = ? ORDER BY created_at DESC, id DESC",
    )
    .bind(user_id)
    .fetch_all(&self.pool)
    .await?;
    self.assemble_orders(orders).await
  }

  async fn assemble_orders(&self, orders: Vec<Order>) -> StoreResult<Vec<OrderDetails>> {
    let mut details = Vec::with_capacity(orders.len());
    for order in orders {
      let items = sqlx::query_as::<_, OrderItem>(
        "SELECT id, order_id, product_id, quantity, price FROM order_items WHERE order_id = ? ORDER BY id",
      )
      .bind(order.id)
      .fetch_all(&self.pool)
      .await?;
      let payment = sqlx::query_as::<_, OrderPayment>(
        "SELECT order_id, provider_id, amount FROM order_payments WHERE order_id = ?",
      )
      .bind(order.id)
      .fetch_optional(&self.pool)
      .await?;
      details.push(OrderDetails { order, items, payment });
    }
    Ok(details)
  }

  // Notifications and reviews

  pub async fn insert_notification(&self, user_id: i64, title: &str, body: &str) -> StoreResult<Notification> {
    let created_at = Utc::now();
    let id = sqlx::query("INSERT INTO notifications (user_id, title, body, created_at, is_read) VALUES (?, ?, ?, ?, 0)")
      .bind(user_id)
      .bind(title)
      .bind(body)
      .bind(created_at)
      .execute(&self.pool)
      .await
      .map_err(|e| StoreError::from_write("notifications", e))?
      .last_insert_rowid();
    self.notify(Table::Notifications);
    Ok(Notification {
      id,
      user_id,
      title: title.to_string(),
      body: body.to_string(),
      created_at,
      is_read: false,
    })
  }

  pub async fn get_notifications(&self, user_id: i64) -> StoreResult<Vec<Notification>> {
    let notifications = sqlx::query_as::<_, Notification>(
      "SELECT id, user_id, title, body, created_at, is_read FROM notifications
       WHERE user_id = ? ORDER BY created_at DESC, id DESC",
    )
    .bind(user_id)
    .fetch_all(&self.pool)
    .await?;
    Ok(notifications)
  }

  pub async fn insert_review(&self, user_id: i64, product_id: i64, rating: i64, comment: &str) -> StoreResult<Review> {
    let created_at = Utc::now();
    let id = sqlx::query("INSERT INTO reviews (user_id, product_id, rating, comment, created_at) VALUES (?, ?, ?, ?, ?)")
      .bind(user_id)
      .bind(product_id)
      .bind(rating)
      .bind(comment)
      .bind(created_at)
      .execute(&self.pool)
      .await
      .map_err(|e| StoreError::from_write("reviews", e))?
      .last_insert_rowid();
    self.notify(Table::Reviews);
    Ok(Review {
      id,
      user_id,
      product_id,
      rating,
      comment: comment.to_string(),
      created_at,
    })
  }

  pub async fn get_reviews(&self, product_id: i64) -> StoreResult<Vec<Review>> {
    let reviews = sqlx::query_as::<_, Review>(
      "SELECT id, user_id, product_id, rating, comment, created_at FROM reviews WHERE product_id = ? ORDER BY id",
    )
    .bind(product_id)
    .fetch_all(&self.pool)
    .await?;
    Ok(reviews)
  }
}
