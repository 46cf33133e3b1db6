// storefront/src/store/catalog.rs

//! The fixed demo catalog written into a freshly created store.

use crate::models::{
  Advertisement, Location, Manufacturer, PaymentProvider, Product, User, UserPaymentProvider, CASH_ON_DELIVERY,
};

pub const DEMO_USER_ID: i64 = 1;
pub const DEMO_USER_EMAIL: &str = "example@gmail.com";
pub const DEMO_USER_PHONE: &str = "+6285821364004";
pub const DEMO_USER_PASSWORD: &str = "12345678";

const DESCRIPTION: &str = "This is the description text that is supposed to be long enough to show how the UI \
                           looks, so it's not a real text.\n";

/// Shoe-style sizes every burger and nasi product is offered in.
const STANDARD_SIZES: [i64; 4] = [38, 40, 42, 44];

/// A named group of products inserted as one seed batch.
#[derive(Debug, Clone)]
pub struct ProductCategory {
  pub name: &'static str,
  pub products: Vec<Product>,
}

/// The demo user. `password_hash` is the stored credential, not the plain password.
pub fn demo_user(password_hash: String) -> User {
  User {
    user_id: DEMO_USER_ID,
    name: "User".to_string(),
    profile: "user".to_string(),
    phone: DEMO_USER_PHONE.to_string(),
    email: DEMO_USER_EMAIL.to_string(),
    password: password_hash,
    token: "ds2f434ls2ks2lsj2ls".to_string(),
  }
}

pub fn manufacturers() -> Vec<Manufacturer> {
  [(1, "Burger", "burger_beef_keju"), (2, "Nasi", "nasgor"), (3, "Mie", "mie_goreng_udang")]
    .into_iter()
    .map(|(id, name, icon)| Manufacturer {
      id,
      name: name.to_string(),
      icon: icon.to_string(),
    })
    .collect()
}

/// Three banners, each pointing at a product.
pub fn advertisements() -> Vec<Advertisement> {
  (1..=3)
    .map(|id| Advertisement {
      id,
      image: format!("banner{}", id),
      advertised_id: id,
      kind: 0,
    })
    .collect()
}

fn product(id: i64, name: &str, image: &str, price: f64, manufacturer_id: i64, basic_color_name: &str) -> Product {
  Product {
    id,
    name: name.to_string(),
    image: image.to_string(),
    price,
    description: DESCRIPTION.to_string(),
    manufacturer_id,
    basic_color_name: basic_color_name.to_string(),
    sizes: Vec::new(),
    colors: Vec::new(),
  }
}

/// Every product category, each listed exactly once.
pub fn product_categories() -> Vec<ProductCategory> {
  let burger = vec![
    product(1, "Burger Beef", "burger", 8.0, 1, "dark-green"),
    product(2, "Burger Ayam Fillet", "burger_ayam_fillet", 7.0, 1, "gold"),
    product(3, "Burger Beef Paket 1", "burger_beef_double_keju_kentang_esteh", 20.0, 1, "black"),
    product(4, "Burger Beef Double + Kentang", "burger_beef_double_kentang", 18.0, 1, "black"),
  ];
  let nasi = vec![
    product(5, "Nasi Goreng", "nasgor", 8.0, 2, "green"),
    product(6, "Nasi Goreng Spesial Telur", "nasgor_telur", 9.0, 2, "gray"),
  ];
  let mie = vec![
    product(7, "Mie Goreng Spesial", "mie_goreng_spesial", 9.0, 3, "gray"),
    product(8, "Mie Goreng Udang", "mie_goreng_udang", 11.0, 3, "gray"),
  ];

  // Burger and nasi come in the standard sizes; mie has none.
  // Every product carries its basic color as its one color variant.
  let with_sizes = |products: Vec<Product>, sizes: &[i64]| -> Vec<Product> {
    products
      .into_iter()
      .map(|p| {
        let color = p.basic_color_name.clone();
        p.with_variants(sizes, &[color.as_str()])
      })
      .collect()
  };

  vec![
    ProductCategory {
      name: "burger",
      products: with_sizes(burger, &STANDARD_SIZES),
    },
    ProductCategory {
      name: "nasi",
      products: with_sizes(nasi, &STANDARD_SIZES),
    },
    ProductCategory {
      name: "mie",
      products: with_sizes(mie, &[]),
    },
  ]
}

pub fn payment_providers() -> Vec<PaymentProvider> {
  [
    ("apple", "Apple Pay", "ic_apple"),
    ("master", "Master Card", "ic_master_card"),
    ("visa", "Visa", "ic_visa"),
    (CASH_ON_DELIVERY, "Cash on Delivery", "ic_cod"),
  ]
  .into_iter()
  .map(|(id, title, icon)| PaymentProvider {
    id: id.to_string(),
    title: title.to_string(),
    icon: icon.to_string(),
  })
  .collect()
}

/// The demo user's account on each provider. Cash on delivery has no card.
pub fn user_payment_accounts() -> Vec<UserPaymentProvider> {
  [
    ("apple", "8402-5739-2039-5784"),
    ("master", "3323-8202-4748-2009"),
    ("visa", "7483-02836-4839-2833"),
    (CASH_ON_DELIVERY, ""),
  ]
  .into_iter()
  .map(|(provider_id, card_number)| UserPaymentProvider {
    provider_id: provider_id.to_string(),
    card_number: card_number.to_string(),
  })
  .collect()
}

pub fn user_location() -> Location {
  Location {
    id: 1,
    user_id: DEMO_USER_ID,
    address: "Pandaan".to_string(),
    city: "Pandaan".to_string(),
    country: "Indonesia".to_string(),
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::collections::HashSet;

  #[test]
  fn product_ids_are_unique_across_categories() {
    let ids: Vec<i64> = product_categories()
      .iter()
      .flat_map(|c| c.products.iter().map(|p| p.id))
      .collect();
    let unique: HashSet<i64> = ids.iter().copied().collect();
    assert_eq!(ids.len(), unique.len());
    assert_eq!(ids.len(), 8);
  }

  #[test]
  fn variants_belong_to_their_product() {
    for category in product_categories() {
      for product in category.products {
        assert!(product.sizes.iter().all(|s| s.product_id == product.id));
        assert!(product.colors.iter().all(|c| c.product_id == product.id));
      }
    }
  }

  #[test]
  fn only_cash_on_delivery_has_no_card() {
    for account in user_payment_accounts() {
      assert_eq!(account.card_number.is_empty(), !account.requires_card(), "{}", account.provider_id);
    }
  }
}
