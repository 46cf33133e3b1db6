// storefront/src/models/mod.rs

//! Plain records for every persisted row, plus the read models the store
//! assembles from several tables (`OrderDetails`, `PaymentOption`).

pub mod advertisement;
pub mod bookmark_item;
pub mod cart_item;
pub mod location;
pub mod manufacturer;
pub mod notification;
pub mod order;
pub mod payment;
pub mod product;
pub mod review;
pub mod user;

pub use advertisement::{Advertisement, AdvertisementType};
pub use bookmark_item::BookmarkItem;
pub use cart_item::CartItem;
pub use location::Location;
pub use manufacturer::Manufacturer;
pub use notification::Notification;
pub use order::{Order, OrderDetails, OrderItem, OrderPayment, OrderStatus};
pub use payment::{PaymentOption, PaymentProvider, UserPaymentProvider, CASH_ON_DELIVERY};
pub use product::{Product, ProductColor, ProductSize};
pub use review::Review;
pub use user::{NewUser, User};
