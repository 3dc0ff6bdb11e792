//! Rows consumed from the hosted backend.
//!
//! These are externally owned and validated records; the storefront only
//! reads them, except for orders which it creates on checkout.

pub mod banner;
pub mod category;
pub mod order;
pub mod product;
pub mod profile;
pub mod review;

pub use banner::BannerMessage;
pub use category::Category;
pub use order::{NewOrder, Order, OrderContact, OrderLine};
pub use product::Product;
pub use profile::{PaymentReceipt, Profile};
pub use review::{Review, ReviewSummary};
