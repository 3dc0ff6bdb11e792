//! Threadline Core - Shared domain library.
//!
//! This crate provides the domain model used by all Threadline components:
//! - `storefront` - Public wholesale storefront API
//! - `cli` - Command-line tools for migrations and catalog inspection
//!
//! # Architecture
//!
//! The core crate contains only types and pure logic - no I/O, no database
//! access, no HTTP clients. Rows from the hosted backend are deserialized into
//! [`models`], and everything a visitor does to them (recommendations, listing
//! filters, cart/favorites/compare lists) is computed here.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for IDs, prices, emails, and statuses
//! - [`models`] - Rows consumed from the hosted backend
//! - [`recommend`] - Related-product recommendations
//! - [`catalog`] - Listing filters and sort orders
//! - [`lists`] - Cart, favorites, and compare lists

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod catalog;
pub mod lists;
pub mod models;
pub mod recommend;
pub mod types;

pub use catalog::{ProductQuery, ProductSort};
pub use lists::{
    COMPARE_CAPACITY, Cart, CartItem, CartTotals, CompareList, Favorites, ListError, ListKind,
};
pub use models::*;
pub use recommend::recommend;
pub use types::*;
