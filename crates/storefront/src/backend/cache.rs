//! Cache types for catalog reads.

use std::sync::Arc;

use threadline_core::{BannerMessage, Category, Product, ProductId, Review};

/// Cache key for catalog reads.
#[derive(Debug, Clone, Hash, PartialEq, Eq)]
pub enum CacheKey {
    ActiveProducts,
    Product(ProductId),
    Categories,
    Banners,
    Reviews(ProductId),
}

/// Cached value types.
#[derive(Debug, Clone)]
pub enum CacheValue {
    Products(Arc<Vec<Product>>),
    Product(Box<Product>),
    Categories(Arc<Vec<Category>>),
    Banners(Arc<Vec<BannerMessage>>),
    Reviews(Arc<Vec<Review>>),
}
