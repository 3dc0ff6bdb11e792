//! Catalog listing filters and sort orders.
//!
//! The storefront fetches the whole active catalog once (it is cached) and
//! narrows it in memory for each listing request.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::Product;
use crate::types::CategoryId;

/// Listing sort order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductSort {
    /// Most recently created first.
    #[default]
    Newest,
    PriceAsc,
    PriceDesc,
    /// Alphabetical by name, case-insensitive.
    Name,
}

/// Filters for a product listing. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProductQuery {
    pub category: Option<CategoryId>,
    pub tag: Option<String>,
    pub min_price: Option<Decimal>,
    pub max_price: Option<Decimal>,
    /// Case-insensitive substring matched against name and description.
    #[serde(rename = "q")]
    pub search: Option<String>,
    pub sort: Option<ProductSort>,
    pub limit: Option<usize>,
}

impl ProductQuery {
    /// Whether `product` passes every filter. Inactive products never match.
    #[must_use]
    pub fn matches(&self, product: &Product) -> bool {
        if !product.is_active {
            return false;
        }
        if self.category.is_some() && product.category_id != self.category {
            return false;
        }
        if let Some(tag) = self.tag.as_deref()
            && product.tag_variant.as_deref() != Some(tag)
        {
            return false;
        }
        if self.min_price.is_some_and(|min| product.price < min)
            || self.max_price.is_some_and(|max| product.price > max)
        {
            return false;
        }
        match self.search_term() {
            Some(term) => {
                product.name.to_lowercase().contains(&term)
                    || product
                        .description
                        .as_deref()
                        .is_some_and(|d| d.to_lowercase().contains(&term))
            }
            None => true,
        }
    }

    fn search_term(&self) -> Option<String> {
        self.search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_lowercase)
    }

    /// Filter, sort, and limit `catalog`.
    #[must_use]
    pub fn apply(&self, catalog: &[Product]) -> Vec<Product> {
        let mut products: Vec<Product> = catalog.iter().filter(|p| self.matches(p)).cloned().collect();

        match self.sort.unwrap_or_default() {
            ProductSort::Newest => products.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
            ProductSort::PriceAsc => products.sort_by(|a, b| a.price.cmp(&b.price)),
            ProductSort::PriceDesc => products.sort_by(|a, b| b.price.cmp(&a.price)),
            ProductSort::Name => products.sort_by_cached_key(|p| p.name.to_lowercase()),
        }

        if let Some(limit) = self.limit {
            products.truncate(limit);
        }
        products
    }
}
