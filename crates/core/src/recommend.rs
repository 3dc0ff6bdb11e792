//! Related-product recommendations.
//!
//! Recommendations are the union of three passes over the catalog, in
//! priority order:
//!
//! 1. same category
//! 2. same tag variant
//! 3. price within ±20% of the current product
//!
//! Each pass skips products already picked, the current product is never
//! included, and the result is capped at [`MAX_RECOMMENDATIONS`].

use std::collections::HashSet;

use rust_decimal::Decimal;

use crate::models::Product;
use crate::types::ProductId;

/// Upper bound on the number of recommendations returned.
pub const MAX_RECOMMENDATIONS: usize = 10;

/// Inclusive price band around `price`: `[0.8 × price, 1.2 × price]`.
#[must_use]
pub fn price_band(price: Decimal) -> (Decimal, Decimal) {
    (price * Decimal::new(8, 1), price * Decimal::new(12, 1))
}

/// Recommend products related to `current` from `catalog`.
///
/// Inactive catalog entries are skipped. Catalog order is preserved within
/// each pass.
#[must_use]
pub fn recommend(current: &Product, catalog: &[Product]) -> Vec<Product> {
    let (low, high) = price_band(current.price);

    let same_category = |p: &Product| current.category_id.is_some() && p.category_id == current.category_id;
    let same_tag = |p: &Product| current.tag_variant.is_some() && p.tag_variant == current.tag_variant;
    let similar_price = |p: &Product| p.price >= low && p.price <= high;

    let mut picker = Picker::new(current.id);
    picker.take(catalog, same_category);
    picker.take(catalog, same_tag);
    picker.take(catalog, similar_price);
    picker.picked
}

/// Accumulates picks across passes, tracking seen ids.
struct Picker {
    seen: HashSet<ProductId>,
    picked: Vec<Product>,
}

impl Picker {
    fn new(exclude: ProductId) -> Self {
        Self {
            seen: HashSet::from([exclude]),
            picked: Vec::with_capacity(MAX_RECOMMENDATIONS),
        }
    }

    fn take(&mut self, catalog: &[Product], matches: impl Fn(&Product) -> bool) {
        for product in catalog {
            if self.picked.len() >= MAX_RECOMMENDATIONS {
                return;
            }
            if product.is_active && matches(product) && self.seen.insert(product.id) {
                self.picked.push(product.clone());
            }
        }
    }
}
