//! Catalog product rows.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::{CategoryId, CurrencyCode, Price, ProductId};

/// A product from the hosted backend's `products` table.
///
/// `price` is the unit price. Wholesale products are sold in packs of at
/// least [`Product::min_order_quantity`] units.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub price: Decimal,
    /// Minimum order quantity. Missing or zero means 1.
    #[serde(default)]
    pub moq: Option<u32>,
    #[serde(default)]
    pub category_id: Option<CategoryId>,
    /// Merchandising tag such as `new`, `bestseller` or `sale`.
    #[serde(default)]
    pub tag_variant: Option<String>,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub stock: Option<i32>,
    #[serde(default = "default_active")]
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

const fn default_active() -> bool {
    true
}

impl Product {
    /// Create an active product with only the required columns set.
    #[must_use]
    pub fn new(id: ProductId, name: impl Into<String>, price: Decimal) -> Self {
        Self {
            id,
            name: name.into(),
            description: None,
            price,
            moq: None,
            category_id: None,
            tag_variant: None,
            images: Vec::new(),
            stock: None,
            is_active: true,
            created_at: Utc::now(),
        }
    }

    #[must_use]
    pub const fn with_category(mut self, category_id: CategoryId) -> Self {
        self.category_id = Some(category_id);
        self
    }

    #[must_use]
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag_variant = Some(tag.into());
        self
    }

    #[must_use]
    pub const fn with_moq(mut self, moq: u32) -> Self {
        self.moq = Some(moq);
        self
    }

    /// Minimum order quantity, never below 1.
    #[must_use]
    pub fn min_order_quantity(&self) -> u32 {
        self.moq.unwrap_or(1).max(1)
    }

    /// Per-unit price.
    #[must_use]
    pub const fn unit_price(&self, currency: CurrencyCode) -> Price {
        Price::new(self.price, currency)
    }

    /// Price of one minimum-order pack (unit price × MOQ).
    #[must_use]
    pub fn pack_price(&self, currency: CurrencyCode) -> Price {
        self.unit_price(currency).times(self.min_order_quantity())
    }

    /// First image URL, used as the thumbnail.
    #[must_use]
    pub fn thumbnail(&self) -> Option<&str> {
        self.images.first().map(String::as_str)
    }

    /// Whether the product can currently be ordered.
    ///
    /// A missing stock column means stock is not tracked.
    #[must_use]
    pub fn is_available(&self) -> bool {
        self.is_active && self.stock.is_none_or(|stock| stock > 0)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_backend_row() {
        let json = r#"{
            "id": 12,
            "name": "Linen Blazer",
            "description": null,
            "price": 42.5,
            "moq": 6,
            "category_id": 3,
            "tag_variant": "new",
            "images": ["https://cdn.example.com/blazer.jpg"],
            "stock": 120,
            "is_active": true,
            "created_at": "2024-03-01T10:00:00Z"
        }"#;

        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.id, ProductId::new(12));
        assert_eq!(product.price, Decimal::new(425, 1));
        assert_eq!(product.min_order_quantity(), 6);
        assert_eq!(product.category_id, Some(CategoryId::new(3)));
        assert_eq!(product.thumbnail(), Some("https://cdn.example.com/blazer.jpg"));
    }

    #[test]
    fn test_missing_optional_columns_default() {
        let json = r#"{"id": 1, "name": "Tee", "price": "9.90", "created_at": "2024-03-01T10:00:00Z"}"#;
        let product: Product = serde_json::from_str(json).unwrap();
        assert!(product.is_active);
        assert!(product.images.is_empty());
        assert_eq!(product.min_order_quantity(), 1);
    }

    #[test]
    fn test_zero_moq_is_treated_as_one() {
        let product = Product::new(ProductId::new(1), "Scarf", Decimal::ONE).with_moq(0);
        assert_eq!(product.min_order_quantity(), 1);
    }

    #[test]
    fn test_pack_price_uses_moq() {
        let product = Product::new(ProductId::new(1), "Denim", Decimal::new(1250, 2)).with_moq(4);
        assert_eq!(product.pack_price(CurrencyCode::USD).display(), "$50.00");
        assert_eq!(product.unit_price(CurrencyCode::USD).display(), "$12.50");
    }

    #[test]
    fn test_availability() {
        let mut product = Product::new(ProductId::new(1), "Coat", Decimal::TEN);
        assert!(product.is_available());
        product.stock = Some(0);
        assert!(!product.is_available());
        product.stock = Some(5);
        product.is_active = false;
        assert!(!product.is_available());
    }
}
