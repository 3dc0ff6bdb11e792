//! JSON response shapes.
//!
//! Prices are sent twice: as a decimal string for arithmetic on the client
//! and pre-formatted in the store currency for display.

use rust_decimal::Decimal;
use serde::Serialize;

use threadline_core::{
    COMPARE_CAPACITY, Cart, CartItem, CategoryId, CompareList, CurrencyCode, Favorites, Price,
    Product, ProductId,
};

use crate::notice::Notice;

/// Product display data.
#[derive(Debug, Clone, Serialize)]
pub struct ProductView {
    pub id: ProductId,
    pub name: String,
    pub description: Option<String>,
    pub category_id: Option<CategoryId>,
    pub tag_variant: Option<String>,
    pub images: Vec<String>,
    pub price: Decimal,
    pub min_order_quantity: u32,
    /// Formatted unit price, e.g. "$12.50".
    pub unit_price: String,
    /// Formatted price of one MOQ pack, e.g. "$75.00".
    pub pack_price: String,
    pub available: bool,
}

impl ProductView {
    #[must_use]
    pub fn new(product: &Product, currency: CurrencyCode) -> Self {
        Self {
            id: product.id,
            name: product.name.clone(),
            description: product.description.clone(),
            category_id: product.category_id,
            tag_variant: product.tag_variant.clone(),
            images: product.images.clone(),
            price: product.price,
            min_order_quantity: product.min_order_quantity(),
            unit_price: product.unit_price(currency).display(),
            pack_price: product.pack_price(currency).display(),
            available: product.is_available(),
        }
    }

    #[must_use]
    pub fn list(products: &[Product], currency: CurrencyCode) -> Vec<Self> {
        products.iter().map(|p| Self::new(p, currency)).collect()
    }
}

/// Cart line display data.
#[derive(Debug, Clone, Serialize)]
pub struct CartItemView {
    pub product_id: ProductId,
    pub name: String,
    pub image: Option<String>,
    pub quantity: u32,
    pub min_order_quantity: u32,
    pub unit_price: String,
    pub line_total: String,
}

impl CartItemView {
    fn new(item: &CartItem, currency: CurrencyCode) -> Self {
        Self {
            product_id: item.product.id,
            name: item.product.name.clone(),
            image: item.product.thumbnail().map(String::from),
            quantity: item.quantity,
            min_order_quantity: item.product.min_order_quantity(),
            unit_price: item.product.unit_price(currency).display(),
            line_total: Price::new(item.line_total(), currency).display(),
        }
    }
}

/// Cart display data with totals.
#[derive(Debug, Clone, Serialize)]
pub struct CartView {
    pub items: Vec<CartItemView>,
    pub item_count: u32,
    pub line_count: usize,
    pub subtotal_amount: Decimal,
    pub subtotal: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<Notice>,
}

impl CartView {
    #[must_use]
    pub fn new(cart: &Cart, currency: CurrencyCode) -> Self {
        let totals = cart.totals();
        Self {
            items: cart
                .items()
                .iter()
                .map(|item| CartItemView::new(item, currency))
                .collect(),
            item_count: totals.item_count,
            line_count: totals.line_count,
            subtotal_amount: totals.subtotal,
            subtotal: Price::new(totals.subtotal, currency).display(),
            notice: None,
        }
    }

    #[must_use]
    pub fn with_notice(mut self, notice: Notice) -> Self {
        self.notice = Some(notice);
        self
    }
}

/// Cart badge count.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct CartCountView {
    pub count: u32,
}

/// Favorites display data.
#[derive(Debug, Clone, Serialize)]
pub struct FavoritesView {
    pub products: Vec<ProductView>,
    pub count: usize,
    /// Set by toggle: whether the toggled product is now a favorite.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_favorite: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<Notice>,
}

impl FavoritesView {
    #[must_use]
    pub fn new(favorites: &Favorites, currency: CurrencyCode) -> Self {
        Self {
            products: ProductView::list(favorites.products(), currency),
            count: favorites.len(),
            is_favorite: None,
            notice: None,
        }
    }

    #[must_use]
    pub fn with_notice(mut self, notice: Notice) -> Self {
        self.notice = Some(notice);
        self
    }
}

/// Compare list display data.
#[derive(Debug, Clone, Serialize)]
pub struct CompareView {
    pub products: Vec<ProductView>,
    pub count: usize,
    pub capacity: usize,
    pub is_full: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<Notice>,
}

impl CompareView {
    #[must_use]
    pub fn new(list: &CompareList, currency: CurrencyCode) -> Self {
        Self {
            products: ProductView::list(list.products(), currency),
            count: list.len(),
            capacity: COMPARE_CAPACITY,
            is_full: list.is_full(),
            notice: None,
        }
    }

    #[must_use]
    pub fn with_notice(mut self, notice: Notice) -> Self {
        self.notice = Some(notice);
        self
    }
}
