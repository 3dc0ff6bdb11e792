//! Shopping cart with derived totals.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{ListError, ListKind};
use crate::models::Product;
use crate::types::ProductId;

/// A product and how many units of it the visitor wants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    pub product: Product,
    pub quantity: u32,
}

impl CartItem {
    /// Unit price × quantity.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.product.price * Decimal::from(self.quantity)
    }
}

/// Totals recomputed after every cart mutation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartTotals {
    /// Sum of quantities across all lines.
    pub item_count: u32,
    /// Number of distinct products.
    pub line_count: usize,
    /// Sum of line totals.
    pub subtotal: Decimal,
}

/// The visitor's cart.
///
/// Quantities never drop below the product's minimum order quantity; a
/// quantity of zero removes the line instead. Only the lines are serialized,
/// totals are rebuilt on load.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<CartItem>", into = "Vec<CartItem>")]
pub struct Cart {
    items: Vec<CartItem>,
    totals: CartTotals,
}

impl Cart {
    #[must_use]
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    #[must_use]
    pub const fn totals(&self) -> CartTotals {
        self.totals
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[must_use]
    pub fn get(&self, id: ProductId) -> Option<&CartItem> {
        self.items.iter().find(|item| item.product.id == id)
    }

    /// Add `quantity` units (default: the product's MOQ).
    ///
    /// Adding a product already in the cart increases its quantity and
    /// refreshes the stored product snapshot. Returns the line's new quantity.
    pub fn add(&mut self, product: Product, quantity: Option<u32>) -> u32 {
        let moq = product.min_order_quantity();
        let requested = quantity.unwrap_or(moq);

        let quantity = match self.items.iter_mut().find(|item| item.product.id == product.id) {
            Some(item) => {
                item.quantity = item.quantity.saturating_add(requested).max(moq);
                item.product = product;
                item.quantity
            }
            None => {
                let quantity = requested.max(moq);
                self.items.push(CartItem { product, quantity });
                quantity
            }
        };

        self.recompute();
        quantity
    }

    /// Set a line's quantity. Zero removes the line; anything else is raised
    /// to at least the MOQ.
    ///
    /// # Errors
    ///
    /// Returns [`ListError::NotInList`] if the product is not in the cart.
    pub fn update_quantity(&mut self, id: ProductId, quantity: u32) -> Result<(), ListError> {
        if quantity == 0 {
            return self.remove(id).map(|_| ());
        }

        let item = self
            .items
            .iter_mut()
            .find(|item| item.product.id == id)
            .ok_or(ListError::NotInList(ListKind::Cart))?;
        item.quantity = quantity.max(item.product.min_order_quantity());

        self.recompute();
        Ok(())
    }

    /// Remove a line, returning it.
    ///
    /// # Errors
    ///
    /// Returns [`ListError::NotInList`] if the product is not in the cart.
    pub fn remove(&mut self, id: ProductId) -> Result<CartItem, ListError> {
        let index = self
            .items
            .iter()
            .position(|item| item.product.id == id)
            .ok_or(ListError::NotInList(ListKind::Cart))?;
        let item = self.items.remove(index);

        self.recompute();
        Ok(item)
    }

    pub fn clear(&mut self) {
        self.items.clear();
        self.recompute();
    }

    /// Refresh product snapshots from the current catalog.
    ///
    /// Lines whose product is no longer available are dropped and their ids
    /// returned. Quantities are raised to a changed MOQ.
    pub fn reprice(&mut self, catalog: &[Product]) -> Vec<ProductId> {
        let mut dropped = Vec::new();
        self.items.retain_mut(|item| {
            match catalog
                .iter()
                .find(|p| p.id == item.product.id && p.is_available())
            {
                Some(current) => {
                    item.product = current.clone();
                    item.quantity = item.quantity.max(current.min_order_quantity());
                    true
                }
                None => {
                    dropped.push(item.product.id);
                    false
                }
            }
        });
        self.recompute();
        dropped
    }

    fn recompute(&mut self) {
        self.totals = CartTotals {
            item_count: self
                .items
                .iter()
                .fold(0u32, |acc, item| acc.saturating_add(item.quantity)),
            line_count: self.items.len(),
            subtotal: self.items.iter().map(CartItem::line_total).sum(),
        };
    }
}

impl From<Vec<CartItem>> for Cart {
    fn from(items: Vec<CartItem>) -> Self {
        let mut cart = Self::default();
        for item in items.into_iter().filter(|i| i.quantity > 0) {
            match cart.items.iter_mut().find(|i| i.product.id == item.product.id) {
                Some(existing) => existing.quantity = existing.quantity.saturating_add(item.quantity),
                None => cart.items.push(item),
            }
        }
        for item in &mut cart.items {
            item.quantity = item.quantity.max(item.product.min_order_quantity());
        }
        cart.recompute();
        cart
    }
}

impl From<Cart> for Vec<CartItem> {
    fn from(cart: Cart) -> Self {
        cart.items
    }
}
