//! Per-visitor shopping lists: cart, favorites, and compare.
//!
//! Each list is ordered by insertion and keyed by product id, so a product
//! appears at most once. Lists hold product snapshots taken when the visitor
//! added them. Mutations that cannot apply return a [`ListError`] and leave
//! the list untouched; its `Display` text is the notice shown to the visitor.

mod cart;
mod compare;
mod favorites;

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::models::Product;
use crate::types::ProductId;

pub use cart::{Cart, CartItem, CartTotals};
pub use compare::{COMPARE_CAPACITY, CompareList};
pub use favorites::Favorites;

/// Which list an operation targeted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ListKind {
    Cart,
    Favorites,
    Compare,
}

impl fmt::Display for ListKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Cart => "cart",
            Self::Favorites => "favorites",
            Self::Compare => "compare list",
        })
    }
}

/// A list mutation that was rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ListError {
    #[error("This product is already in your {0}")]
    AlreadyPresent(ListKind),
    #[error("This product is not in your {0}")]
    NotInList(ListKind),
    #[error("You can compare up to {capacity} products at a time")]
    CapacityReached { capacity: usize },
}

/// Ordered, de-duplicated product references shared by favorites and compare.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct ProductList(Vec<Product>);

impl ProductList {
    fn position(&self, id: ProductId) -> Option<usize> {
        self.0.iter().position(|p| p.id == id)
    }

    fn contains(&self, id: ProductId) -> bool {
        self.position(id).is_some()
    }

    fn push_unique(&mut self, product: Product, kind: ListKind) -> Result<(), ListError> {
        if self.contains(product.id) {
            return Err(ListError::AlreadyPresent(kind));
        }
        self.0.push(product);
        Ok(())
    }

    fn remove(&mut self, id: ProductId, kind: ListKind) -> Result<Product, ListError> {
        let index = self.position(id).ok_or(ListError::NotInList(kind))?;
        Ok(self.0.remove(index))
    }

    /// Drop duplicate ids, keeping the first occurrence.
    fn dedup(&mut self) {
        let mut seen = std::collections::HashSet::new();
        self.0.retain(|p| seen.insert(p.id));
    }
}
