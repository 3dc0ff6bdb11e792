//! Side-by-side product comparison.

use serde::{Deserialize, Serialize};

use super::{ListError, ListKind, ProductList};
use crate::models::Product;
use crate::types::ProductId;

/// Maximum number of products compared at once.
pub const COMPARE_CAPACITY: usize = 4;

/// Products selected for comparison, at most [`COMPARE_CAPACITY`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<Product>", into = "Vec<Product>")]
pub struct CompareList(ProductList);

impl CompareList {
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.0.0
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.0.is_empty()
    }

    #[must_use]
    pub fn is_full(&self) -> bool {
        self.len() >= COMPARE_CAPACITY
    }

    #[must_use]
    pub fn contains(&self, id: ProductId) -> bool {
        self.0.contains(id)
    }

    /// # Errors
    ///
    /// Returns [`ListError::AlreadyPresent`] for a product already being
    /// compared and [`ListError::CapacityReached`] when the list is full. The
    /// list is unchanged in both cases.
    pub fn add(&mut self, product: Product) -> Result<(), ListError> {
        if self.contains(product.id) {
            return Err(ListError::AlreadyPresent(ListKind::Compare));
        }
        if self.is_full() {
            return Err(ListError::CapacityReached {
                capacity: COMPARE_CAPACITY,
            });
        }
        self.0.push_unique(product, ListKind::Compare)
    }

    /// # Errors
    ///
    /// Returns [`ListError::NotInList`] if the product is not being compared.
    pub fn remove(&mut self, id: ProductId) -> Result<Product, ListError> {
        self.0.remove(id, ListKind::Compare)
    }

    pub fn clear(&mut self) {
        self.0.0.clear();
    }
}

impl From<Vec<Product>> for CompareList {
    fn from(products: Vec<Product>) -> Self {
        let mut list = ProductList(products);
        list.dedup();
        list.0.truncate(COMPARE_CAPACITY);
        Self(list)
    }
}

impl From<CompareList> for Vec<Product> {
    fn from(list: CompareList) -> Self {
        list.0.0
    }
}
