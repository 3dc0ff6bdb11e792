//! Favorited products.

use serde::{Deserialize, Serialize};

use super::{ListError, ListKind, ProductList};
use crate::models::Product;
use crate::types::ProductId;

/// Products the visitor has favorited, in the order they were added.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<Product>", into = "Vec<Product>")]
pub struct Favorites(ProductList);

impl Favorites {
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
    pub fn contains(&self, id: ProductId) -> bool {
        self.0.contains(id)
    }

    /// # Errors
    ///
    /// Returns [`ListError::AlreadyPresent`] if the product is already a favorite.
    pub fn add(&mut self, product: Product) -> Result<(), ListError> {
        self.0.push_unique(product, ListKind::Favorites)
    }

    /// # Errors
    ///
    /// Returns [`ListError::NotInList`] if the product is not a favorite.
    pub fn remove(&mut self, id: ProductId) -> Result<Product, ListError> {
        self.0.remove(id, ListKind::Favorites)
    }

    /// Add the product if absent, remove it if present.
    ///
    /// Returns `true` when the product is a favorite afterwards.
    pub fn toggle(&mut self, product: Product) -> bool {
        if self.0.remove(product.id, ListKind::Favorites).is_ok() {
            false
        } else {
            self.0.0.push(product);
            true
        }
    }

    pub fn clear(&mut self) {
        self.0.0.clear();
    }
}

impl From<Vec<Product>> for Favorites {
    fn from(products: Vec<Product>) -> Self {
        let mut list = ProductList(products);
        list.dedup();
        Self(list)
    }
}

impl From<Favorites> for Vec<Product> {
    fn from(favorites: Favorites) -> Self {
        favorites.0.0
    }
}
