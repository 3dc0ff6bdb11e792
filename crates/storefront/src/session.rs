//! Per-visitor list persistence.
//!
//! Cart, favorites, and compare lists live in the visitor's session, one key
//! per list. The whole list is written back after every mutation.

use serde::Serialize;
use serde::de::DeserializeOwned;
use tower_sessions::Session;

use threadline_core::{Cart, CompareList, Favorites};

/// Session keys for visitor lists.
pub mod keys {
    /// Key for the cart lines.
    pub const CART: &str = "cart";

    /// Key for favorited products.
    pub const FAVORITES: &str = "favorites";

    /// Key for the compare list.
    pub const COMPARE: &str = "compare";
}

/// A list stored under a fixed session key.
pub trait SessionList: Serialize + DeserializeOwned + Default + Send + Sync {
    /// Session key the list is stored under.
    const KEY: &'static str;

    /// Load the list, or an empty one if the session has none.
    ///
    /// Unreadable data (e.g. written by an older release) is logged and
    /// replaced by an empty list rather than failing the request.
    fn load(session: &Session) -> impl Future<Output = Self> + Send {
        async move {
            match session.get::<Self>(Self::KEY).await {
                Ok(list) => list.unwrap_or_default(),
                Err(e) => {
                    tracing::warn!(key = Self::KEY, error = %e, "Discarding unreadable session list");
                    Self::default()
                }
            }
        }
    }

    /// Persist the list.
    ///
    /// # Errors
    ///
    /// Returns the session store error if the write fails.
    fn save(
        &self,
        session: &Session,
    ) -> impl Future<Output = Result<(), tower_sessions::session::Error>> + Send {
        async move { session.insert(Self::KEY, self).await }
    }
}

impl SessionList for Cart {
    const KEY: &'static str = keys::CART;
}

impl SessionList for Favorites {
    const KEY: &'static str = keys::FAVORITES;
}

impl SessionList for CompareList {
    const KEY: &'static str = keys::COMPARE;
}
