//! Wholesale orders.
//!
//! Orders are the only rows the storefront writes. A checkout turns the
//! visitor's cart into a [`NewOrder`] which the hosted backend stores and
//! returns as an [`Order`].

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::lists::Cart;
use crate::types::{Email, OrderId, OrderStatus, ProductId, ProfileId};

/// One product line inside an order's `items` JSON column.
///
/// Name and unit price are captured at checkout so later catalog edits do
/// not rewrite order history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLine {
    pub product_id: ProductId,
    pub product_name: String,
    pub unit_price: Decimal,
    pub quantity: u32,
    pub line_total: Decimal,
}

/// Who placed the order and where it ships.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderContact {
    pub contact_name: String,
    pub email: Email,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub company_name: Option<String>,
    pub shipping_address: String,
    #[serde(default)]
    pub note: Option<String>,
}

/// Insert payload for the `orders` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewOrder {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_id: Option<ProfileId>,
    pub status: OrderStatus,
    pub items: Vec<OrderLine>,
    pub total: Decimal,
    #[serde(flatten)]
    pub contact: OrderContact,
}

impl NewOrder {
    /// Build an order from the cart's current lines.
    ///
    /// Returns `None` for an empty cart.
    #[must_use]
    pub fn from_cart(cart: &Cart, contact: OrderContact, profile_id: Option<ProfileId>) -> Option<Self> {
        if cart.is_empty() {
            return None;
        }

        let items = cart
            .items()
            .iter()
            .map(|item| OrderLine {
                product_id: item.product.id,
                product_name: item.product.name.clone(),
                unit_price: item.product.price,
                quantity: item.quantity,
                line_total: item.line_total(),
            })
            .collect();

        Some(Self {
            profile_id,
            status: OrderStatus::Pending,
            items,
            total: cart.totals().subtotal,
            contact,
        })
    }
}

/// A row from the `orders` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    #[serde(default)]
    pub profile_id: Option<ProfileId>,
    #[serde(default)]
    pub status: OrderStatus,
    #[serde(default)]
    pub items: Vec<OrderLine>,
    pub total: Decimal,
    #[serde(flatten)]
    pub contact: OrderContact,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::models::Product;

    fn contact() -> OrderContact {
        OrderContact {
            contact_name: "Dilan Kaya".to_string(),
            email: Email::parse("orders@boutique.com").unwrap(),
            phone: None,
            company_name: Some("Boutique Ltd".to_string()),
            shipping_address: "12 Market St".to_string(),
            note: None,
        }
    }

    #[test]
    fn test_empty_cart_builds_no_order() {
        assert!(NewOrder::from_cart(&Cart::default(), contact(), None).is_none());
    }

    #[test]
    fn test_order_lines_capture_cart() {
        let mut cart = Cart::default();
        cart.add(
            Product::new(ProductId::new(1), "Shirt", Decimal::new(1500, 2)).with_moq(3),
            None,
        );
        cart.add(Product::new(ProductId::new(2), "Belt", Decimal::new(800, 2)), Some(2));

        let order = NewOrder::from_cart(&cart, contact(), None).unwrap();
        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(order.items.len(), 2);
        assert_eq!(order.items[0].quantity, 3);
        assert_eq!(order.items[0].line_total, Decimal::new(45, 0));
        assert_eq!(order.total, Decimal::new(61, 0));
    }

    #[test]
    fn test_new_order_flattens_contact_columns() {
        let mut cart = Cart::default();
        cart.add(Product::new(ProductId::new(1), "Shirt", Decimal::TEN), None);
        let order = NewOrder::from_cart(&cart, contact(), None).unwrap();

        let json = serde_json::to_value(&order).unwrap();
        assert_eq!(json["contact_name"], "Dilan Kaya");
        assert_eq!(json["email"], "orders@boutique.com");
        assert_eq!(json["status"], "pending");
        assert!(json.get("profile_id").is_none());
        assert!(json.get("contact").is_none());
    }
}
