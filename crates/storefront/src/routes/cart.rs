//! Cart route handlers.
//!
//! The cart lives in the visitor's session. Every mutation loads it, applies
//! the change, writes it back, and returns the updated cart with a notice.

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use tower_sessions::Session;
use tracing::instrument;

use threadline_core::{Cart, Email, NewOrder, OrderContact, OrderId, OrderStatus, Price, ProductId};

use super::ProductForm;
use super::views::{CartCountView, CartView};
use crate::error::{AppError, Result, add_breadcrumb};
use crate::notice::Notice;
use crate::session::SessionList;
use crate::state::AppState;

/// Add to cart request body.
#[derive(Debug, Deserialize)]
pub struct AddToCartForm {
    pub product_id: ProductId,
    /// Units to add; defaults to the product's MOQ.
    pub quantity: Option<u32>,
}

/// Update quantity request body.
#[derive(Debug, Deserialize)]
pub struct UpdateCartForm {
    pub product_id: ProductId,
    /// New quantity; zero removes the line.
    pub quantity: u32,
}

/// Checkout request body.
#[derive(Debug, Deserialize)]
pub struct CheckoutForm {
    pub contact_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub company_name: Option<String>,
    pub shipping_address: String,
    pub note: Option<String>,
}

impl CheckoutForm {
    /// Validate and normalize the contact details.
    ///
    /// # Errors
    ///
    /// Returns `AppError::BadRequest` naming the first invalid field.
    pub fn into_contact(self) -> Result<OrderContact> {
        let contact_name = required(self.contact_name, "Please enter a contact name")?;
        let shipping_address = required(self.shipping_address, "Please enter a shipping address")?;
        let email = Email::parse(&self.email)
            .map_err(|e| AppError::BadRequest(format!("Please check your email address: {e}")))?;

        Ok(OrderContact {
            contact_name,
            email,
            phone: optional(self.phone),
            company_name: optional(self.company_name),
            shipping_address,
            note: optional(self.note),
        })
    }
}

fn required(value: String, message: &str) -> Result<String> {
    optional(Some(value)).ok_or_else(|| AppError::BadRequest(message.to_string()))
}

fn optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Checkout result.
#[derive(Debug, Serialize)]
pub struct CheckoutView {
    pub order_id: OrderId,
    pub status: OrderStatus,
    pub total: String,
    pub notice: Notice,
}

/// Display the cart.
#[instrument(skip(state, session))]
pub async fn show(State(state): State<AppState>, session: Session) -> Json<CartView> {
    let cart = Cart::load(&session).await;
    Json(CartView::new(&cart, state.currency()))
}

/// Cart badge count.
#[instrument(skip(session))]
pub async fn count(session: Session) -> Json<CartCountView> {
    let cart = Cart::load(&session).await;
    Json(CartCountView {
        count: cart.totals().item_count,
    })
}

/// Add a product to the cart.
///
/// The product is looked up in the catalog so the cart holds a fresh
/// snapshot; unavailable products are rejected.
#[instrument(skip(state, session))]
pub async fn add(
    State(state): State<AppState>,
    session: Session,
    Json(form): Json<AddToCartForm>,
) -> Result<Json<CartView>> {
    let product = state.backend().get_product(form.product_id).await?;
    if !product.is_available() {
        return Err(AppError::BadRequest(format!(
            "{} is currently unavailable",
            product.name
        )));
    }

    let mut cart = Cart::load(&session).await;
    let name = product.name.clone();
    let quantity = cart.add(product, form.quantity);
    cart.save(&session).await?;

    add_breadcrumb(
        "cart",
        "Added to cart",
        Some(&[("product_id", form.product_id.to_string().as_str())]),
    );
    tracing::info!(product_id = %form.product_id, quantity, "added to cart");

    Ok(Json(
        CartView::new(&cart, state.currency())
            .with_notice(Notice::success(format!("{name} is in your cart ({quantity} units)"))),
    ))
}

/// Set a line's quantity (zero removes it).
#[instrument(skip(state, session))]
pub async fn update(
    State(state): State<AppState>,
    session: Session,
    Json(form): Json<UpdateCartForm>,
) -> Result<Json<CartView>> {
    let mut cart = Cart::load(&session).await;

    let notice = match cart.update_quantity(form.product_id, form.quantity) {
        Ok(()) => {
            cart.save(&session).await?;
            match cart.get(form.product_id) {
                Some(item) if item.quantity != form.quantity => Notice::info(format!(
                    "{} has a minimum order of {} units",
                    item.product.name, item.quantity
                )),
                Some(_) => Notice::success("Cart updated"),
                None => Notice::success("Removed from your cart"),
            }
        }
        Err(e) => Notice::from(&e),
    };

    Ok(Json(CartView::new(&cart, state.currency()).with_notice(notice)))
}

/// Remove a line from the cart.
#[instrument(skip(state, session))]
pub async fn remove(
    State(state): State<AppState>,
    session: Session,
    Json(form): Json<ProductForm>,
) -> Result<Json<CartView>> {
    let mut cart = Cart::load(&session).await;

    let notice = match cart.remove(form.product_id) {
        Ok(item) => {
            cart.save(&session).await?;
            Notice::success(format!("Removed {} from your cart", item.product.name))
        }
        Err(e) => Notice::from(&e),
    };

    Ok(Json(CartView::new(&cart, state.currency()).with_notice(notice)))
}

/// Empty the cart.
#[instrument(skip(state, session))]
pub async fn clear(State(state): State<AppState>, session: Session) -> Result<Json<CartView>> {
    let mut cart = Cart::load(&session).await;
    cart.clear();
    cart.save(&session).await?;

    Ok(Json(
        CartView::new(&cart, state.currency()).with_notice(Notice::info("Your cart is empty")),
    ))
}

/// Submit the cart as an order and clear it.
///
/// Lines are repriced against the live catalog first. If any product has
/// become unavailable the cart is updated and the checkout is rejected so
/// the visitor can review it.
#[instrument(skip(state, session, form))]
pub async fn checkout(
    State(state): State<AppState>,
    session: Session,
    Json(form): Json<CheckoutForm>,
) -> Result<Json<CheckoutView>> {
    let mut cart = Cart::load(&session).await;
    if cart.is_empty() {
        return Err(AppError::BadRequest("Your cart is empty".to_string()));
    }
    let contact = form.into_contact()?;

    let catalog = state.backend().fetch_active_products().await?;
    let dropped = cart.reprice(&catalog);
    if !dropped.is_empty() {
        cart.save(&session).await?;
        tracing::info!(?dropped, "checkout blocked by unavailable products");
        return Err(AppError::BadRequest(
            "Some products are no longer available and were removed from your cart. Please review it before ordering."
                .to_string(),
        ));
    }

    let new_order = NewOrder::from_cart(&cart, contact, None)
        .ok_or_else(|| AppError::BadRequest("Your cart is empty".to_string()))?;
    let order = state.backend().create_order(&new_order).await?;

    cart.clear();
    cart.save(&session).await?;
    add_breadcrumb("checkout", "Order placed", Some(&[("order_id", order.id.to_string().as_str())]));

    Ok(Json(CheckoutView {
        order_id: order.id,
        status: order.status,
        total: Price::new(order.total, state.currency()).display(),
        notice: Notice::success(format!(
            "Thank you! Order #{} has been received",
            order.id
        )),
    }))
}
