//! Product route handlers.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Serialize;
use tracing::instrument;

use threadline_core::{ProductId, ProductQuery, Review, ReviewSummary, recommend};

use super::views::ProductView;
use crate::error::Result;
use crate::state::AppState;

/// Product listing response.
#[derive(Debug, Serialize)]
pub struct ProductListView {
    pub products: Vec<ProductView>,
    pub count: usize,
}

/// Product detail response.
#[derive(Debug, Serialize)]
pub struct ProductDetailView {
    pub product: ProductView,
    pub recommendations: Vec<ProductView>,
}

/// Reviews with their aggregate.
#[derive(Debug, Serialize)]
pub struct ReviewsView {
    pub summary: ReviewSummary,
    pub reviews: Vec<Review>,
}

/// List active products, filtered and sorted by the query string.
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<ProductQuery>,
) -> Result<Json<ProductListView>> {
    let catalog = state.backend().list_active_products().await?;
    let products = ProductView::list(&query.apply(&catalog), state.currency());

    Ok(Json(ProductListView {
        count: products.len(),
        products,
    }))
}

/// Product detail with its recommendations.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
) -> Result<Json<ProductDetailView>> {
    let product = state.backend().get_product(id).await?;
    let catalog = state.backend().list_active_products().await?;
    let currency = state.currency();

    Ok(Json(ProductDetailView {
        product: ProductView::new(&product, currency),
        recommendations: ProductView::list(&recommend(&product, &catalog), currency),
    }))
}

/// "You may also like" for a product.
#[instrument(skip(state))]
pub async fn recommendations(
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
) -> Result<Json<ProductListView>> {
    let product = state.backend().get_product(id).await?;
    let catalog = state.backend().list_active_products().await?;
    let products = ProductView::list(&recommend(&product, &catalog), state.currency());

    Ok(Json(ProductListView {
        count: products.len(),
        products,
    }))
}

/// Reviews for a product, newest first.
///
/// Unknown or inactive products are a 404 rather than an empty summary.
#[instrument(skip(state))]
pub async fn reviews(
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
) -> Result<Json<ReviewsView>> {
    state.backend().get_product(id).await?;
    let reviews = state.backend().list_reviews(id).await?;

    Ok(Json(ReviewsView {
        summary: ReviewSummary::from_reviews(&reviews),
        reviews: reviews.to_vec(),
    }))
}
