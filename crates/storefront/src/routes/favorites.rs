//! Favorites route handlers.

use axum::{Json, extract::State};
use tower_sessions::Session;
use tracing::instrument;

use threadline_core::Favorites;

use super::ProductForm;
use super::views::FavoritesView;
use crate::error::{Result, add_breadcrumb};
use crate::notice::Notice;
use crate::session::SessionList;
use crate::state::AppState;

/// Display saved favorites.
#[instrument(skip(state, session))]
pub async fn show(State(state): State<AppState>, session: Session) -> Json<FavoritesView> {
    let favorites = Favorites::load(&session).await;
    Json(FavoritesView::new(&favorites, state.currency()))
}

/// Save a product. Saving it twice is rejected with a warning.
#[instrument(skip(state, session))]
pub async fn add(
    State(state): State<AppState>,
    session: Session,
    Json(form): Json<ProductForm>,
) -> Result<Json<FavoritesView>> {
    let product = state.backend().get_product(form.product_id).await?;
    let name = product.name.clone();
    let mut favorites = Favorites::load(&session).await;

    let notice = match favorites.add(product) {
        Ok(()) => {
            favorites.save(&session).await?;
            add_breadcrumb(
                "favorites",
                "Added to favorites",
                Some(&[("product_id", form.product_id.to_string().as_str())]),
            );
            Notice::success(format!("Saved {name} to your favorites"))
        }
        Err(e) => Notice::from(&e),
    };

    Ok(Json(
        FavoritesView::new(&favorites, state.currency()).with_notice(notice),
    ))
}

/// Remove a saved product.
#[instrument(skip(state, session))]
pub async fn remove(
    State(state): State<AppState>,
    session: Session,
    Json(form): Json<ProductForm>,
) -> Result<Json<FavoritesView>> {
    let mut favorites = Favorites::load(&session).await;

    let notice = match favorites.remove(form.product_id) {
        Ok(product) => {
            favorites.save(&session).await?;
            Notice::success(format!("Removed {} from your favorites", product.name))
        }
        Err(e) => Notice::from(&e),
    };

    Ok(Json(
        FavoritesView::new(&favorites, state.currency()).with_notice(notice),
    ))
}

/// Heart button: save the product if absent, otherwise remove it.
#[instrument(skip(state, session))]
pub async fn toggle(
    State(state): State<AppState>,
    session: Session,
    Json(form): Json<ProductForm>,
) -> Result<Json<FavoritesView>> {
    let mut favorites = Favorites::load(&session).await;

    // Removing never needs the catalog, so a delisted product can still be un-hearted.
    let is_favorite = if let Ok(product) = favorites.remove(form.product_id) {
        tracing::debug!(product_id = %product.id, "favorite removed by toggle");
        false
    } else {
        let product = state.backend().get_product(form.product_id).await?;
        favorites.toggle(product)
    };
    favorites.save(&session).await?;

    let notice = if is_favorite {
        Notice::success("Saved to your favorites")
    } else {
        Notice::info("Removed from your favorites")
    };

    let mut view = FavoritesView::new(&favorites, state.currency()).with_notice(notice);
    view.is_favorite = Some(is_favorite);
    Ok(Json(view))
}

/// Remove every saved product.
#[instrument(skip(state, session))]
pub async fn clear(State(state): State<AppState>, session: Session) -> Result<Json<FavoritesView>> {
    let mut favorites = Favorites::load(&session).await;
    favorites.clear();
    favorites.save(&session).await?;

    Ok(Json(
        FavoritesView::new(&favorites, state.currency())
            .with_notice(Notice::info("Your favorites list is empty")),
    ))
}
