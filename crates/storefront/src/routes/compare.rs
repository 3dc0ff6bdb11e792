//! Compare list route handlers.
//!
//! The list holds at most `COMPARE_CAPACITY` products. A full list or a
//! duplicate is not an error: the unchanged list comes back with a warning.

use axum::{Json, extract::State};
use tower_sessions::Session;
use tracing::instrument;

use threadline_core::CompareList;

use super::ProductForm;
use super::views::CompareView;
use crate::error::{Result, add_breadcrumb};
use crate::notice::Notice;
use crate::session::SessionList;
use crate::state::AppState;

/// Display the compare list.
#[instrument(skip(state, session))]
pub async fn show(State(state): State<AppState>, session: Session) -> Json<CompareView> {
    let list = CompareList::load(&session).await;
    Json(CompareView::new(&list, state.currency()))
}

/// Add a product to the compare list.
#[instrument(skip(state, session))]
pub async fn add(
    State(state): State<AppState>,
    session: Session,
    Json(form): Json<ProductForm>,
) -> Result<Json<CompareView>> {
    let product = state.backend().get_product(form.product_id).await?;
    let name = product.name.clone();
    let mut list = CompareList::load(&session).await;

    let notice = match list.add(product) {
        Ok(()) => {
            list.save(&session).await?;
            add_breadcrumb(
                "compare",
                "Added to compare",
                Some(&[("product_id", form.product_id.to_string().as_str())]),
            );
            Notice::success(format!("Added {name} to compare"))
        }
        Err(e) => {
            tracing::debug!(product_id = %form.product_id, error = %e, "compare add rejected");
            Notice::from(&e)
        }
    };

    Ok(Json(CompareView::new(&list, state.currency()).with_notice(notice)))
}

/// Remove a product from the compare list.
#[instrument(skip(state, session))]
pub async fn remove(
    State(state): State<AppState>,
    session: Session,
    Json(form): Json<ProductForm>,
) -> Result<Json<CompareView>> {
    let mut list = CompareList::load(&session).await;

    let notice = match list.remove(form.product_id) {
        Ok(product) => {
            list.save(&session).await?;
            Notice::success(format!("Removed {} from compare", product.name))
        }
        Err(e) => Notice::from(&e),
    };

    Ok(Json(CompareView::new(&list, state.currency()).with_notice(notice)))
}

/// Empty the compare list.
#[instrument(skip(state, session))]
pub async fn clear(State(state): State<AppState>, session: Session) -> Result<Json<CompareView>> {
    let mut list = CompareList::load(&session).await;
    list.clear();
    list.save(&session).await?;

    Ok(Json(
        CompareView::new(&list, state.currency()).with_notice(Notice::info("Your compare list is empty")),
    ))
}
