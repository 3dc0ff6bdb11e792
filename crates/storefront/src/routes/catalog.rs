//! Category and banner handlers.

use axum::{Json, extract::State};
use tracing::instrument;

use threadline_core::{BannerMessage, Category};

use crate::error::Result;
use crate::state::AppState;

/// All categories, alphabetically.
#[instrument(skip(state))]
pub async fn categories(State(state): State<AppState>) -> Result<Json<Vec<Category>>> {
    let categories = state.backend().list_categories().await?;
    Ok(Json(categories.to_vec()))
}

/// Active announcement banners in display order.
#[instrument(skip(state))]
pub async fn banners(State(state): State<AppState>) -> Result<Json<Vec<BannerMessage>>> {
    let banners = state.backend().list_active_banners().await?;
    Ok(Json(banners.to_vec()))
}
