//! Product API handlers

use axum::{
    Json,
    extract::{Path, State},
};

use crate::core::ServerState;
use crate::utils::{AppError, AppResult};
use shared::models::{CatalogProduct, ProductCreate};

/// GET /api/products - full catalog snapshot
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<CatalogProduct>>> {
    Ok(Json(state.catalog.snapshot()))
}

/// GET /api/products/:id - single product
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<CatalogProduct>> {
    let product = state
        .catalog
        .get(&id)
        .ok_or_else(|| AppError::not_found(format!("product {id}")))?;
    Ok(Json(product))
}

/// POST /api/products - append a product to the catalog
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<ProductCreate>,
) -> AppResult<Json<CatalogProduct>> {
    let product = state.catalog.add(payload)?;
    Ok(Json(product))
}
