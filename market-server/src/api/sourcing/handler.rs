//! Sourcing API handlers

use axum::{
    Json,
    extract::{Path, State},
};

use crate::core::ServerState;
use crate::utils::AppResult;
use shared::models::{SourcingRequest, SourcingRequestCreate};

/// GET /api/sourcing - all sourcing requests, newest first
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<SourcingRequest>>> {
    Ok(Json(state.sourcing.list()))
}

/// POST /api/sourcing - open a new sourcing request
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<SourcingRequestCreate>,
) -> AppResult<Json<SourcingRequest>> {
    Ok(Json(state.sourcing.create(payload)?))
}

/// POST /api/sourcing/:id/dispatch - dispatch an open request to wholesalers
pub async fn dispatch(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<SourcingRequest>> {
    Ok(Json(state.sourcing.dispatch(&id)?))
}
