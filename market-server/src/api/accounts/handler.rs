//! Accounts API handlers

use axum::{
    Json,
    extract::{Path, State},
};
use serde::{Deserialize, Serialize};

use crate::core::ServerState;
use crate::utils::AppResult;

#[derive(Debug, Serialize, Deserialize)]
pub struct AccountFlag {
    pub outstanding: bool,
}

/// GET /api/accounts/:buyer_id/outstanding - current flag
pub async fn get_flag(
    State(state): State<ServerState>,
    Path(buyer_id): Path<String>,
) -> AppResult<Json<AccountFlag>> {
    Ok(Json(AccountFlag {
        outstanding: state.accounts.has_outstanding_invoices(&buyer_id),
    }))
}

/// PUT /api/accounts/:buyer_id/outstanding - raise or clear the flag
pub async fn set_flag(
    State(state): State<ServerState>,
    Path(buyer_id): Path<String>,
    Json(flag): Json<AccountFlag>,
) -> AppResult<Json<AccountFlag>> {
    state.accounts.set_outstanding(&buyer_id, flag.outstanding);
    Ok(Json(flag))
}
