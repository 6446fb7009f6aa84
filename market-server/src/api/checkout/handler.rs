//! Checkout API handlers

use axum::{Json, extract::State};
use serde::Deserialize;

use crate::checkout::CheckoutRequest;
use crate::core::ServerState;
use crate::utils::AppResult;
use shared::models::{CartLine, Order};

#[derive(Debug, Deserialize)]
pub struct CheckoutBody {
    #[serde(flatten)]
    pub request: CheckoutRequest,
    pub lines: Vec<CartLine>,
}

/// POST /api/checkout - confirm an explicit cart into an order
pub async fn confirm(
    State(state): State<ServerState>,
    Json(body): Json<CheckoutBody>,
) -> AppResult<Json<Order>> {
    let order = state.checkout.confirm_cart(&body.request, &body.lines)?;
    Ok(Json(order))
}
