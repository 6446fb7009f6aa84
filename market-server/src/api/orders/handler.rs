//! Orders API handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use chrono::Utc;
use serde::Deserialize;

use crate::checkout::CheckoutRequest;
use crate::core::ServerState;
use crate::intake::ReorderAdjustment;
use crate::orders::tracker;
use crate::utils::{AppError, AppResult};
use shared::models::{Order, OrderStatus};

#[derive(Debug, Deserialize)]
pub struct BuyerQuery {
    pub buyer_id: String,
}

/// GET /api/orders?buyer_id= - buyer's order history, oldest first
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<BuyerQuery>,
) -> AppResult<Json<Vec<Order>>> {
    Ok(Json(state.orders.orders_for_buyer(&query.buyer_id)))
}

/// GET /api/orders/active?buyer_id= - tracking view with countdown
pub async fn active(
    State(state): State<ServerState>,
    Query(query): Query<BuyerQuery>,
) -> AppResult<Json<Option<tracker::ActiveOrderView>>> {
    let orders = state.orders.orders_for_buyer(&query.buyer_id);
    Ok(Json(tracker::active_order_view(&orders, Utc::now())))
}

/// GET /api/orders/:id - single order snapshot
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Order>> {
    let order = state
        .orders
        .find(&id)
        .ok_or_else(|| AppError::with_message(
            shared::ErrorCode::OrderNotFound,
            format!("order {id} not found"),
        ))?;
    Ok(Json(order))
}

#[derive(Debug, Deserialize)]
pub struct AdvanceRequest {
    pub target: OrderStatus,
}

/// POST /api/orders/:id/advance - advance lifecycle state (idempotent)
pub async fn advance(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(request): Json<AdvanceRequest>,
) -> AppResult<Json<Order>> {
    let order = state.orders.advance(&id, request.target)?;
    Ok(Json(order))
}

/// POST /api/orders/:id/verify - explicit post-delivery verification
pub async fn verify(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Order>> {
    let order = state.orders.mark_verified(&id)?;
    Ok(Json(order))
}

#[derive(Debug, Deserialize)]
pub struct ReorderBody {
    #[serde(flatten)]
    pub request: CheckoutRequest,
    #[serde(default)]
    pub adjustments: Vec<ReorderAdjustment>,
}

/// POST /api/orders/:id/reorder - one-tap re-order of a historical order
pub async fn reorder(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(body): Json<ReorderBody>,
) -> AppResult<Json<Order>> {
    let order = state
        .checkout
        .reorder(&body.request, &id, &body.adjustments)?;
    Ok(Json(order))
}
