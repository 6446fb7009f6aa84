//! Orders API module

mod handler;

pub use handler::{AdvanceRequest, BuyerQuery, ReorderBody};

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/orders", order_routes())
}

fn order_routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list))
        .route("/active", get(handler::active))
        .route("/{id}", get(handler::get_by_id))
        .route("/{id}/advance", post(handler::advance))
        .route("/{id}/verify", post(handler::verify))
        .route("/{id}/reorder", post(handler::reorder))
}
