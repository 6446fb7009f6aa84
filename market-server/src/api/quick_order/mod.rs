//! Quick-order API module
//!
//! Free-text natural-language ordering: parse into a reviewable line list,
//! then confirm the reviewed list into an order.

mod handler;

pub use handler::{ConfirmRequest, ParseRequest, ParseResponse};

use axum::{Router, routing::post};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/quick-order", quick_order_routes())
}

fn quick_order_routes() -> Router<ServerState> {
    Router::new()
        .route("/parse", post(handler::parse))
        .route("/confirm", post(handler::confirm))
}
