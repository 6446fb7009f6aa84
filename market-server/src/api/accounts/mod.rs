//! Accounts API module

mod handler;

pub use handler::AccountFlag;

use axum::{
    Router,
    routing::get,
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().route(
        "/api/accounts/{buyer_id}/outstanding",
        get(handler::get_flag).put(handler::set_flag),
    )
}
