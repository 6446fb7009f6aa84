//! Price-comparison API module

mod handler;

pub use handler::{ComputeRequest, ExtractRequest, ExtractResponse};

use axum::{Router, routing::post};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/price-comparison", comparison_routes())
}

fn comparison_routes() -> Router<ServerState> {
    Router::new()
        .route("/extract", post(handler::extract))
        .route("/compute", post(handler::compute))
}
