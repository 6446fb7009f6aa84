//! Quick-order API handlers

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};

use crate::checkout::CheckoutRequest;
use crate::core::ServerState;
use crate::intake::{ReviewLine, ReviewList};
use crate::utils::{AppError, AppResult};
use shared::models::Order;

#[derive(Debug, Deserialize)]
pub struct ParseRequest {
    pub text: String,
}

/// Reviewable result of a parse call
///
/// When the upstream AI call fails the response degrades to an empty line
/// list with the error code attached; the failure never propagates as a
/// fatal error to the caller.
#[derive(Debug, Serialize)]
pub struct ParseResponse {
    pub lines: Vec<ReviewLine>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub degraded: Option<String>,
}

/// POST /api/quick-order/parse - free text to reviewable line list
pub async fn parse(
    State(state): State<ServerState>,
    Json(request): Json<ParseRequest>,
) -> AppResult<Json<ParseResponse>> {
    if request.text.trim().is_empty() {
        return Err(AppError::validation("text must not be empty"));
    }

    let summary = state.catalog.summary_for_parser();
    let response = match state.parser.parse(&request.text, &summary).await {
        Ok(parsed) => {
            let review = ReviewList::build(parsed, &state.catalog.snapshot());
            ParseResponse {
                lines: review.lines,
                degraded: None,
            }
        }
        Err(err) => {
            tracing::warn!(code = %err.code, error = %err, "quick-order parse degraded");
            ParseResponse {
                lines: Vec::new(),
                degraded: Some(err.code.code().to_string()),
            }
        }
    };
    Ok(Json(response))
}

#[derive(Debug, Deserialize)]
pub struct ConfirmRequest {
    #[serde(flatten)]
    pub checkout: CheckoutRequest,
    pub lines: Vec<ReviewLine>,
}

/// POST /api/quick-order/confirm - reviewed lines to a placed order
///
/// Lines are revalidated against the current catalog snapshot; client-sent
/// statuses are not trusted.
pub async fn confirm(
    State(state): State<ServerState>,
    Json(request): Json<ConfirmRequest>,
) -> AppResult<Json<Order>> {
    let parsed = request
        .lines
        .into_iter()
        .map(ReviewLine::into_parsed)
        .collect();
    let review = ReviewList::build(parsed, &state.catalog.snapshot());
    let order = state.checkout.confirm_review(&request.checkout, &review)?;
    Ok(Json(order))
}
