//! Price-comparison API handlers

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};

use crate::core::ServerState;
use crate::pricing;
use crate::utils::{AppError, AppResult};
use shared::models::PriceComparisonLine;

#[derive(Debug, Deserialize)]
pub struct ExtractRequest {
    /// Invoice document, base64 or data-URL as the client captured it
    pub document: String,
}

/// Draft comparison lines from an invoice document
///
/// Degrades to an empty list with the error code attached when the upstream
/// extraction call fails.
#[derive(Debug, Serialize)]
pub struct ExtractResponse {
    pub lines: Vec<PriceComparisonLine>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub degraded: Option<String>,
}

/// POST /api/price-comparison/extract - invoice document to draft lines
pub async fn extract(
    State(state): State<ServerState>,
    Json(request): Json<ExtractRequest>,
) -> AppResult<Json<ExtractResponse>> {
    if request.document.trim().is_empty() {
        return Err(AppError::validation("document must not be empty"));
    }

    let response = match state.extractor.extract(&request.document).await {
        Ok(drafts) => ExtractResponse {
            lines: drafts.into_iter().map(PriceComparisonLine::from).collect(),
            degraded: None,
        },
        Err(err) => {
            tracing::warn!(code = %err.code, error = %err, "invoice extraction degraded");
            ExtractResponse {
                lines: Vec::new(),
                degraded: Some(err.code.code().to_string()),
            }
        }
    };
    Ok(Json(response))
}

#[derive(Debug, Deserialize)]
pub struct ComputeRequest {
    pub lines: Vec<PriceComparisonLine>,
    pub customer_savings_percent: f64,
    pub wholesale_target_percent: f64,
}

/// POST /api/price-comparison/compute - derive targets and totals
///
/// Recomputed from scratch on every call; changing a percentage never
/// reuses previously derived prices.
pub async fn compute(
    State(_state): State<ServerState>,
    Json(request): Json<ComputeRequest>,
) -> AppResult<Json<pricing::ComparisonSummary>> {
    let summary = pricing::comparison_summary(
        &request.lines,
        request.customer_savings_percent,
        request.wholesale_target_percent,
    )?;
    Ok(Json(summary))
}
