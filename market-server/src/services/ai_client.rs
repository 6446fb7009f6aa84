//! AI collaborator client
//!
//! Wraps the remote generative text/vision endpoint behind two narrow
//! traits so the rest of the pipeline never depends on model behavior:
//!
//! - [`OrderParser`]: free text + catalog summary -> parsed line items
//! - [`InvoiceExtractor`]: invoice document -> draft comparison lines
//!
//! The endpoint is unreliable by contract. Responses are decoded leniently
//! (missing fields default, unusable lines are dropped with a log) and any
//! transport or decode failure surfaces as an upstream error the caller
//! degrades to an empty result. A deliberate request timeout keeps a slow
//! call from blocking the intake flow indefinitely.

use crate::core::Config;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use shared::AppResult;
use shared::error::AppError;
use shared::models::{InvoiceLineDraft, ParsedLine, Unit};
use std::time::Duration;

/// Parses a free-text order into line items
#[async_trait]
pub trait OrderParser: Send + Sync {
    async fn parse(&self, free_text: &str, catalog_summary: &str) -> AppResult<Vec<ParsedLine>>;
}

/// Extracts line items from a competitor invoice document
#[async_trait]
pub trait InvoiceExtractor: Send + Sync {
    async fn extract(&self, document: &str) -> AppResult<Vec<InvoiceLineDraft>>;
}

// =============================================================================
// Wire payloads
// =============================================================================

#[derive(Debug, Serialize)]
struct ParseOrderRequest<'a> {
    text: &'a str,
    catalog: &'a str,
}

/// Raw parse payload; every field defaults so a partially-garbled response
/// still yields its usable lines
#[derive(Debug, Default, Deserialize)]
struct RawParsePayload {
    #[serde(default)]
    lines: Vec<RawParsedLine>,
}

#[derive(Debug, Default, Deserialize)]
struct RawParsedLine {
    #[serde(default)]
    product_name: String,
    #[serde(default)]
    quantity: f64,
    #[serde(default)]
    unit: String,
    #[serde(default)]
    is_ambiguous: bool,
    #[serde(default)]
    suggested_product_ids: Vec<String>,
    #[serde(default)]
    selected_product_id: Option<String>,
}

#[derive(Debug, Serialize)]
struct ExtractInvoiceRequest<'a> {
    document: &'a str,
}

#[derive(Debug, Default, Deserialize)]
struct RawExtractPayload {
    #[serde(default)]
    lines: Vec<RawInvoiceLine>,
}

#[derive(Debug, Default, Deserialize)]
struct RawInvoiceLine {
    #[serde(default)]
    name: String,
    #[serde(default)]
    quantity: f64,
    #[serde(default)]
    reference_price: f64,
}

// =============================================================================
// Decoding (deterministic, independently testable)
// =============================================================================

/// Decode a parse-order response body, keeping only usable lines.
///
/// A line is dropped when its name is empty, its quantity is not a positive
/// finite number, or its unit is not one the catalog sells in.
pub fn decode_parse_payload(body: &str) -> AppResult<Vec<ParsedLine>> {
    let payload: RawParsePayload = serde_json::from_str(body)
        .map_err(|e| AppError::upstream_parse(format!("malformed parse response: {e}")))?;

    let mut lines = Vec::with_capacity(payload.lines.len());
    for raw in payload.lines {
        if raw.product_name.trim().is_empty() {
            tracing::debug!("dropping parsed line with empty product name");
            continue;
        }
        if !raw.quantity.is_finite() || raw.quantity <= 0.0 {
            tracing::debug!(
                product = %raw.product_name,
                quantity = raw.quantity,
                "dropping parsed line with unusable quantity"
            );
            continue;
        }
        let Some(unit) = Unit::parse_loose(&raw.unit) else {
            tracing::warn!(product = %raw.product_name, unit = %raw.unit, "dropping parsed line with unknown unit");
            continue;
        };
        lines.push(ParsedLine {
            product_name: raw.product_name,
            quantity: raw.quantity,
            unit,
            is_ambiguous: raw.is_ambiguous,
            suggested_product_ids: raw.suggested_product_ids,
            selected_product_id: raw.selected_product_id,
        });
    }
    Ok(lines)
}

/// Decode an invoice-extraction response body, keeping only usable lines
pub fn decode_extract_payload(body: &str) -> AppResult<Vec<InvoiceLineDraft>> {
    let payload: RawExtractPayload = serde_json::from_str(body)
        .map_err(|e| AppError::upstream_extract(format!("malformed extract response: {e}")))?;

    Ok(payload
        .lines
        .into_iter()
        .filter(|raw| {
            let usable = !raw.name.trim().is_empty()
                && raw.quantity.is_finite()
                && raw.quantity > 0.0
                && raw.reference_price.is_finite()
                && raw.reference_price >= 0.0;
            if !usable {
                tracing::debug!(name = %raw.name, "dropping unusable invoice line");
            }
            usable
        })
        .map(|raw| InvoiceLineDraft {
            name: raw.name,
            quantity: raw.quantity,
            reference_price: raw.reference_price,
        })
        .collect())
}

// =============================================================================
// AiClient
// =============================================================================

/// HTTP client for the generative endpoint
pub struct AiClient {
    http: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl std::fmt::Debug for AiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AiClient")
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl AiClient {
    pub fn from_config(config: &Config) -> AppResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.ai_timeout_ms))
            .build()
            .map_err(|e| AppError::internal(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            http,
            base_url: config.ai_base_url.trim_end_matches('/').to_string(),
            api_key: config.ai_api_key.clone(),
        })
    }

    async fn post_json<B: Serialize>(&self, path: &str, body: &B) -> Result<String, reqwest::Error> {
        let mut request = self.http.post(format!("{}{}", self.base_url, path)).json(body);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }
        request.send().await?.error_for_status()?.text().await
    }
}

#[async_trait]
impl OrderParser for AiClient {
    async fn parse(&self, free_text: &str, catalog_summary: &str) -> AppResult<Vec<ParsedLine>> {
        let body = ParseOrderRequest {
            text: free_text,
            catalog: catalog_summary,
        };
        let response = self
            .post_json("/v1/parse-order", &body)
            .await
            .map_err(|e| AppError::upstream_parse(format!("parse call failed: {e}")))?;
        decode_parse_payload(&response)
    }
}

#[async_trait]
impl InvoiceExtractor for AiClient {
    async fn extract(&self, document: &str) -> AppResult<Vec<InvoiceLineDraft>> {
        let body = ExtractInvoiceRequest { document };
        let response = self
            .post_json("/v1/extract-invoice", &body)
            .await
            .map_err(|e| AppError::upstream_extract(format!("extract call failed: {e}")))?;
        decode_extract_payload(&response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::ErrorCode;

    #[test]
    fn test_decode_parse_payload_happy_path() {
        let body = r#"{"lines":[
            {"product_name":"bananas","quantity":100.0,"unit":"kg","is_ambiguous":true,
             "suggested_product_ids":["prod-a","prod-b"]},
            {"product_name":"tomatoes","quantity":5.0,"unit":"kg"}
        ]}"#;
        let lines = decode_parse_payload(body).unwrap();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].unit, Unit::Kg);
        assert!(lines[0].is_ambiguous);
        assert_eq!(lines[0].suggested_product_ids.len(), 2);
        assert!(!lines[1].is_ambiguous);
    }

    #[test]
    fn test_decode_parse_payload_drops_unusable_lines() {
        let body = r#"{"lines":[
            {"product_name":"","quantity":3.0,"unit":"kg"},
            {"product_name":"kiwis","quantity":0.0,"unit":"kg"},
            {"product_name":"melons","quantity":2.0,"unit":"pallet"},
            {"product_name":"pears","quantity":4.0,"unit":"trays"}
        ]}"#;
        let lines = decode_parse_payload(body).unwrap();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].product_name, "pears");
        assert_eq!(lines[0].unit, Unit::Tray);
    }

    #[test]
    fn test_decode_parse_payload_garbled_is_upstream_error() {
        let err = decode_parse_payload("not json at all").unwrap_err();
        assert_eq!(err.code, ErrorCode::UpstreamParse);

        // An empty but well-formed payload is "nothing parsed", not an error
        let lines = decode_parse_payload(r#"{"lines":[]}"#).unwrap();
        assert!(lines.is_empty());
        let lines = decode_parse_payload("{}").unwrap();
        assert!(lines.is_empty());
    }

    #[test]
    fn test_decode_extract_payload() {
        let body = r#"{"lines":[
            {"name":"Bananas","quantity":100.0,"reference_price":1.5},
            {"name":"","quantity":1.0,"reference_price":2.0},
            {"name":"Tomatoes","quantity":-3.0,"reference_price":2.0}
        ]}"#;
        let lines = decode_extract_payload(body).unwrap();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].name, "Bananas");

        let err = decode_extract_payload("<html>").unwrap_err();
        assert_eq!(err.code, ErrorCode::UpstreamExtract);
    }
}
