//! Wholesaler sourcing request models

use super::product::Unit;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Sourcing request status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SourcingStatus {
    #[default]
    Open,
    Dispatched,
}

/// A request to source produce from wholesalers
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourcingRequest {
    pub id: String,
    pub product_name: String,
    pub quantity: f64,
    pub unit: Unit,
    /// Target purchase price per unit, when the back office has one
    pub target_price: Option<f64>,
    pub note: Option<String>,
    pub status: SourcingStatus,
    pub created_at: DateTime<Utc>,
}

/// Create sourcing request payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourcingRequestCreate {
    pub product_name: String,
    pub quantity: f64,
    pub unit: Unit,
    pub target_price: Option<f64>,
    pub note: Option<String>,
}
