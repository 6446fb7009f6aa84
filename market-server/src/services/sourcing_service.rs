//! Sourcing Service - back-office requests to wholesalers

use chrono::Utc;
use dashmap::DashMap;
use shared::AppResult;
use shared::error::AppError;
use shared::models::{SourcingRequest, SourcingRequestCreate, SourcingStatus};

#[derive(Default)]
pub struct SourcingService {
    requests: DashMap<String, SourcingRequest>,
}

impl std::fmt::Debug for SourcingService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SourcingService")
            .field("requests", &self.requests.len())
            .finish()
    }
}

impl SourcingService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new open sourcing request
    pub fn create(&self, payload: SourcingRequestCreate) -> AppResult<SourcingRequest> {
        if payload.product_name.trim().is_empty() {
            return Err(AppError::validation("product_name must not be empty"));
        }
        if !payload.quantity.is_finite() || payload.quantity <= 0.0 {
            return Err(AppError::validation(format!(
                "quantity must be positive, got {}",
                payload.quantity
            )));
        }
        if let Some(p) = payload.target_price
            && (!p.is_finite() || p < 0.0)
        {
            return Err(AppError::validation(format!(
                "target_price must be non-negative, got {p}"
            )));
        }

        let request = SourcingRequest {
            id: format!("src-{}", uuid::Uuid::new_v4()),
            product_name: payload.product_name,
            quantity: payload.quantity,
            unit: payload.unit,
            target_price: payload.target_price,
            note: payload.note,
            status: SourcingStatus::Open,
            created_at: Utc::now(),
        };
        self.requests.insert(request.id.clone(), request.clone());
        Ok(request)
    }

    /// Snapshot of all requests, newest first
    pub fn list(&self) -> Vec<SourcingRequest> {
        let mut requests: Vec<SourcingRequest> =
            self.requests.iter().map(|r| r.value().clone()).collect();
        requests.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        requests
    }

    /// Dispatch an open request to wholesalers
    pub fn dispatch(&self, id: &str) -> AppResult<SourcingRequest> {
        let mut entry = self
            .requests
            .get_mut(id)
            .ok_or_else(|| AppError::not_found(format!("sourcing request {id}")))?;

        if entry.status == SourcingStatus::Dispatched {
            return Err(AppError::invalid_request(format!(
                "sourcing request {id} already dispatched"
            )));
        }
        entry.status = SourcingStatus::Dispatched;
        tracing::info!(request_id = %id, product = %entry.product_name, "sourcing request dispatched");
        Ok(entry.clone())
    }
}
