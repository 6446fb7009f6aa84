//! In-memory order store
//!
//! Owns every order after checkout confirmation. The lifecycle tracker
//! advances status on the stored instance in place; orders are never forked
//! or deleted. Reads hand out snapshots.

use super::lifecycle;
use chrono::Utc;
use dashmap::DashMap;
use shared::AppResult;
use shared::error::AppError;
use shared::models::{CartLine, Order, OrderStatus, PaymentMethod};
use thiserror::Error;

use crate::pricing::CartTotals;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("order {0} not found")]
    NotFound(String),
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(id) => AppError::with_message(
                shared::ErrorCode::OrderNotFound,
                format!("order {id} not found"),
            ),
        }
    }
}

/// Checkout fields recorded on the order
#[derive(Debug, Clone)]
pub struct OrderDetails {
    pub payment_method: PaymentMethod,
    pub delivery_date: String,
    pub delivery_time: String,
    pub contact_name: String,
}

#[derive(Default)]
pub struct OrderStore {
    orders: DashMap<String, Order>,
}

impl std::fmt::Debug for OrderStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OrderStore")
            .field("orders", &self.orders.len())
            .finish()
    }
}

impl OrderStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new PENDING order from a priced cart
    pub fn create(
        &self,
        buyer_id: &str,
        lines: Vec<CartLine>,
        totals: CartTotals,
        details: OrderDetails,
    ) -> Order {
        let now = Utc::now();
        let order = Order {
            id: format!("ord-{}", uuid::Uuid::new_v4()),
            buyer_id: buyer_id.to_string(),
            lines,
            subtotal: totals.subtotal,
            discount: totals.discount,
            total: totals.total,
            payment_method: details.payment_method,
            status: OrderStatus::Pending,
            created_at: now,
            confirmed_at: Some(now),
            prepared_at: None,
            shipped_at: None,
            delivered_at: None,
            is_fully_verified: false,
            delivery_date: details.delivery_date,
            delivery_time: details.delivery_time,
            contact_name: details.contact_name,
        };
        self.orders.insert(order.id.clone(), order.clone());
        tracing::info!(order_id = %order.id, buyer_id, total = order.total, "order created");
        order
    }

    /// Snapshot of one buyer's orders, oldest first
    pub fn orders_for_buyer(&self, buyer_id: &str) -> Vec<Order> {
        let mut orders: Vec<Order> = self
            .orders
            .iter()
            .filter(|o| o.buyer_id == buyer_id)
            .map(|o| o.value().clone())
            .collect();
        orders.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        orders
    }

    /// Snapshot of a single order
    pub fn find(&self, order_id: &str) -> Option<Order> {
        self.orders.get(order_id).map(|o| o.value().clone())
    }

    /// Advance an order's lifecycle state in place
    pub fn advance(&self, order_id: &str, target: OrderStatus) -> Result<Order, StoreError> {
        let mut entry = self
            .orders
            .get_mut(order_id)
            .ok_or_else(|| StoreError::NotFound(order_id.to_string()))?;
        let advanced = lifecycle::advance(entry.value_mut(), target, Utc::now());
        if advanced {
            tracing::info!(order_id, status = ?entry.status, "order advanced");
        }
        Ok(entry.clone())
    }

    /// Mark an order fully verified (explicit post-delivery act)
    pub fn mark_verified(&self, order_id: &str) -> AppResult<Order> {
        let mut entry = self
            .orders
            .get_mut(order_id)
            .ok_or_else(|| AppError::from(StoreError::NotFound(order_id.to_string())))?;
        lifecycle::mark_verified(entry.value_mut())?;
        tracing::info!(order_id, "order fully verified");
        Ok(entry.clone())
    }
}
