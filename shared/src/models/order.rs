//! Order and cart models

use super::product::Unit;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Payment method chosen at checkout
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    /// Immediate payment; earns the pay-now discount
    PayNow,
    /// Deferred payment against the buyer's invoice account
    #[default]
    Invoice,
}

/// Order lifecycle status
///
/// States advance strictly forward; the derived ordering is the lifecycle
/// ordering.
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Default,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    #[default]
    Pending,
    Confirmed,
    ReadyForDelivery,
    Shipped,
    Delivered,
}

impl OrderStatus {
    /// All states in lifecycle order
    pub const ALL: [OrderStatus; 5] = [
        OrderStatus::Pending,
        OrderStatus::Confirmed,
        OrderStatus::ReadyForDelivery,
        OrderStatus::Shipped,
        OrderStatus::Delivered,
    ];
}

/// A single cart line
///
/// Invariant: `quantity > 0`, and a cart holds at most one line per
/// `(product_id, unit)` pair; merging sums quantities instead of
/// duplicating lines.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartLine {
    pub product_id: String,
    /// Product name snapshot at the time the line was added
    pub name: String,
    pub quantity: f64,
    pub unit: Unit,
    /// Price per unit, always taken from the catalog
    pub unit_price: f64,
}

/// Order entity
///
/// Created at checkout confirmation. Status and timestamps are mutated only
/// forward in time by the lifecycle tracker; orders are never deleted, only
/// superseded by newer ones.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub id: String,
    pub buyer_id: String,
    pub lines: Vec<CartLine>,
    /// Full-precision amounts; rounding happens at display only
    pub subtotal: f64,
    pub discount: f64,
    pub total: f64,
    pub payment_method: PaymentMethod,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
    pub confirmed_at: Option<DateTime<Utc>>,
    pub prepared_at: Option<DateTime<Utc>>,
    pub shipped_at: Option<DateTime<Utc>>,
    pub delivered_at: Option<DateTime<Utc>>,
    /// Set by the explicit post-delivery verification act, never by the
    /// countdown expiring
    pub is_fully_verified: bool,
    pub delivery_date: String,
    pub delivery_time: String,
    pub contact_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_ordering_is_lifecycle_order() {
        assert!(OrderStatus::Pending < OrderStatus::Confirmed);
        assert!(OrderStatus::Confirmed < OrderStatus::ReadyForDelivery);
        assert!(OrderStatus::ReadyForDelivery < OrderStatus::Shipped);
        assert!(OrderStatus::Shipped < OrderStatus::Delivered);
    }

    #[test]
    fn test_payment_method_wire_format() {
        assert_eq!(
            serde_json::to_string(&PaymentMethod::PayNow).unwrap(),
            "\"pay_now\""
        );
        assert_eq!(
            serde_json::to_string(&PaymentMethod::Invoice).unwrap(),
            "\"invoice\""
        );
    }
}
