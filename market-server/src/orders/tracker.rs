//! Active-order tracking
//!
//! Selects which order the buyer's tracking view should follow and derives
//! the verification countdown for it. Everything here is pure over an order
//! snapshot; the caller supplies `now`, so the countdown is independently
//! testable and can be driven by any scheduling primitive.

use super::lifecycle::{format_countdown, verification_remaining};
use chrono::{DateTime, Utc};
use serde::Serialize;
use shared::models::{Order, OrderStatus};

/// Delivered but not yet fully verified
pub fn is_awaiting_verification(order: &Order) -> bool {
    order.status == OrderStatus::Delivered && !order.is_fully_verified
}

/// Pick the order the tracking view should follow.
///
/// Preference: the most recent delivered-but-unverified order; otherwise the
/// most recent order still moving through the lifecycle. Delivered and fully
/// verified orders are settled and never tracked.
pub fn select_active_order(orders: &[Order]) -> Option<&Order> {
    if let Some(order) = orders
        .iter()
        .filter(|o| is_awaiting_verification(o))
        .max_by_key(|o| o.created_at)
    {
        return Some(order);
    }

    orders
        .iter()
        .filter(|o| !(o.status == OrderStatus::Delivered && o.is_fully_verified))
        .max_by_key(|o| o.created_at)
}

/// Verification countdown state for display
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct VerificationCountdown {
    pub remaining_seconds: i64,
    /// `MM:SS`, floor-truncated, clamped at `00:00`
    pub display: String,
    pub expired: bool,
}

/// Active order plus its countdown, as served to the tracking view
#[derive(Debug, Clone, Serialize)]
pub struct ActiveOrderView {
    pub order: Order,
    /// Present once the order is delivered and not yet verified
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verification: Option<VerificationCountdown>,
}

/// Build the tracking view for a buyer's order snapshot
pub fn active_order_view(orders: &[Order], now: DateTime<Utc>) -> Option<ActiveOrderView> {
    let order = select_active_order(orders)?;

    let verification = match (is_awaiting_verification(order), order.delivered_at) {
        (true, Some(delivered_at)) => {
            let remaining = verification_remaining(delivered_at, now);
            Some(VerificationCountdown {
                remaining_seconds: remaining.num_seconds(),
                display: format_countdown(remaining),
                expired: remaining.is_zero(),
            })
        }
        _ => None,
    };

    Some(ActiveOrderView {
        order: order.clone(),
        verification,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use shared::models::PaymentMethod;

    fn order(id: &str, status: OrderStatus, age_minutes: i64, verified: bool) -> Order {
        let created_at = Utc::now() - Duration::minutes(age_minutes);
        Order {
            id: id.to_string(),
            buyer_id: "buyer-1".to_string(),
            lines: Vec::new(),
            subtotal: 0.0,
            discount: 0.0,
            total: 0.0,
            payment_method: PaymentMethod::Invoice,
            status,
            created_at,
            confirmed_at: Some(created_at),
            prepared_at: None,
            shipped_at: None,
            delivered_at: (status == OrderStatus::Delivered).then(Utc::now),
            is_fully_verified: verified,
            delivery_date: "2026-08-06".to_string(),
            delivery_time: "08:00".to_string(),
            contact_name: "Ana".to_string(),
        }
    }

    #[test]
    fn test_prefers_delivered_unverified_over_newer_active() {
        let orders = vec![
            order("ord-old", OrderStatus::Delivered, 60, false),
            order("ord-new", OrderStatus::Shipped, 5, false),
        ];
        assert_eq!(select_active_order(&orders).unwrap().id, "ord-old");
    }

    #[test]
    fn test_falls_back_to_most_recent_moving_order() {
        let orders = vec![
            order("ord-done", OrderStatus::Delivered, 200, true),
            order("ord-a", OrderStatus::Pending, 30, false),
            order("ord-b", OrderStatus::Confirmed, 10, false),
        ];
        assert_eq!(select_active_order(&orders).unwrap().id, "ord-b");
    }

    #[test]
    fn test_fully_verified_orders_are_never_tracked() {
        let orders = vec![order("ord-done", OrderStatus::Delivered, 10, true)];
        assert!(select_active_order(&orders).is_none());
    }

    #[test]
    fn test_view_carries_countdown_only_when_awaiting_verification() {
        let now = Utc::now();

        let delivered = vec![order("ord-d", OrderStatus::Delivered, 10, false)];
        let view = active_order_view(&delivered, now).unwrap();
        let countdown = view.verification.unwrap();
        assert!(!countdown.expired);
        assert!(countdown.remaining_seconds > 0);

        let shipped = vec![order("ord-s", OrderStatus::Shipped, 10, false)];
        let view = active_order_view(&shipped, now).unwrap();
        assert!(view.verification.is_none());
    }

    #[test]
    fn test_expired_countdown_clamps_to_zero() {
        let mut o = order("ord-d", OrderStatus::Delivered, 300, false);
        o.delivered_at = Some(Utc::now() - Duration::minutes(91));
        let view = active_order_view(&[o], Utc::now()).unwrap();
        let countdown = view.verification.unwrap();
        assert!(countdown.expired);
        assert_eq!(countdown.remaining_seconds, 0);
        assert_eq!(countdown.display, "00:00");
    }
}
