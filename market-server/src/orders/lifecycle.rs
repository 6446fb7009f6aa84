//! Order lifecycle state machine
//!
//! States advance strictly forward: PENDING → CONFIRMED →
//! READY_FOR_DELIVERY → SHIPPED → DELIVERED. Advancing to a state at or
//! before the current one is an idempotent no-op; there is no regression.
//! Missing earlier timestamps are backfilled atomically with the current
//! transition and logged as a data-consistency anomaly, never raised.

use chrono::{DateTime, Duration, Utc};
use shared::AppResult;
use shared::error::{AppError, ErrorCode};
use shared::models::{Order, OrderStatus};

/// Length of the post-delivery verification window
pub const VERIFICATION_WINDOW_MINUTES: i64 = 90;

/// Advance an order to `target`, setting the timestamps for every state
/// reached along the way.
///
/// Returns `false` when the order is already at or past `target`.
pub fn advance(order: &mut Order, target: OrderStatus, now: DateTime<Utc>) -> bool {
    if target <= order.status {
        return false;
    }

    let mut backfilled: Vec<OrderStatus> = Vec::new();
    for status in OrderStatus::ALL {
        if status == OrderStatus::Pending || status > target {
            continue;
        }
        let slot = timestamp_slot(order, status);
        if slot.is_none() {
            *slot = Some(now);
            if status < target {
                backfilled.push(status);
            }
        }
    }

    if !backfilled.is_empty() {
        tracing::warn!(
            target: "data_consistency",
            order_id = %order.id,
            reached = ?target,
            missing = ?backfilled,
            "earlier lifecycle timestamps were missing; backfilled with the current transition"
        );
    }

    order.status = target;
    true
}

/// Mark an order fully verified.
///
/// Verification is an explicit act, distinct from the countdown reaching
/// zero, and is only valid once the order has been delivered.
pub fn mark_verified(order: &mut Order) -> AppResult<()> {
    if order.status != OrderStatus::Delivered {
        return Err(AppError::with_message(
            ErrorCode::NotDelivered,
            format!("order {} is {:?}, not DELIVERED", order.id, order.status),
        ));
    }
    order.is_fully_verified = true;
    Ok(())
}

/// Time left in the verification window, clamped at zero
pub fn verification_remaining(delivered_at: DateTime<Utc>, now: DateTime<Utc>) -> Duration {
    let deadline = delivered_at + Duration::minutes(VERIFICATION_WINDOW_MINUTES);
    (deadline - now).max(Duration::zero())
}

/// Format a countdown as `MM:SS`, floor-truncated, clamped at `00:00`
pub fn format_countdown(remaining: Duration) -> String {
    let seconds = remaining.num_seconds().max(0);
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

fn timestamp_slot(order: &mut Order, status: OrderStatus) -> &mut Option<DateTime<Utc>> {
    match status {
        OrderStatus::Confirmed => &mut order.confirmed_at,
        OrderStatus::ReadyForDelivery => &mut order.prepared_at,
        OrderStatus::Shipped => &mut order.shipped_at,
        OrderStatus::Delivered => &mut order.delivered_at,
        // Pending has no transition timestamp; creation time covers it
        OrderStatus::Pending => unreachable!("pending has no timestamp slot"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::PaymentMethod;

    fn order_at(status: OrderStatus) -> Order {
        let now = Utc::now();
        Order {
            id: "ord-1".to_string(),
            buyer_id: "buyer-1".to_string(),
            lines: Vec::new(),
            subtotal: 0.0,
            discount: 0.0,
            total: 0.0,
            payment_method: PaymentMethod::Invoice,
            status,
            created_at: now,
            confirmed_at: Some(now),
            prepared_at: None,
            shipped_at: None,
            delivered_at: None,
            is_fully_verified: false,
            delivery_date: "2026-08-06".to_string(),
            delivery_time: "08:00".to_string(),
            contact_name: "Ana".to_string(),
        }
    }

    #[test]
    fn test_forward_transitions_set_timestamps() {
        let mut order = order_at(OrderStatus::Pending);
        let now = Utc::now();

        assert!(advance(&mut order, OrderStatus::Confirmed, now));
        assert_eq!(order.status, OrderStatus::Confirmed);

        assert!(advance(&mut order, OrderStatus::Shipped, now));
        assert_eq!(order.status, OrderStatus::Shipped);
        assert!(order.prepared_at.is_some());
        assert!(order.shipped_at.is_some());
        assert!(order.delivered_at.is_none());
    }

    #[test]
    fn test_advance_is_idempotent_and_never_regresses() {
        let mut order = order_at(OrderStatus::Shipped);
        order.shipped_at = Some(Utc::now());
        let shipped_at = order.shipped_at;

        assert!(!advance(&mut order, OrderStatus::Shipped, Utc::now()));
        assert!(!advance(&mut order, OrderStatus::Confirmed, Utc::now()));
        assert_eq!(order.status, OrderStatus::Shipped);
        assert_eq!(order.shipped_at, shipped_at);
    }

    #[test]
    fn test_missing_earlier_timestamps_are_backfilled() {
        let mut order = order_at(OrderStatus::Pending);
        order.confirmed_at = None;
        let now = Utc::now();

        assert!(advance(&mut order, OrderStatus::Delivered, now));
        assert_eq!(order.confirmed_at, Some(now));
        assert_eq!(order.prepared_at, Some(now));
        assert_eq!(order.shipped_at, Some(now));
        assert_eq!(order.delivered_at, Some(now));
    }

    #[test]
    fn test_verify_requires_delivered() {
        let mut order = order_at(OrderStatus::Shipped);
        let err = mark_verified(&mut order).unwrap_err();
        assert_eq!(err.code, ErrorCode::NotDelivered);
        assert!(!order.is_fully_verified);

        advance(&mut order, OrderStatus::Delivered, Utc::now());
        mark_verified(&mut order).unwrap();
        assert!(order.is_fully_verified);
    }

    #[test]
    fn test_countdown_window() {
        let delivered = Utc::now();

        let at_89 = verification_remaining(delivered, delivered + Duration::minutes(89));
        assert_eq!(format_countdown(at_89), "01:00");

        let at_91 = verification_remaining(delivered, delivered + Duration::minutes(91));
        assert_eq!(at_91, Duration::zero());
        assert_eq!(format_countdown(at_91), "00:00");

        let much_later = verification_remaining(delivered, delivered + Duration::hours(6));
        assert_eq!(format_countdown(much_later), "00:00");
    }

    #[test]
    fn test_countdown_floor_truncates() {
        let delivered = Utc::now();
        let remaining = verification_remaining(
            delivered,
            delivered + Duration::minutes(89) + Duration::seconds(30) + Duration::milliseconds(400),
        );
        assert_eq!(format_countdown(remaining), "00:29");
    }
}
