//! Cart Normalizer
//!
//! Pure cart arithmetic: merging confirmed lines and re-order lines into a
//! canonical cart keyed by (product, unit). Never touches the catalog or
//! the pricing engine.

use serde::{Deserialize, Serialize};
use shared::models::{CartLine, Order, Unit};

/// Quantity override applied to a historical order line before re-ordering.
/// A non-positive quantity removes the line.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReorderAdjustment {
    pub product_id: String,
    pub unit: Unit,
    pub quantity: f64,
}

/// Merge newly confirmed lines into an existing cart.
///
/// Lines sharing (product_id, unit) have their quantities summed; new keys
/// are appended in arrival order. Non-positive quantities never survive.
pub fn merge_lines(cart: &[CartLine], incoming: &[CartLine]) -> Vec<CartLine> {
    let mut merged: Vec<CartLine> = cart.iter().filter(|l| l.quantity > 0.0).cloned().collect();

    for line in incoming {
        match merged
            .iter_mut()
            .find(|l| l.product_id == line.product_id && l.unit == line.unit)
        {
            Some(existing) => existing.quantity += line.quantity,
            None => merged.push(line.clone()),
        }
    }

    merged.retain(|l| l.quantity > 0.0);
    merged
}

/// Set the quantity of one cart line; zero or below removes it
pub fn set_line_quantity(
    cart: &[CartLine],
    product_id: &str,
    unit: Unit,
    quantity: f64,
) -> Vec<CartLine> {
    cart.iter()
        .filter_map(|line| {
            if line.product_id == product_id && line.unit == unit {
                if quantity > 0.0 {
                    let mut updated = line.clone();
                    updated.quantity = quantity;
                    Some(updated)
                } else {
                    None
                }
            } else {
                Some(line.clone())
            }
        })
        .collect()
}

/// Remove one cart line entirely
pub fn remove_line(cart: &[CartLine], product_id: &str, unit: Unit) -> Vec<CartLine> {
    set_line_quantity(cart, product_id, unit, 0.0)
}

/// Build a cart from a historical order, applying per-line adjustments
pub fn reorder_lines(order: &Order, adjustments: &[ReorderAdjustment]) -> Vec<CartLine> {
    let mut lines: Vec<CartLine> = order.lines.clone();
    for adj in adjustments {
        lines = set_line_quantity(&lines, &adj.product_id, adj.unit, adj.quantity);
    }
    merge_lines(&[], &lines)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(product_id: &str, quantity: f64, unit: Unit, price: f64) -> CartLine {
        CartLine {
            product_id: product_id.to_string(),
            name: product_id.to_string(),
            quantity,
            unit,
            unit_price: price,
        }
    }

    #[test]
    fn test_merge_sums_matching_key() {
        let cart = vec![line("prod-a", 5.0, Unit::Kg, 1.2)];
        let merged = merge_lines(&cart, &[line("prod-a", 3.0, Unit::Kg, 1.2)]);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].quantity, 8.0);
    }

    #[test]
    fn test_merge_keeps_units_distinct() {
        let cart = vec![line("prod-a", 5.0, Unit::Kg, 1.2)];
        let merged = merge_lines(&cart, &[line("prod-a", 2.0, Unit::Bag, 6.8)]);
        assert_eq!(merged.len(), 2);
    }

    #[test]
    fn test_merge_empty_set_is_identity() {
        let cart = vec![
            line("prod-a", 5.0, Unit::Kg, 1.2),
            line("prod-b", 1.0, Unit::Each, 0.75),
        ];
        assert_eq!(merge_lines(&cart, &[]), cart);
    }

    #[test]
    fn test_merge_filters_non_positive_quantities() {
        let cart = vec![line("prod-a", 5.0, Unit::Kg, 1.2)];
        let merged = merge_lines(&cart, &[line("prod-a", -5.0, Unit::Kg, 1.2)]);
        assert!(merged.is_empty());
    }

    #[test]
    fn test_set_quantity_to_zero_removes_line() {
        let cart = vec![
            line("prod-a", 5.0, Unit::Kg, 1.2),
            line("prod-b", 2.0, Unit::Kg, 3.0),
        ];
        let updated = set_line_quantity(&cart, "prod-a", Unit::Kg, 0.0);
        assert_eq!(updated.len(), 1);
        assert_eq!(updated[0].product_id, "prod-b");

        let updated = set_line_quantity(&cart, "prod-b", Unit::Kg, 7.5);
        assert_eq!(updated[1].quantity, 7.5);

        let updated = remove_line(&cart, "prod-a", Unit::Kg);
        assert_eq!(updated.len(), 1);
    }

    #[test]
    fn test_reorder_applies_adjustments() {
        let order = Order {
            id: "ord-1".to_string(),
            buyer_id: "buyer-1".to_string(),
            lines: vec![
                line("prod-a", 100.0, Unit::Kg, 1.2),
                line("prod-b", 5.0, Unit::Kg, 3.0),
            ],
            subtotal: 135.0,
            discount: 0.0,
            total: 135.0,
            payment_method: shared::models::PaymentMethod::Invoice,
            status: shared::models::OrderStatus::Delivered,
            created_at: chrono::Utc::now(),
            confirmed_at: None,
            prepared_at: None,
            shipped_at: None,
            delivered_at: None,
            is_fully_verified: false,
            delivery_date: "2026-08-06".to_string(),
            delivery_time: "08:00".to_string(),
            contact_name: "Ana".to_string(),
        };

        let cart = reorder_lines(
            &order,
            &[
                ReorderAdjustment {
                    product_id: "prod-a".to_string(),
                    unit: Unit::Kg,
                    quantity: 50.0,
                },
                ReorderAdjustment {
                    product_id: "prod-b".to_string(),
                    unit: Unit::Kg,
                    quantity: 0.0,
                },
            ],
        );
        assert_eq!(cart.len(), 1);
        assert_eq!(cart[0].product_id, "prod-a");
        assert_eq!(cart[0].quantity, 50.0);
    }
}
