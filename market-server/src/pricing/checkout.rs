//! Checkout totals using rust_decimal for precision
//!
//! All arithmetic is done in `Decimal`, then converted back to `f64` for
//! storage. Stored amounts keep full precision; 2-decimal rounding happens
//! only at display.

use rust_decimal::prelude::*;
use serde::{Deserialize, Serialize};
use shared::AppResult;
use shared::error::AppError;
use shared::models::{CartLine, PaymentMethod};

/// Discount applied when the buyer pays immediately (10%)
pub const PAY_NOW_DISCOUNT_RATE: Decimal = Decimal::from_parts(10, 0, 0, false, 2);

/// Maximum allowed unit price per line
const MAX_UNIT_PRICE: f64 = 1_000_000.0;
/// Maximum allowed quantity per line
const MAX_QUANTITY: f64 = 1_000_000.0;

/// Computed cart totals, full precision
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct CartTotals {
    pub subtotal: f64,
    pub discount: f64,
    pub total: f64,
}

/// Validate that a f64 value is finite (not NaN, not Infinity)
#[inline]
fn require_finite(value: f64, field_name: &str) -> AppResult<()> {
    if !value.is_finite() {
        return Err(AppError::validation(format!(
            "{field_name} must be a finite number, got {value}"
        )));
    }
    Ok(())
}

/// Validate a cart line before totalling
pub fn validate_cart_line(line: &CartLine) -> AppResult<()> {
    require_finite(line.unit_price, "unit_price")?;
    if line.unit_price < 0.0 {
        return Err(AppError::validation(format!(
            "unit_price must be non-negative, got {}",
            line.unit_price
        )));
    }
    if line.unit_price > MAX_UNIT_PRICE {
        return Err(AppError::validation(format!(
            "unit_price exceeds maximum allowed ({MAX_UNIT_PRICE}), got {}",
            line.unit_price
        )));
    }

    require_finite(line.quantity, "quantity")?;
    if line.quantity <= 0.0 {
        return Err(AppError::validation(format!(
            "quantity must be positive, got {}",
            line.quantity
        )));
    }
    if line.quantity > MAX_QUANTITY {
        return Err(AppError::validation(format!(
            "quantity exceeds maximum allowed ({MAX_QUANTITY}), got {}",
            line.quantity
        )));
    }
    Ok(())
}

fn to_decimal(value: f64, field_name: &str) -> AppResult<Decimal> {
    Decimal::from_f64(value)
        .ok_or_else(|| AppError::validation(format!("{field_name} is not representable: {value}")))
}

/// Compute subtotal, payment-method discount, and total for a cart.
///
/// `subtotal = sum(quantity * unit_price)`; the pay-now discount is 10% of the
/// subtotal, zero otherwise; `total = subtotal - discount`. All results are
/// non-negative.
pub fn cart_totals(lines: &[CartLine], method: PaymentMethod) -> AppResult<CartTotals> {
    let mut subtotal = Decimal::ZERO;
    for line in lines {
        validate_cart_line(line)?;
        let quantity = to_decimal(line.quantity, "quantity")?;
        let unit_price = to_decimal(line.unit_price, "unit_price")?;
        subtotal += quantity * unit_price;
    }

    let discount = match method {
        PaymentMethod::PayNow => subtotal * PAY_NOW_DISCOUNT_RATE,
        PaymentMethod::Invoice => Decimal::ZERO,
    };
    let total = subtotal - discount;

    Ok(CartTotals {
        subtotal: subtotal.to_f64().unwrap_or_default(),
        discount: discount.to_f64().unwrap_or_default(),
        total: total.to_f64().unwrap_or_default(),
    })
}
