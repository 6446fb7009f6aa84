//! Two-tier comparison pricing
//!
//! Given a competitor invoice price and two percentage parameters, derives
//! the customer target price and the wholesale target price. Targets are
//! recomputed whenever the percentages change; nothing here is cached.

use rust_decimal::prelude::*;
use serde::{Deserialize, Serialize};
use shared::AppResult;
use shared::error::AppError;
use shared::models::PriceComparisonLine;

/// A comparison line with its derived target prices
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PricedComparisonLine {
    #[serde(default)]
    pub product_id: Option<String>,
    pub product_name: String,
    pub quantity: f64,
    pub invoice_price: f64,
    pub customer_target_price: f64,
    pub wholesale_target_price: f64,
    /// `quantity * (invoice_price - customer_target_price)`
    pub line_savings: f64,
}

/// Aggregate comparison totals across all lines
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ComparisonSummary {
    pub lines: Vec<PricedComparisonLine>,
    /// `sum(quantity * invoice_price)`
    pub invoice_total: f64,
    /// `sum(quantity * customer_target_price)`
    pub customer_total: f64,
    /// `invoice_total - customer_total`, identical to the sum of per-line
    /// savings
    pub savings_total: f64,
}

const HUNDRED: Decimal = Decimal::from_parts(100, 0, 0, false, 0);

fn require_amount(value: f64, field_name: &str) -> AppResult<Decimal> {
    if !value.is_finite() || value < 0.0 {
        return Err(AppError::validation(format!(
            "{field_name} must be a non-negative number, got {value}"
        )));
    }
    Decimal::from_f64(value)
        .ok_or_else(|| AppError::validation(format!("{field_name} is not representable: {value}")))
}

fn require_positive(value: f64, field_name: &str) -> AppResult<Decimal> {
    if !value.is_finite() || value <= 0.0 {
        return Err(AppError::validation(format!(
            "{field_name} must be positive, got {value}"
        )));
    }
    Decimal::from_f64(value)
        .ok_or_else(|| AppError::validation(format!("{field_name} is not representable: {value}")))
}

/// `invoice_price * (1 - customer_savings_percent / 100)`
pub fn customer_target_price(invoice_price: f64, customer_savings_percent: f64) -> AppResult<f64> {
    let price = require_amount(invoice_price, "invoice_price")?;
    let percent = require_amount(customer_savings_percent, "customer_savings_percent")?;
    let target = price * (Decimal::ONE - percent / HUNDRED);
    Ok(target.to_f64().unwrap_or_default())
}

/// `invoice_price * (wholesale_target_percent / 100)`
pub fn wholesale_target_price(invoice_price: f64, wholesale_target_percent: f64) -> AppResult<f64> {
    let price = require_amount(invoice_price, "invoice_price")?;
    let percent = require_amount(wholesale_target_percent, "wholesale_target_percent")?;
    let target = price * (percent / HUNDRED);
    Ok(target.to_f64().unwrap_or_default())
}

/// Derive targets for every line and the aggregate totals.
///
/// Computed in `Decimal` throughout, so the aggregate savings equals the sum
/// of per-line savings exactly; any rounding is left to the display layer.
pub fn comparison_summary(
    lines: &[PriceComparisonLine],
    customer_savings_percent: f64,
    wholesale_target_percent: f64,
) -> AppResult<ComparisonSummary> {
    let customer_percent = require_amount(customer_savings_percent, "customer_savings_percent")?;
    let wholesale_percent = require_amount(wholesale_target_percent, "wholesale_target_percent")?;
    let customer_factor = Decimal::ONE - customer_percent / HUNDRED;
    let wholesale_factor = wholesale_percent / HUNDRED;

    let mut priced = Vec::with_capacity(lines.len());
    let mut invoice_total = Decimal::ZERO;
    let mut customer_total = Decimal::ZERO;
    let mut savings_total = Decimal::ZERO;

    for line in lines {
        let price = require_amount(line.invoice_price, "invoice_price")?;
        let quantity = require_positive(line.quantity, "quantity")?;

        let customer_target = price * customer_factor;
        let wholesale_target = price * wholesale_factor;
        let line_savings = quantity * (price - customer_target);

        invoice_total += quantity * price;
        customer_total += quantity * customer_target;
        savings_total += line_savings;

        priced.push(PricedComparisonLine {
            product_id: line.product_id.clone(),
            product_name: line.product_name.clone(),
            quantity: line.quantity,
            invoice_price: line.invoice_price,
            customer_target_price: customer_target.to_f64().unwrap_or_default(),
            wholesale_target_price: wholesale_target.to_f64().unwrap_or_default(),
            line_savings: line_savings.to_f64().unwrap_or_default(),
        });
    }

    Ok(ComparisonSummary {
        lines: priced,
        invoice_total: invoice_total.to_f64().unwrap_or_default(),
        customer_total: customer_total.to_f64().unwrap_or_default(),
        savings_total: savings_total.to_f64().unwrap_or_default(),
    })
}
