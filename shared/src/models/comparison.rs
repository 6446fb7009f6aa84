//! Price-comparison models
//!
//! Back-office staff compare competitor invoice prices against two derived
//! targets. Target prices are always recomputed from the current percentage
//! parameters; they are never cached against a specific invoice price.

use serde::{Deserialize, Serialize};

/// One line of a competitor invoice, as extracted by the AI collaborator
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InvoiceLineDraft {
    pub name: String,
    pub quantity: f64,
    /// Competitor price per unit
    pub reference_price: f64,
}

/// One line of a price comparison
///
/// Carries only the reference data; `customer_target_price` and
/// `wholesale_target_price` are derived by the pricing engine per request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PriceComparisonLine {
    /// Catalog product, when the line has been matched to one
    #[serde(default)]
    pub product_id: Option<String>,
    pub product_name: String,
    pub quantity: f64,
    /// Reference/competitor price per unit
    pub invoice_price: f64,
}

impl From<InvoiceLineDraft> for PriceComparisonLine {
    fn from(draft: InvoiceLineDraft) -> Self {
        Self {
            product_id: None,
            product_name: draft.name,
            quantity: draft.quantity,
            invoice_price: draft.reference_price,
        }
    }
}
