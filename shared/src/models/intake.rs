//! Quick-order intake models
//!
//! A [`ParsedLine`] is the raw output of the AI parsing collaborator: a
//! free-text product reference plus quantity and unit. Lines are mutated
//! only by explicit user resolution and discarded once converted into cart
//! lines.

use super::product::Unit;
use serde::{Deserialize, Serialize};

/// One raw line parsed out of a free-text order
///
/// The parser supplies quantity and unit only; prices always come from the
/// catalog at confirmation time.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ParsedLine {
    /// Free-text product reference ("bananas", "roma tomatoes")
    pub product_name: String,
    pub quantity: f64,
    pub unit: Unit,
    /// Whether the parser considered the reference ambiguous
    #[serde(default)]
    pub is_ambiguous: bool,
    /// Candidate product ids, ordered by parser confidence; empty when the
    /// parser saw no ambiguity
    #[serde(default)]
    pub suggested_product_ids: Vec<String>,
    /// Set once the buyer (or auto-resolution) picks a product
    #[serde(default)]
    pub selected_product_id: Option<String>,
}

impl ParsedLine {
    /// Plain unambiguous line, as the parser emits for a clean match
    pub fn unambiguous(product_name: impl Into<String>, quantity: f64, unit: Unit) -> Self {
        Self {
            product_name: product_name.into(),
            quantity,
            unit,
            is_ambiguous: false,
            suggested_product_ids: Vec::new(),
            selected_product_id: None,
        }
    }

    /// Ambiguous line with candidate ids
    pub fn ambiguous(
        product_name: impl Into<String>,
        quantity: f64,
        unit: Unit,
        suggested_product_ids: Vec<String>,
    ) -> Self {
        Self {
            product_name: product_name.into(),
            quantity,
            unit,
            is_ambiguous: true,
            suggested_product_ids,
            selected_product_id: None,
        }
    }
}
