//! Ambiguity Resolver
//!
//! Turns raw parsed lines into a reviewable list where each line is either
//! resolved to a single catalog product or pending an explicit pick. The
//! resolver is deterministic: the AI parser's suggestions are candidates,
//! never decisions, so the pipeline stays correct when the model is wrong.

use serde::{Deserialize, Serialize};
use shared::AppResult;
use shared::error::AppError;
use shared::models::{CartLine, CatalogProduct, ParsedLine, Unit};

/// Resolution state of a review line
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LineStatus {
    /// A single catalog product is selected
    Resolved,
    /// Multiple candidates; requires an explicit selection
    Pending,
    /// Ambiguous but with no usable candidates: a data-quality defect the
    /// parser produced, surfaced instead of guessed around
    Unmatchable,
}

/// A parsed line annotated with its resolution state
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReviewLine {
    pub product_name: String,
    pub quantity: f64,
    pub unit: Unit,
    /// Candidate ids shown when the line needs an explicit pick
    pub suggested_product_ids: Vec<String>,
    pub selected_product_id: Option<String>,
    pub status: LineStatus,
}

impl ReviewLine {
    /// Back-convert to the parser's shape, for server-side revalidation of
    /// lines a client sends back. A line counts as ambiguous when it still
    /// carries candidates.
    pub fn into_parsed(self) -> ParsedLine {
        ParsedLine {
            product_name: self.product_name,
            quantity: self.quantity,
            unit: self.unit,
            is_ambiguous: !self.suggested_product_ids.is_empty(),
            suggested_product_ids: self.suggested_product_ids,
            selected_product_id: self.selected_product_id,
        }
    }
}

/// Reviewable list of parsed lines
///
/// Owned exclusively by the requesting session; mutation happens only
/// through [`select`](Self::select) and [`clear`](Self::clear) before
/// confirmation.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ReviewList {
    pub lines: Vec<ReviewLine>,
}

impl ReviewList {
    /// Build a review list from parsed lines against a catalog snapshot
    pub fn build(parsed: Vec<ParsedLine>, catalog: &[CatalogProduct]) -> Self {
        let lines = parsed
            .into_iter()
            .map(|line| annotate(line, catalog))
            .collect();
        Self { lines }
    }

    /// Number of lines still blocking confirmation
    pub fn unresolved_count(&self) -> usize {
        self.lines
            .iter()
            .filter(|l| l.status != LineStatus::Resolved)
            .count()
    }

    /// Set the selected product for a line
    ///
    /// Allowed on any line before confirmation; selecting the already
    /// selected product is a no-op.
    pub fn select(
        &mut self,
        index: usize,
        product_id: &str,
        catalog: &[CatalogProduct],
    ) -> AppResult<()> {
        let line = self
            .lines
            .get_mut(index)
            .ok_or_else(|| AppError::invalid_request(format!("no review line at index {index}")))?;
        if !catalog.iter().any(|p| p.id == product_id) {
            return Err(AppError::not_found(format!("product {product_id}")));
        }
        line.selected_product_id = Some(product_id.to_string());
        line.status = LineStatus::Resolved;
        Ok(())
    }

    /// Clear a line's selection, reverting it to pending
    ///
    /// Applies even to lines that were previously resolved manually or
    /// automatically; a cleared line is never silently re-resolved. Lines
    /// without parser suggestions fall back to deterministic candidates.
    pub fn clear(&mut self, index: usize, catalog: &[CatalogProduct]) -> AppResult<()> {
        let line = self
            .lines
            .get_mut(index)
            .ok_or_else(|| AppError::invalid_request(format!("no review line at index {index}")))?;
        line.selected_product_id = None;
        if line.suggested_product_ids.is_empty() {
            line.suggested_product_ids = name_candidates(&line.product_name, catalog)
                .iter()
                .map(|p| p.id.clone())
                .collect();
        }
        line.status = if line.suggested_product_ids.is_empty() {
            LineStatus::Unmatchable
        } else {
            LineStatus::Pending
        };
        Ok(())
    }

    /// Convert a fully resolved list into cart lines
    ///
    /// Fails without side effects when any line is still pending or
    /// unmatchable. Unit prices come from the catalog; free text supplies
    /// quantity and unit only.
    pub fn confirm(&self, catalog: &[CatalogProduct]) -> AppResult<Vec<CartLine>> {
        let unmatchable: Vec<usize> = self
            .lines
            .iter()
            .enumerate()
            .filter(|(_, l)| l.status == LineStatus::Unmatchable)
            .map(|(i, _)| i)
            .collect();
        if !unmatchable.is_empty() {
            return Err(AppError::with_message(
                shared::ErrorCode::UnmatchableLine,
                "order contains lines that match no catalog product",
            )
            .with_detail("line_indexes", unmatchable));
        }

        let pending: Vec<usize> = self
            .lines
            .iter()
            .enumerate()
            .filter(|(_, l)| l.status != LineStatus::Resolved || l.selected_product_id.is_none())
            .map(|(i, _)| i)
            .collect();
        if !pending.is_empty() {
            return Err(AppError::ambiguity_unresolved(format!(
                "{} line(s) still need a product selection",
                pending.len()
            ))
            .with_detail("line_indexes", pending));
        }

        let mut cart_lines = Vec::with_capacity(self.lines.len());
        for line in &self.lines {
            // the pending check above guarantees a selection
            let Some(selected) = line.selected_product_id.as_deref() else {
                continue;
            };
            let product = catalog
                .iter()
                .find(|p| p.id == selected)
                .ok_or_else(|| AppError::not_found(format!("product {selected}")))?;
            cart_lines.push(CartLine {
                product_id: product.id.clone(),
                name: product.display_name(),
                quantity: line.quantity,
                unit: line.unit,
                unit_price: product.unit_price,
            });
        }
        Ok(cart_lines)
    }
}

/// Apply the resolution rules to one parsed line
fn annotate(line: ParsedLine, catalog: &[CatalogProduct]) -> ReviewLine {
    // An explicit selection that exists in the catalog wins outright
    if let Some(selected) = line.selected_product_id.as_deref()
        && catalog.iter().any(|p| p.id == selected)
    {
        return ReviewLine {
            product_name: line.product_name,
            quantity: line.quantity,
            unit: line.unit,
            suggested_product_ids: line.suggested_product_ids,
            selected_product_id: line.selected_product_id,
            status: LineStatus::Resolved,
        };
    }

    let candidates = name_candidates(&line.product_name, catalog);

    if !line.is_ambiguous && candidates.len() == 1 {
        let resolved_id = candidates[0].id.clone();
        if !line.suggested_product_ids.is_empty()
            && !line.suggested_product_ids.contains(&resolved_id)
        {
            // Deterministic fallback diverged from the model; resolve by the
            // fallback and leave a trail for monitoring
            tracing::warn!(
                product_name = %line.product_name,
                resolved = %resolved_id,
                suggested = ?line.suggested_product_ids,
                "auto-resolution diverged from parser suggestions"
            );
        }
        return ReviewLine {
            product_name: line.product_name,
            quantity: line.quantity,
            unit: line.unit,
            suggested_product_ids: line.suggested_product_ids,
            selected_product_id: Some(resolved_id),
            status: LineStatus::Resolved,
        };
    }

    // Pending path: the parser's suggestions are kept when they exist in the
    // catalog; otherwise fall back to deterministic candidates
    let mut suggestions: Vec<String> = line
        .suggested_product_ids
        .iter()
        .filter(|id| catalog.iter().any(|p| &p.id == *id))
        .cloned()
        .collect();
    if suggestions.len() < line.suggested_product_ids.len() {
        tracing::warn!(
            product_name = %line.product_name,
            "parser suggested product ids missing from catalog"
        );
    }
    if suggestions.is_empty() {
        suggestions = candidates.iter().map(|p| p.id.clone()).collect();
    }

    if suggestions.is_empty() {
        tracing::warn!(
            product_name = %line.product_name,
            "ambiguous line has no usable candidates"
        );
        return ReviewLine {
            product_name: line.product_name,
            quantity: line.quantity,
            unit: line.unit,
            suggested_product_ids: Vec::new(),
            selected_product_id: None,
            status: LineStatus::Unmatchable,
        };
    }

    ReviewLine {
        product_name: line.product_name,
        quantity: line.quantity,
        unit: line.unit,
        suggested_product_ids: suggestions,
        selected_product_id: None,
        status: LineStatus::Pending,
    }
}

/// Active catalog products whose name matches the free-text reference
fn name_candidates<'a>(name: &str, catalog: &'a [CatalogProduct]) -> Vec<&'a CatalogProduct> {
    catalog
        .iter()
        .filter(|p| p.is_active && name_matches(name, p))
        .collect()
}

/// Case-insensitive substring or token match between free text and a product
fn name_matches(query: &str, product: &CatalogProduct) -> bool {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return false;
    }
    let name = product.name.to_lowercase();
    if name.contains(&query) || query.contains(&name) {
        return true;
    }

    // Token match: every query token appears among the product's name and
    // variety tokens, plural-insensitively ("roma tomatoes" ~ "Tomatoes"/"Roma")
    let mut product_tokens: Vec<String> = name.split_whitespace().map(normalize_token).collect();
    if let Some(variety) = &product.variety {
        product_tokens.extend(variety.to_lowercase().split_whitespace().map(normalize_token));
    }
    query
        .split_whitespace()
        .map(normalize_token)
        .all(|token| product_tokens.contains(&token))
}

fn normalize_token(token: &str) -> String {
    let token = token.trim_matches(|c: char| !c.is_alphanumeric());
    token.strip_suffix('s').unwrap_or(token).to_string()
}
