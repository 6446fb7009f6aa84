//! Checkout confirmation flow
//!
//! Every path that turns a cart into an order goes through here: manual
//! checkout, AI quick-order confirmation, and one-tap re-order. The
//! account gate is consulted fresh on each attempt, and the order is
//! created only after gate, validation, and pricing have all passed, so a
//! failed confirmation leaves no partial state behind.

use crate::intake::{ReorderAdjustment, ReviewList, cart};
use crate::orders::store::{OrderDetails, OrderStore};
use crate::pricing;
use crate::services::{AccountService, CatalogService};
use serde::Deserialize;
use shared::AppResult;
use shared::error::AppError;
use shared::models::{CartLine, Order, PaymentMethod};
use std::sync::Arc;
use validator::Validate;

/// Fields every checkout confirmation must carry
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CheckoutRequest {
    #[validate(length(min = 1, message = "buyer_id is required"))]
    pub buyer_id: String,
    #[validate(length(min = 1, message = "delivery_date is required"))]
    pub delivery_date: String,
    #[validate(length(min = 1, message = "delivery_time is required"))]
    pub delivery_time: String,
    #[validate(length(min = 1, message = "contact_name is required"))]
    pub contact_name: String,
    pub payment_method: PaymentMethod,
}

/// Orchestrates cart confirmation into the order store
#[derive(Clone)]
pub struct CheckoutService {
    catalog: Arc<CatalogService>,
    accounts: Arc<AccountService>,
    orders: Arc<OrderStore>,
}

impl std::fmt::Debug for CheckoutService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CheckoutService").finish()
    }
}

impl CheckoutService {
    pub fn new(
        catalog: Arc<CatalogService>,
        accounts: Arc<AccountService>,
        orders: Arc<OrderStore>,
    ) -> Self {
        Self {
            catalog,
            accounts,
            orders,
        }
    }

    /// Confirm an explicit cart into an order
    pub fn confirm_cart(&self, request: &CheckoutRequest, lines: &[CartLine]) -> AppResult<Order> {
        self.ensure_account_clear(&request.buyer_id)?;
        validate_request(request)?;

        let cart = cart::merge_lines(&[], lines);
        if cart.is_empty() {
            return Err(AppError::validation("cart is empty"));
        }

        let totals = pricing::cart_totals(&cart, request.payment_method)?;
        Ok(self.orders.create(
            &request.buyer_id,
            cart,
            totals,
            OrderDetails {
                payment_method: request.payment_method,
                delivery_date: request.delivery_date.clone(),
                delivery_time: request.delivery_time.clone(),
                contact_name: request.contact_name.clone(),
            },
        ))
    }

    /// Confirm a reviewed quick-order line list into an order
    pub fn confirm_review(&self, request: &CheckoutRequest, review: &ReviewList) -> AppResult<Order> {
        // Gate first: a restricted account must not learn anything about
        // resolution state from the error it gets back
        self.ensure_account_clear(&request.buyer_id)?;
        let lines = review.confirm(&self.catalog.snapshot())?;
        self.confirm_cart(request, &lines)
    }

    /// One-tap re-order of a historical order, with optional adjustments
    pub fn reorder(
        &self,
        request: &CheckoutRequest,
        source_order_id: &str,
        adjustments: &[ReorderAdjustment],
    ) -> AppResult<Order> {
        self.ensure_account_clear(&request.buyer_id)?;

        let source = self
            .orders
            .find(source_order_id)
            .ok_or_else(|| AppError::with_message(
                shared::ErrorCode::OrderNotFound,
                format!("order {source_order_id} not found"),
            ))?;
        if source.buyer_id != request.buyer_id {
            return Err(AppError::invalid_request(
                "order belongs to a different buyer",
            ));
        }

        let lines = cart::reorder_lines(&source, adjustments);
        self.confirm_cart(request, &lines)
    }

    /// Re-evaluated on every confirmation attempt; never cached
    fn ensure_account_clear(&self, buyer_id: &str) -> AppResult<()> {
        if self.accounts.has_outstanding_invoices(buyer_id) {
            tracing::info!(buyer_id, "checkout blocked: outstanding invoices");
            return Err(AppError::account_restricted(buyer_id));
        }
        Ok(())
    }
}

fn validate_request(request: &CheckoutRequest) -> AppResult<()> {
    request.validate().map_err(|errors| {
        let mut err = AppError::validation("missing required checkout fields");
        if let Ok(value) = serde_json::to_value(&errors) {
            err = err.with_detail("fields", value);
        }
        err
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::intake::resolver::ReviewList;
    use shared::ErrorCode;
    use shared::models::{ParsedLine, Unit};

    fn service() -> (CheckoutService, Arc<CatalogService>, Arc<AccountService>, Arc<OrderStore>) {
        let catalog = Arc::new(CatalogService::new());
        catalog.seed_demo();
        let accounts = Arc::new(AccountService::new());
        let orders = Arc::new(OrderStore::new());
        (
            CheckoutService::new(catalog.clone(), accounts.clone(), orders.clone()),
            catalog,
            accounts,
            orders,
        )
    }

    fn request(buyer_id: &str, method: PaymentMethod) -> CheckoutRequest {
        CheckoutRequest {
            buyer_id: buyer_id.to_string(),
            delivery_date: "2026-08-06".to_string(),
            delivery_time: "08:00".to_string(),
            contact_name: "Ana".to_string(),
            payment_method: method,
        }
    }

    fn cart_line(catalog: &CatalogService, name: &str, quantity: f64) -> CartLine {
        let product = catalog
            .snapshot()
            .into_iter()
            .find(|p| p.name == name)
            .unwrap();
        CartLine {
            product_id: product.id.clone(),
            name: product.display_name(),
            quantity,
            unit: product.unit,
            unit_price: product.unit_price,
        }
    }

    #[test]
    fn test_confirm_cart_creates_priced_order() {
        let (service, catalog, _, orders) = service();
        let lines = vec![cart_line(&catalog, "Tomatoes", 5.0)];

        let order = service
            .confirm_cart(&request("buyer-1", PaymentMethod::PayNow), &lines)
            .unwrap();
        assert!((order.subtotal - 15.0).abs() < 1e-9);
        assert!((order.discount - 1.5).abs() < 1e-9);
        assert!((order.total - 13.5).abs() < 1e-9);
        assert_eq!(orders.orders_for_buyer("buyer-1").len(), 1);
    }

    #[test]
    fn test_restricted_account_blocks_every_confirmation_path() {
        let (service, catalog, accounts, orders) = service();
        accounts.set_outstanding("buyer-1", true);
        let lines = vec![cart_line(&catalog, "Tomatoes", 5.0)];
        let req = request("buyer-1", PaymentMethod::Invoice);

        let err = service.confirm_cart(&req, &lines).unwrap_err();
        assert_eq!(err.code, ErrorCode::AccountRestricted);

        let review = ReviewList::build(
            vec![ParsedLine::unambiguous("tomatoes", 5.0, Unit::Kg)],
            &catalog.snapshot(),
        );
        let err = service.confirm_review(&req, &review).unwrap_err();
        assert_eq!(err.code, ErrorCode::AccountRestricted);

        let err = service.reorder(&req, "ord-any", &[]).unwrap_err();
        assert_eq!(err.code, ErrorCode::AccountRestricted);

        // No partial state escaped any failed path
        assert!(orders.orders_for_buyer("buyer-1").is_empty());

        // Clearing the flag takes effect on the very next attempt
        accounts.set_outstanding("buyer-1", false);
        assert!(service.confirm_cart(&req, &lines).is_ok());
    }

    #[test]
    fn test_missing_checkout_fields_rejected() {
        let (service, catalog, _, orders) = service();
        let lines = vec![cart_line(&catalog, "Tomatoes", 5.0)];
        let mut req = request("buyer-1", PaymentMethod::Invoice);
        req.contact_name = String::new();

        let err = service.confirm_cart(&req, &lines).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
        assert!(orders.orders_for_buyer("buyer-1").is_empty());
    }

    #[test]
    fn test_empty_cart_rejected() {
        let (service, _, _, _) = service();
        let err = service
            .confirm_cart(&request("buyer-1", PaymentMethod::Invoice), &[])
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
    }

    #[test]
    fn test_quick_order_round_trip() {
        let (service, catalog, _, _) = service();
        let snapshot = catalog.snapshot();
        let bananas: Vec<String> = snapshot
            .iter()
            .filter(|p| p.name == "Bananas")
            .map(|p| p.id.clone())
            .collect();

        let mut review = ReviewList::build(
            vec![
                ParsedLine::ambiguous("bananas", 100.0, Unit::Kg, bananas.clone()),
                ParsedLine::unambiguous("roma tomatoes", 5.0, Unit::Kg),
            ],
            &snapshot,
        );
        let req = request("buyer-1", PaymentMethod::Invoice);

        let err = service.confirm_review(&req, &review).unwrap_err();
        assert_eq!(err.code, ErrorCode::AmbiguityUnresolved);

        review.select(0, &bananas[0], &snapshot).unwrap();
        let order = service.confirm_review(&req, &review).unwrap();
        assert_eq!(order.lines.len(), 2);
    }

    #[test]
    fn test_reorder_merges_and_reprices() {
        let (service, catalog, _, _) = service();
        let lines = vec![
            cart_line(&catalog, "Tomatoes", 5.0),
            cart_line(&catalog, "Oranges", 2.0),
        ];
        let req = request("buyer-1", PaymentMethod::Invoice);
        let original = service.confirm_cart(&req, &lines).unwrap();

        let reordered = service
            .reorder(
                &req,
                &original.id,
                &[ReorderAdjustment {
                    product_id: original.lines[1].product_id.clone(),
                    unit: original.lines[1].unit,
                    quantity: 0.0,
                }],
            )
            .unwrap();
        assert_eq!(reordered.lines.len(), 1);
        assert_ne!(reordered.id, original.id);

        // A foreign order cannot be re-ordered
        let other = request("buyer-2", PaymentMethod::Invoice);
        assert!(service.reorder(&other, &original.id, &[]).is_err());
    }
}
