//! Server state - service singletons shared across handlers

use std::sync::Arc;

use crate::checkout::CheckoutService;
use crate::core::Config;
use crate::orders::store::OrderStore;
use crate::services::{
    AccountService, AiClient, CatalogService, InvoiceExtractor, OrderParser, SourcingService,
};
use shared::AppResult;

/// Shared server state
///
/// Holds one instance of every service behind `Arc`, so cloning the state
/// into each request handler is cheap. The AI collaborators are stored as
/// trait objects; the rest of the pipeline never sees the concrete client.
#[derive(Clone)]
pub struct ServerState {
    pub config: Config,
    pub catalog: Arc<CatalogService>,
    pub accounts: Arc<AccountService>,
    pub orders: Arc<OrderStore>,
    pub sourcing: Arc<SourcingService>,
    pub checkout: CheckoutService,
    pub parser: Arc<dyn OrderParser>,
    pub extractor: Arc<dyn InvoiceExtractor>,
}

impl std::fmt::Debug for ServerState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServerState")
            .field("config", &self.config)
            .field("catalog", &self.catalog)
            .field("orders", &self.orders)
            .finish()
    }
}

impl ServerState {
    /// Build the full service graph from configuration
    pub fn initialize(config: &Config) -> AppResult<Self> {
        let catalog = Arc::new(CatalogService::new());
        if config.seed_demo_data {
            catalog.seed_demo();
        }
        let accounts = Arc::new(AccountService::new());
        let orders = Arc::new(OrderStore::new());
        let sourcing = Arc::new(SourcingService::new());
        let checkout = CheckoutService::new(catalog.clone(), accounts.clone(), orders.clone());
        let ai = Arc::new(AiClient::from_config(config)?);

        Ok(Self {
            config: config.clone(),
            catalog,
            accounts,
            orders,
            sourcing,
            checkout,
            parser: ai.clone(),
            extractor: ai,
        })
    }
}
