//! Service layer - external collaborators of the intake pipeline
//!
//! Catalog, account status, and order storage are in-memory snapshot stores;
//! the AI collaborators sit behind [`OrderParser`] / [`InvoiceExtractor`].

pub mod account_service;
pub mod ai_client;
pub mod catalog_service;
pub mod sourcing_service;

pub use account_service::AccountService;
pub use ai_client::{AiClient, InvoiceExtractor, OrderParser};
pub use catalog_service::CatalogService;
pub use sourcing_service::SourcingService;
