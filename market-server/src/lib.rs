//! Verdura Market Server - B2B produce-marketplace order-intake service
//!
//! # Architecture overview
//!
//! The heart of the service is the order-intake normalization pipeline:
//! free text (or a historical order) flows through the ambiguity resolver
//! into a reviewable line list, through the cart normalizer into a
//! canonical cart, through the pricing engine into totals, and on
//! confirmation into the order lifecycle tracker.
//!
//! # Module structure
//!
//! ```text
//! market-server/src/
//! ├── core/       # Config, state, HTTP bootstrap
//! ├── intake/     # Ambiguity resolver + cart normalizer
//! ├── pricing/    # Checkout totals + comparison pricing
//! ├── orders/     # Lifecycle state machine, tracking, store
//! ├── checkout/   # Gate + confirmation flow
//! ├── services/   # Catalog, accounts, sourcing, AI collaborators
//! ├── api/        # HTTP routes and handlers
//! └── utils/      # Logging
//! ```

pub mod api;
pub mod checkout;
pub mod core;
pub mod intake;
pub mod orders;
pub mod pricing;
pub mod services;
pub mod utils;

// Re-export public types
pub use checkout::{CheckoutRequest, CheckoutService};
pub use core::{Config, Server, ServerState};
pub use intake::{ReviewLine, ReviewList};
pub use orders::store::OrderStore;
pub use utils::logger::{init_logger, init_logger_with_file};
pub use utils::{ApiResponse, AppError, AppResult, ErrorCode};

/// Load .env and initialize logging; returns the file-log guard when
/// `LOG_DIR` is set.
pub fn setup_environment() -> std::io::Result<Option<tracing_appender::non_blocking::WorkerGuard>> {
    dotenv::dotenv().ok();

    match std::env::var("LOG_DIR") {
        Ok(dir) if !dir.is_empty() => Ok(Some(init_logger_with_file(&dir)?)),
        _ => {
            init_logger();
            Ok(None)
        }
    }
}

pub fn print_banner() {
    println!(
        r#"
__     _______ ____  ____  _   _ ____      _
\ \   / / ____|  _ \|  _ \| | | |  _ \    / \
 \ \ / /|  _| | |_) | | | | | | | |_) |  / _ \
  \ V / | |___|  _ <| |_| | |_| |  _ <  / ___ \
   \_/  |_____|_| \_\____/ \___/|_| \_\/_/   \_\
                 market server
    "#
    );
}
