//! Order lifecycle and storage
//!
//! [`lifecycle`] holds the forward-only state machine and the verification
//! window arithmetic; [`tracker`] selects the order a buyer's tracking view
//! follows; [`store`] owns the orders.

pub mod lifecycle;
pub mod store;
pub mod tracker;

pub use lifecycle::{VERIFICATION_WINDOW_MINUTES, advance, format_countdown, verification_remaining};
pub use store::{OrderDetails, OrderStore, StoreError};
pub use tracker::{ActiveOrderView, VerificationCountdown, active_order_view, select_active_order};
