//! Domain models
//!
//! Plain data types shared between the server crate and clients.

pub mod comparison;
pub mod intake;
pub mod order;
pub mod product;
pub mod sourcing;

pub use comparison::{InvoiceLineDraft, PriceComparisonLine};
pub use intake::ParsedLine;
pub use order::{CartLine, Order, OrderStatus, PaymentMethod};
pub use product::{CatalogProduct, EnvironmentalMetrics, ProductCreate, Unit};
pub use sourcing::{SourcingRequest, SourcingRequestCreate, SourcingStatus};
