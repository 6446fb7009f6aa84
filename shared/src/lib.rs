//! Shared types for the Verdura marketplace
//!
//! Common types used across crates: domain models, the unified error
//! system, the API response envelope, and small money helpers.

pub mod error;
pub mod models;
pub mod response;
pub mod util;

// Re-exports
pub use error::{AppError, AppResult, ErrorCode};
pub use response::ApiResponse;
pub use serde::{Deserialize, Serialize};
