//! Utility module
//!
//! Re-exports the shared error/response types under the crate's namespace
//! and hosts the logging setup.

pub mod logger;

pub use shared::error::{AppError, AppResult, ErrorCode};
pub use shared::response::ApiResponse;
