//! Unified error system for the Verdura marketplace
//!
//! This module provides:
//! - [`ErrorCode`]: standardized error codes for all error types
//! - [`AppError`]: rich error type with codes, messages, and details
//! - [`AppResult`]: result alias used across component boundaries
//!
//! # Error Code Ranges
//!
//! - 0xxx: General errors
//! - 2xxx: Intake / ambiguity errors
//! - 3xxx: Account / checkout errors
//! - 4xxx: Order errors
//! - 7xxx: Upstream AI collaborator errors
//! - 9xxx: System errors
//!
//! Validation and ambiguity failures are recovered locally and reported to
//! the immediate caller as structured values; upstream collaborator failures
//! are caught at the pipeline boundary and degraded rather than propagated
//! as fatal errors.

use crate::response::ApiResponse;
use http::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use thiserror::Error;

/// Standardized error codes
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Success sentinel (E0000)
    Success,
    /// Input failed validation (E0002)
    ValidationFailed,
    /// Resource not found (E0003)
    NotFound,
    /// Resource already exists (E0004)
    AlreadyExists,
    /// Malformed or unsupported request (E0006)
    InvalidRequest,
    /// Confirmation attempted with unresolved ambiguous lines (E2001)
    AmbiguityUnresolved,
    /// Ambiguous line carries no usable candidates (E2002)
    UnmatchableLine,
    /// Buyer has outstanding invoices; confirmation paths are blocked (E3001)
    AccountRestricted,
    /// Order not found in the store (E4001)
    OrderNotFound,
    /// Verification attempted before delivery (E4002)
    NotDelivered,
    /// AI order-parse call failed or returned malformed data (E7001)
    UpstreamParse,
    /// AI invoice-extraction call failed or returned malformed data (E7002)
    UpstreamExtract,
    /// Internal server error (E9001)
    Internal,
}

impl ErrorCode {
    /// Get the error code string
    pub fn code(&self) -> &'static str {
        match self {
            Self::Success => "E0000",
            Self::ValidationFailed => "E0002",
            Self::NotFound => "E0003",
            Self::AlreadyExists => "E0004",
            Self::InvalidRequest => "E0006",
            Self::AmbiguityUnresolved => "E2001",
            Self::UnmatchableLine => "E2002",
            Self::AccountRestricted => "E3001",
            Self::OrderNotFound => "E4001",
            Self::NotDelivered => "E4002",
            Self::UpstreamParse => "E7001",
            Self::UpstreamExtract => "E7002",
            Self::Internal => "E9001",
        }
    }

    /// Get the default message for this error code
    pub fn message(&self) -> &'static str {
        match self {
            Self::Success => "Success",
            Self::ValidationFailed => "Validation failed",
            Self::NotFound => "Resource not found",
            Self::AlreadyExists => "Resource already exists",
            Self::InvalidRequest => "Invalid request",
            Self::AmbiguityUnresolved => "Order has unresolved ambiguous lines",
            Self::UnmatchableLine => "Line cannot be matched to any catalog product",
            Self::AccountRestricted => "Account restricted: outstanding invoices",
            Self::OrderNotFound => "Order not found",
            Self::NotDelivered => "Order has not been delivered",
            Self::UpstreamParse => "Order parsing service failed",
            Self::UpstreamExtract => "Invoice extraction service failed",
            Self::Internal => "Internal server error",
        }
    }

    /// Get the HTTP status code for this error code
    pub fn http_status(&self) -> StatusCode {
        match self {
            Self::Success => StatusCode::OK,
            Self::ValidationFailed => StatusCode::BAD_REQUEST,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::AlreadyExists => StatusCode::CONFLICT,
            Self::InvalidRequest => StatusCode::BAD_REQUEST,
            Self::AmbiguityUnresolved => StatusCode::UNPROCESSABLE_ENTITY,
            Self::UnmatchableLine => StatusCode::UNPROCESSABLE_ENTITY,
            Self::AccountRestricted => StatusCode::FORBIDDEN,
            Self::OrderNotFound => StatusCode::NOT_FOUND,
            Self::NotDelivered => StatusCode::UNPROCESSABLE_ENTITY,
            Self::UpstreamParse => StatusCode::BAD_GATEWAY,
            Self::UpstreamExtract => StatusCode::BAD_GATEWAY,
            Self::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Application error with structured error code and details
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct AppError {
    /// The error code identifying the type of error
    pub code: ErrorCode,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details (field-level errors, context, etc.)
    pub details: Option<HashMap<String, Value>>,
}

impl AppError {
    /// Create a new error with the default message for the error code
    pub fn new(code: ErrorCode) -> Self {
        Self {
            message: code.message().to_string(),
            code,
            details: None,
        }
    }

    /// Create a new error with a custom message
    pub fn with_message(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: None,
        }
    }

    /// Add a detail entry to this error
    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.details
            .get_or_insert_with(HashMap::new)
            .insert(key.into(), value.into());
        self
    }

    /// Get the HTTP status code for this error
    pub fn http_status(&self) -> StatusCode {
        self.code.http_status()
    }

    // ==================== Convenience constructors ====================

    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::ValidationFailed, msg)
    }

    /// Create a not found error
    pub fn not_found(resource: impl Into<String>) -> Self {
        let r = resource.into();
        Self::with_message(ErrorCode::NotFound, format!("{} not found", r))
            .with_detail("resource", r)
    }

    /// Create an already exists error
    pub fn already_exists(resource: impl Into<String>) -> Self {
        let r = resource.into();
        Self::with_message(ErrorCode::AlreadyExists, format!("{} already exists", r))
            .with_detail("resource", r)
    }

    /// Create an invalid request error
    pub fn invalid_request(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::InvalidRequest, msg)
    }

    /// Create an ambiguity unresolved error
    pub fn ambiguity_unresolved(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::AmbiguityUnresolved, msg)
    }

    /// Create an account restricted error
    pub fn account_restricted(buyer_id: impl Into<String>) -> Self {
        let b = buyer_id.into();
        Self::new(ErrorCode::AccountRestricted).with_detail("buyer_id", b)
    }

    /// Create an upstream parse error
    pub fn upstream_parse(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::UpstreamParse, msg)
    }

    /// Create an upstream extraction error
    pub fn upstream_extract(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::UpstreamExtract, msg)
    }

    /// Create an internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::Internal, msg)
    }
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        use axum::response::IntoResponse;

        let status = self.http_status();
        let mut body = ApiResponse::<()>::error(self.code.code(), self.message);
        body.details = self.details;

        (status, axum::Json(body)).into_response()
    }
}

/// Result type for operations that report structured failures
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_strings_by_range() {
        assert_eq!(ErrorCode::AmbiguityUnresolved.code(), "E2001");
        assert_eq!(ErrorCode::AccountRestricted.code(), "E3001");
        assert_eq!(ErrorCode::UpstreamParse.code(), "E7001");
    }

    #[test]
    fn test_http_status_mapping() {
        assert_eq!(
            ErrorCode::AccountRestricted.http_status(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            ErrorCode::AmbiguityUnresolved.http_status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(ErrorCode::UpstreamParse.http_status(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn test_details_accumulate() {
        let err = AppError::validation("missing field")
            .with_detail("field", "contact_name")
            .with_detail("index", 2);
        let details = err.details.unwrap();
        assert_eq!(details.len(), 2);
        assert_eq!(details["field"], "contact_name");
    }
}
