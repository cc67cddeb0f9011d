//! # API Error Type
//!
//! Unified error type for Tauri commands.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  invoke('compare_product', { productId })                               │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  MainController::compare ── ControllerError ─────┐                     │
//! │         │                    ├── UnknownProduct   │                     │
//! │         │                    ├── ShutDown         ├──► ApiError ──────► │
//! │         │                    ├── Catalog(DbError) │    { code, message }│
//! │         │                    └── Compare(CoreError)                     │
//! │         ▼                                                               │
//! │  Ok(PriceComparison) ─────────────────────────────────────────────────► │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Tauri serializes command errors, so the frontend receives
//! `{ "code": "NOT_FOUND", "message": "Product not found: ..." }`.

use serde::Serialize;
use stopb4u_core::CoreError;
use stopb4u_db::DbError;
use stopb4u_shell::ControllerError;

/// API error returned from Tauri commands.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code
    pub code: ErrorCode,

    /// Human-readable error message
    pub message: String,
}

/// Error codes for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Resource not found
    NotFound,

    /// Input rejected
    ValidationError,

    /// Database operation failed
    DatabaseError,

    /// Nothing to compare
    NoListings,

    /// The window is closing or the controller has shut down
    Unavailable,

    /// Anything else
    Internal,
}

impl ApiError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    pub fn not_found(resource: &str, id: &str) -> Self {
        ApiError::new(ErrorCode::NotFound, format!("{} not found: {}", resource, id))
    }

    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    pub fn unavailable(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Unavailable, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Internal, message)
    }
}

/// Converts database errors to API errors.
impl From<DbError> for ApiError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { entity, id } => ApiError::not_found(&entity, &id),
            DbError::UniqueViolation(msg) | DbError::ForeignKeyViolation(msg) => {
                tracing::warn!(error = %msg, "Constraint violation");
                ApiError::validation("Invalid or duplicate value")
            }
            DbError::ConnectionFailed(_) | DbError::PoolExhausted => {
                ApiError::new(ErrorCode::DatabaseError, "Database connection failed")
            }
            other => {
                // Log the real cause, return a generic message
                tracing::error!(error = %other, "Database operation failed");
                ApiError::new(ErrorCode::DatabaseError, "Database operation failed")
            }
        }
    }
}

/// Converts core errors to API errors.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::NoListings { product_id } => ApiError::new(
                ErrorCode::NoListings,
                format!("No retailer lists product {}", product_id),
            ),
            other => {
                tracing::error!(error = %other, "Comparison failed");
                ApiError::internal(other.to_string())
            }
        }
    }
}

/// Converts controller errors to API errors.
impl From<ControllerError> for ApiError {
    fn from(err: ControllerError) -> Self {
        match err {
            ControllerError::UnknownProduct(id) => ApiError::not_found("Product", &id),
            ControllerError::ShutDown => ApiError::unavailable("Application is shutting down"),
            ControllerError::Catalog(e) => e.into(),
            ControllerError::Compare(e) => e.into(),
            other @ ControllerError::MissingNodes(_) => ApiError::internal(other.to_string()),
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}
