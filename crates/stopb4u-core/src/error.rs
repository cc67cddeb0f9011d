//! # Error Types
//!
//! Domain-specific error types for stopb4u-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  stopb4u-core errors (this file)                                       │
//! │  ├── CoreError        - Comparison / domain failures                   │
//! │  └── LayoutError      - Layout document rejected                       │
//! │                                                                         │
//! │  stopb4u-db errors (separate crate)                                    │
//! │  └── DbError          - Database operation failures                    │
//! │                                                                         │
//! │  stopb4u-shell errors                                                  │
//! │  └── StartupError     - What the startup state machine reports         │
//! │                                                                         │
//! │  Flow: LayoutError → LoadError → StartupError → Diagnostic             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Domain logic errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A comparison was requested for a product nobody sells.
    #[error("No listings for product {product_id}")]
    NoListings { product_id: String },

    /// A listing handed to the comparison belongs to another product.
    #[error("Listing {listing_id} belongs to product {actual}, expected {expected}")]
    ForeignListing {
        listing_id: String,
        expected: String,
        actual: String,
    },

    /// Layout error (wraps LayoutError).
    #[error("Layout error: {0}")]
    Layout(#[from] LayoutError),
}

// =============================================================================
// Layout Error
// =============================================================================

/// Reasons a layout document is rejected.
///
/// ## When This Occurs
/// ```text
/// main-layout.json ──► LayoutDocument::parse
///                           │
///                           ├── not JSON / wrong shape ──► Malformed
///                           ├── "controller": ""       ──► MissingController
///                           └── two nodes, same id     ──► DuplicateId
/// ```
#[derive(Debug, Error)]
pub enum LayoutError {
    /// The document is not valid JSON or does not match the layout schema.
    #[error("Malformed layout: {0}")]
    Malformed(String),

    /// The document does not name a controller.
    #[error("Layout does not declare a controller")]
    MissingController,

    /// Node ids must be unique within a tree.
    #[error("Duplicate node id '{0}'")]
    DuplicateId(String),
}

impl From<serde_json::Error> for LayoutError {
    fn from(err: serde_json::Error) -> Self {
        LayoutError::Malformed(err.to_string())
    }
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::NoListings {
            product_id: "p-1".to_string(),
        };
        assert_eq!(err.to_string(), "No listings for product p-1");

        let err = LayoutError::DuplicateId("searchField".to_string());
        assert_eq!(err.to_string(), "Duplicate node id 'searchField'");
    }

    #[test]
    fn test_layout_converts_to_core_error() {
        let core_err: CoreError = LayoutError::MissingController.into();
        assert!(matches!(core_err, CoreError::Layout(_)));
    }

    #[test]
    fn test_json_error_becomes_malformed() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: LayoutError = json_err.into();
        assert!(matches!(err, LayoutError::Malformed(_)));
    }
}
