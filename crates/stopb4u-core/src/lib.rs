//! # stopb4u-core: Pure Logic for the Product Comparison Analyzer
//!
//! Everything in this crate is deterministic and free of I/O. The shell and
//! the desktop host feed it strings and rows; it hands back view trees,
//! styled view trees and price comparisons.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     STOP B4U SHOP Architecture                          │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  Desktop host (Tauri window)                    │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │          stopb4u-shell (startup state machine)                  │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ stopb4u-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   view    │  │   theme   │  │  compare  │  │   money   │  │   │
//! │  │   │ ViewTree  │  │  Theme    │  │ PriceComp │  │   Money   │  │   │
//! │  │   │ layouts   │  │ apply_    │  │  Offer    │  │           │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO WINDOWS • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Catalog types and the probe result
//! - [`money`] - Integer-cent money
//! - [`view`] - View tree and layout document parsing
//! - [`theme`] - Theme identifiers, palettes and the theme applier
//! - [`compare`] - Cross-retailer price comparison
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use stopb4u_core::theme::{apply_theme, ThemeId};
//! use stopb4u_core::view::LayoutDocument;
//!
//! let doc = LayoutDocument::parse(r#"{
//!     "controller": "main",
//!     "root": { "kind": "pane", "id": "root" }
//! }"#).unwrap();
//!
//! let mut tree = doc.into_tree();
//! apply_theme(&mut tree, &ThemeId::new("dark"));
//! assert_eq!(tree.theme(), Some("dark"));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod compare;
pub mod error;
pub mod money;
pub mod theme;
pub mod types;
pub mod view;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use compare::{compare, Offer, PriceComparison};
pub use error::{CoreError, CoreResult, LayoutError};
pub use money::Money;
pub use theme::{apply_theme, Theme, ThemeId};
pub use types::*;
pub use view::{LayoutDocument, ViewNode, ViewTree};

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Title of the main window.
pub const APP_TITLE: &str = "STOP B4U SHOP - Product Comparison Analyzer";

/// Layout loaded at startup.
pub const MAIN_LAYOUT: &str = "main-layout";
