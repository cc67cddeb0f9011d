//! # Shell Error Types
//!
//! Everything that can go wrong between process start and window close.
//!
//! ## Startup Taxonomy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        StartupError                                     │
//! │                                                                         │
//! │  Connectivity ──► fatal ──► "Database Connection Failed"  exit 1        │
//! │  Load         ──► fatal ──► "Application Error"           exit 1        │
//! │  Unhandled    ──► fatal ──► "Application Error"           exit 1        │
//! │                                                                         │
//! │  ConfigRead       ──► logged, default theme used                        │
//! │  ResourceMissing  ──► logged, default window icon used                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Nothing is retried. Fatal errors all leave through the same
//! diagnostic-then-exit path.

use std::path::PathBuf;
use thiserror::Error;

use stopb4u_core::{CoreError, LayoutError, ProbeFailure};
use stopb4u_db::DbError;

/// Title of the diagnostic shown when the probe fails.
pub const DB_FAILURE_TITLE: &str = "Database Connection Failed";

/// Title of the diagnostic shown for every other fatal error.
pub const APP_ERROR_TITLE: &str = "Application Error";

// =============================================================================
// Settings
// =============================================================================

/// Errors reading `settings.toml`.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Cannot read settings: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed settings: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid settings: {0}")]
    Invalid(String),
}

// =============================================================================
// View Loading
// =============================================================================

/// Errors turning a layout reference into a bound view.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The reference is not a bare layout name.
    #[error("Invalid layout reference '{0}'")]
    InvalidReference(String),

    #[error("Layout not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Cannot read layout {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Layout '{layout}' is invalid: {source}")]
    Malformed {
        layout: String,
        #[source]
        source: LayoutError,
    },

    #[error("No controller registered as '{0}'")]
    UnknownController(String),

    /// The controller could not be constructed or could not bind.
    #[error("Controller '{name}' failed: {source}")]
    Controller {
        name: String,
        #[source]
        source: ControllerError,
    },
}

// =============================================================================
// Controller
// =============================================================================

/// Errors raised by controllers.
#[derive(Debug, Error)]
pub enum ControllerError {
    /// Nodes the controller needs are absent from the view.
    #[error("view is missing required nodes: {}", .0.join(", "))]
    MissingNodes(Vec<String>),

    #[error("product not found: {0}")]
    UnknownProduct(String),

    /// The controller has released its resources.
    #[error("controller is shut down")]
    ShutDown,

    #[error(transparent)]
    Catalog(#[from] DbError),

    #[error(transparent)]
    Compare(#[from] CoreError),
}

/// Result type for controller operations.
pub type ControllerResult<T> = Result<T, ControllerError>;

// =============================================================================
// Startup
// =============================================================================

/// A failure during startup, fatal or recovered.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("Data source unavailable: {0}")]
    Connectivity(ProbeFailure),

    #[error(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    ConfigRead(#[from] SettingsError),

    #[error("Optional resource missing: {0}")]
    ResourceMissing(String),

    #[error("{0}")]
    Unhandled(String),
}

impl StartupError {
    /// Fatal errors abort startup; the rest are logged and recovered.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            StartupError::Connectivity(_) | StartupError::Load(_) | StartupError::Unhandled(_)
        )
    }

    /// The diagnostic shown to the user before exiting.
    pub fn diagnostic(&self) -> Diagnostic {
        match self {
            StartupError::Connectivity(reason) => Diagnostic {
                title: DB_FAILURE_TITLE.to_string(),
                message: format!(
                    "Could not connect to the database ({}).\n\
                     Please check your database configuration in settings.toml",
                    reason
                ),
            },
            other => Diagnostic {
                title: APP_ERROR_TITLE.to_string(),
                message: format!("Failed to start application: {}", other),
            },
        }
    }
}

/// A blocking message shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub title: String,
    pub message: String,
}
