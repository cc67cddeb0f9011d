//! # stopb4u-shell: Application Lifecycle for STOP B4U SHOP
//!
//! Startup ordering, settings, layout loading and the main controller,
//! with the window itself behind a trait.
//!
//! ## Startup Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  AppSettings::load_or_default ──► SqlProbe ─────────┐                  │
//! │          │                                          │                   │
//! │          ├──► ViewLoader(layout_dir, registry) ─────┤                   │
//! │          │                                          ▼                   │
//! │          └──► ThemeSource ─────────────────────► Shell::launch(host)   │
//! │                                                     │                   │
//! │                           ┌─────────────────────────┴─────────┐        │
//! │                           ▼                                   ▼        │
//! │                  Err(Fatal) → diagnostic, exit 1     Ok(Running)        │
//! │                                                          │              │
//! │                                              close ──► shutdown, exit 0 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`lifecycle`] - State machine, probe and window seams
//! - [`layout`] - Layout resolution and controller registry
//! - [`controller`] - Controller trait and the main controller
//! - [`settings`] - TOML settings and the theme provider
//! - [`assets`] - Optional window icon
//! - [`error`] - Startup error taxonomy

// =============================================================================
// Module Declarations
// =============================================================================

pub mod assets;
pub mod controller;
pub mod error;
pub mod layout;
pub mod lifecycle;
pub mod settings;

// =============================================================================
// Re-exports
// =============================================================================

pub use assets::{try_load, IconAsset};
pub use controller::{Catalog, Controller, MainController, MAIN_CONTROLLER};
pub use error::{
    ControllerError, ControllerResult, Diagnostic, LoadError, SettingsError, StartupError,
};
pub use layout::{ControllerRegistry, LoadedView, ViewLoader};
pub use lifecycle::{
    DataSourceProbe, ExitStatus, Fatal, HostError, Running, Shell, ShellState, WindowHost,
    WindowSpec,
};
pub use settings::{AppSettings, ThemeSource};
