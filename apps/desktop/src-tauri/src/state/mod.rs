//! # State Module
//!
//! Application state managed by Tauri. Each command asks only for the
//! state it needs.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  setup():  app.manage(config_state);      ◄── before Shell::launch     │
//! │            app.manage(lifecycle_state);   ◄── empty until Showing      │
//! │                              │                                          │
//! │             ┌────────────────┴───────────────┐                          │
//! │             ▼                                ▼                          │
//! │  ┌──────────────────────┐       ┌──────────────────────────┐           │
//! │  │   ConfigState        │       │   LifecycleState         │           │
//! │  │   AppSettings +      │       │   Mutex<Option<Running>> │           │
//! │  │   resolved theme     │       │   view + controller      │           │
//! │  └──────────────────────┘       └──────────────────────────┘           │
//! │                                                                         │
//! │  THREAD SAFETY:                                                        │
//! │  • ConfigState: read-only after setup                                  │
//! │  • LifecycleState: taken exactly once, on window close                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod config;
mod lifecycle;

pub use config::{ConfigState, SettingsView};
pub use lifecycle::LifecycleState;
