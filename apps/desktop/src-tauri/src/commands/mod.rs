//! # Tauri Commands Module
//!
//! Commands exposed to the webview.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs      ◄─── You are here (exports)
//! ├── view.rs     ◄─── Themed view tree
//! ├── catalog.rs  ◄─── Product search and price comparison
//! └── config.rs   ◄─── Settings (redacted)
//! ```
//!
//! ## How Commands Work
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  ui/index.html                                                          │
//! │  const { invoke } = window.__TAURI__.core;                              │
//! │  const products = await invoke('search_products', { query: 'coffee' }); │
//! │         │                                                               │
//! │         │ (IPC via WebView)                                             │
//! │         ▼                                                               │
//! │  #[tauri::command]                                                      │
//! │  async fn search_products(                                              │
//! │      lifecycle: State<'_, LifecycleState>,  ◄── Injected by Tauri      │
//! │      query: String,                         ◄── From invoke params     │
//! │  ) -> Result<Vec<Product>, ApiError>                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod catalog;
pub mod config;
pub mod view;
