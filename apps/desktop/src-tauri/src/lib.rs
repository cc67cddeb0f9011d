//! # STOP B4U SHOP Desktop Library
//!
//! Tauri host for the product comparison shell. All startup decisions live
//! in `stopb4u-shell`; this crate wires them to real windows, dialogs and
//! process exit codes.
//!
//! ## Module Organization
//! ```text
//! stopb4u_desktop_lib/
//! ├── lib.rs          ◄─── You are here (Tauri setup & run)
//! ├── window.rs       ◄─── WindowHost backed by WebviewWindowBuilder
//! ├── dialog.rs       ◄─── Native fatal-error dialog
//! ├── state/
//! │   ├── mod.rs      ◄─── State type exports
//! │   ├── lifecycle.rs◄─── Running shell (view + controller)
//! │   └── config.rs   ◄─── Loaded settings
//! ├── commands/
//! │   ├── mod.rs      ◄─── Command exports
//! │   ├── view.rs     ◄─── get_view
//! │   ├── catalog.rs  ◄─── search_products, compare_product
//! │   └── config.rs   ◄─── get_settings
//! └── error.rs        ◄─── API error type for commands
//! ```

pub mod commands;
pub mod dialog;
pub mod error;
pub mod state;
pub mod window;

use std::path::PathBuf;
use std::sync::Arc;
use tauri::path::BaseDirectory;
use tauri::{Manager, WindowEvent};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use state::{ConfigState, LifecycleState};
use stopb4u_db::{Database, DbConfig, SqlProbe};
use stopb4u_shell::{
    Controller, ControllerRegistry, MainController, Shell, ViewLoader, MAIN_CONTROLLER,
};
use window::{TauriHost, MAIN_WINDOW};

/// Bundled resource directory holding `<layout>.json` files.
const LAYOUT_RESOURCE: &str = "layouts";

/// Bundled window icon.
const ICON_RESOURCE: &str = "icons/icon.png";

/// Runs the Tauri application.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                       Application Startup                               │
/// │                                                                         │
/// │  1. Initialize Logging (RUST_LOG, default info)                         │
/// │                                                                         │
/// │  2. Load settings.toml ($STOPB4U_CONFIG or per-OS config dir)           │
/// │                                                                         │
/// │  3. Build Shell                                                         │
/// │     • SqlProbe bounded by database.probe_timeout_secs                   │
/// │     • ViewLoader over ui.layout_dir or the bundled layouts              │
/// │     • MainController factory over a lazy pool                           │
/// │                                                                         │
/// │  4. Shell::launch (blocking, inside setup)                              │
/// │     • Err(Fatal)  ──► native dialog ──► exit 1                          │
/// │     • Ok(Running) ──► LifecycleState                                    │
/// │                                                                         │
/// │  5. Main window CloseRequested ──► Running::close ──► exit 0            │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn run() {
    init_tracing();

    info!(title = stopb4u_core::APP_TITLE, "Starting desktop application");

    let result = tauri::Builder::default()
        .setup(|app| {
            let config = ConfigState::load();
            let settings = config.settings().clone();

            let layout_dir = match settings.layout_dir() {
                Some(dir) => dir.to_path_buf(),
                None => app.path().resolve(LAYOUT_RESOURCE, BaseDirectory::Resource)?,
            };
            let icon = resource_path(app, ICON_RESOURCE);
            info!(layout_dir = %layout_dir.display(), "Layout directory determined");

            // Commands may arrive before launch returns
            app.manage(LifecycleState::new());
            app.manage(config);

            let registry = controller_registry(settings.db_config());
            let loader = ViewLoader::new(layout_dir, registry);
            let probe = SqlProbe::new(settings.db_config()).with_timeout(settings.probe_timeout());
            let shell = Shell::new(probe, settings, loader).with_icon(icon);

            let mut host = TauriHost::new(app.handle().clone());
            match tauri::async_runtime::block_on(shell.launch(&mut host)) {
                Ok(running) => {
                    app.state::<LifecycleState>().install(running);
                    Ok(())
                }
                Err(fatal) => {
                    dialog::show_fatal(&fatal.diagnostic);
                    std::process::exit(fatal.exit_status().code());
                }
            }
        })
        .on_window_event(|window, event| {
            if window.label() != MAIN_WINDOW {
                return;
            }
            if let WindowEvent::CloseRequested { .. } = event {
                let lifecycle = window.state::<LifecycleState>();
                if let Some(running) = lifecycle.take() {
                    let status = tauri::async_runtime::block_on(running.close());
                    window.app_handle().exit(status.code());
                }
            }
        })
        .invoke_handler(tauri::generate_handler![
            // View commands
            commands::view::get_view,
            // Catalog commands
            commands::catalog::search_products,
            commands::catalog::compare_product,
            // Config commands
            commands::config::get_settings,
        ])
        .run(tauri::generate_context!());

    if let Err(e) = result {
        let err = stopb4u_shell::StartupError::Unhandled(e.to_string());
        dialog::show_fatal(&err.diagnostic());
        std::process::exit(1);
    }
}

/// Registers the controllers layouts may name.
fn controller_registry(db_config: DbConfig) -> ControllerRegistry {
    ControllerRegistry::new().with(MAIN_CONTROLLER, move || {
        let db = Database::connect_lazy(&db_config)?;
        let controller: Arc<dyn Controller> = Arc::new(MainController::new(Arc::new(db)));
        Ok(controller)
    })
}

/// Resolves a bundled resource, or `None` if the platform has no resource
/// directory.
fn resource_path(app: &tauri::App, resource: &str) -> Option<PathBuf> {
    app.path()
        .resolve(resource, BaseDirectory::Resource)
        .map_err(|e| warn!(resource = %resource, error = %e, "Resource path unavailable"))
        .ok()
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=stopb4u=trace` - Trace for the stopb4u crates only
/// - Default: INFO, DEBUG for stopb4u crates
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,stopb4u=debug,sqlx=warn"));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}
