//! # Application Lifecycle
//!
//! The startup state machine, from process start to window close.
//!
//! ## States
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  Init ──► ProbingDb ──Failed──► DbFailed            (diagnostic, 1)    │
//! │               │                                                         │
//! │           Connected                                                     │
//! │               ▼                                                         │
//! │           Loading ──LoadError / panic──► Fatal      (diagnostic, 1)    │
//! │               │                                                         │
//! │               ▼                                                         │
//! │           Theming   (never fails)                                       │
//! │               │                                                         │
//! │               ▼                                                         │
//! │           Showing ──close──► ShuttingDown           (shutdown(), 0)    │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! `Shell::launch` consumes the shell, so there is no way back into
//! `ProbingDb`. `Running::close` consumes the running app, so the
//! controller is shut down at most once, and only after `Showing`.
//!
//! Panics anywhere in startup are caught here, once, and reported as
//! [`StartupError::Unhandled`].

use async_trait::async_trait;
use futures_util::FutureExt;
use std::any::Any;
use std::fmt;
use std::panic::AssertUnwindSafe;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info, warn};

use stopb4u_core::{apply_theme, ConnectionStatus, Theme, ViewTree, APP_TITLE, MAIN_LAYOUT};
use stopb4u_db::SqlProbe;

use crate::assets::{self, IconAsset};
use crate::controller::{downcast_controller, Controller};
use crate::error::{Diagnostic, StartupError};
use crate::layout::{LoadedView, ViewLoader};
use crate::settings::ThemeSource;

// =============================================================================
// Seams
// =============================================================================

/// Checks that the data source is reachable.
#[async_trait]
pub trait DataSourceProbe: Send + Sync {
    /// One bounded attempt. Never errors, never panics on bad input.
    async fn test_connection(&self) -> ConnectionStatus;
}

#[async_trait]
impl DataSourceProbe for SqlProbe {
    async fn test_connection(&self) -> ConnectionStatus {
        self.probe().await
    }
}

/// Error a window host may report.
pub type HostError = Box<dyn std::error::Error + Send + Sync>;

/// Whatever actually puts a window on screen.
pub trait WindowHost {
    /// Builds and shows the main window.
    fn show(
        &mut self,
        window: &WindowSpec,
        view: &ViewTree,
        icon: Option<&IconAsset>,
    ) -> Result<(), HostError>;
}

// =============================================================================
// State
// =============================================================================

/// Where the shell is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellState {
    Init,
    ProbingDb,
    DbFailed,
    Loading,
    Theming,
    Showing,
    ShuttingDown,
}

impl ShellState {
    /// Terminal states have no outgoing transition.
    pub fn is_terminal(&self) -> bool {
        matches!(self, ShellState::DbFailed | ShellState::ShuttingDown)
    }
}

impl fmt::Display for ShellState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ShellState::Init => "init",
            ShellState::ProbingDb => "probing_db",
            ShellState::DbFailed => "db_failed",
            ShellState::Loading => "loading",
            ShellState::Theming => "theming",
            ShellState::Showing => "showing",
            ShellState::ShuttingDown => "shutting_down",
        };
        f.write_str(name)
    }
}

/// Process exit status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitStatus {
    /// Graceful shutdown.
    Success,
    /// Fatal startup failure.
    Failure,
}

impl ExitStatus {
    pub fn code(&self) -> i32 {
        match self {
            ExitStatus::Success => 0,
            ExitStatus::Failure => 1,
        }
    }
}

// =============================================================================
// Window
// =============================================================================

/// How the main window should look.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowSpec {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub min_width: u32,
    pub min_height: u32,
    pub theme: Theme,
}

impl WindowSpec {
    /// The main window, styled for `theme`.
    pub fn main(theme: Theme) -> Self {
        WindowSpec {
            title: APP_TITLE.to_string(),
            width: 1400,
            height: 900,
            min_width: 1200,
            min_height: 700,
            theme,
        }
    }
}

// =============================================================================
// Shell
// =============================================================================

/// Startup orchestrator. Consumed by [`Shell::launch`].
pub struct Shell {
    probe: Box<dyn DataSourceProbe>,
    config: Box<dyn ThemeSource>,
    loader: ViewLoader,
    layout: String,
    icon: Option<PathBuf>,
    state: ShellState,
}

impl Shell {
    pub fn new(
        probe: impl DataSourceProbe + 'static,
        config: impl ThemeSource + 'static,
        loader: ViewLoader,
    ) -> Self {
        Shell {
            probe: Box::new(probe),
            config: Box::new(config),
            loader,
            layout: MAIN_LAYOUT.to_string(),
            icon: None,
            state: ShellState::Init,
        }
    }

    /// Loads `layout` instead of the main layout.
    pub fn with_layout(mut self, layout: impl Into<String>) -> Self {
        self.layout = layout.into();
        self
    }

    /// Optional window icon; a missing file is not an error.
    pub fn with_icon(mut self, icon: Option<PathBuf>) -> Self {
        self.icon = icon;
        self
    }

    pub fn state(&self) -> ShellState {
        self.state
    }

    /// Runs startup through to `Showing`.
    ///
    /// ## Returns
    /// * `Ok(Running)` - the window is visible
    /// * `Err(Fatal)` - show its diagnostic, then exit with its status
    pub async fn launch(mut self, host: &mut dyn WindowHost) -> Result<Running, Fatal> {
        info!(layout = %self.layout, "Starting application");

        let outcome = AssertUnwindSafe(self.run(host)).catch_unwind().await;
        let error = match outcome {
            Ok(Ok(running)) => {
                info!("Application started successfully");
                return Ok(running);
            }
            Ok(Err(error)) => error,
            Err(panic) => StartupError::Unhandled(panic_message(panic.as_ref())),
        };

        error!(state = %self.state, error = %error, "Startup failed");
        Err(Fatal {
            state: self.state,
            diagnostic: error.diagnostic(),
            error,
        })
    }

    async fn run(&mut self, host: &mut dyn WindowHost) -> Result<Running, StartupError> {
        self.transition(ShellState::ProbingDb);
        if let ConnectionStatus::Failed(reason) = self.probe.test_connection().await {
            self.transition(ShellState::DbFailed);
            return Err(StartupError::Connectivity(reason));
        }

        self.transition(ShellState::Loading);
        let LoadedView {
            mut view,
            controller,
        } = self.loader.load(&self.layout)?;

        self.transition(ShellState::Theming);
        let theme = apply_theme(&mut view, &self.config.theme());
        let window = WindowSpec::main(theme);
        let icon = self.icon.as_deref().and_then(assets::try_load);

        host.show(&window, &view, icon.as_ref())
            .map_err(|e| StartupError::Unhandled(format!("cannot open window: {}", e)))?;

        self.transition(ShellState::Showing);
        Ok(Running {
            view,
            controller,
            window,
        })
    }

    fn transition(&mut self, next: ShellState) {
        info!(from = %self.state, to = %next, "Shell state change");
        self.state = next;
    }
}

impl fmt::Debug for Shell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Shell")
            .field("layout", &self.layout)
            .field("layout_dir", &self.loader.layout_dir())
            .field("icon", &self.icon)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

/// A startup that cannot continue.
#[derive(Debug)]
pub struct Fatal {
    /// State the shell was in when it failed.
    pub state: ShellState,
    pub error: StartupError,
    pub diagnostic: Diagnostic,
}

impl Fatal {
    pub fn exit_status(&self) -> ExitStatus {
        ExitStatus::Failure
    }
}

// =============================================================================
// Running
// =============================================================================

/// The application in `Showing`: owns the view, the controller and the
/// window description until close.
pub struct Running {
    view: ViewTree,
    controller: Arc<dyn Controller>,
    window: WindowSpec,
}

impl Running {
    pub fn state(&self) -> ShellState {
        ShellState::Showing
    }

    pub fn view(&self) -> &ViewTree {
        &self.view
    }

    pub fn window(&self) -> &WindowSpec {
        &self.window
    }

    pub fn theme(&self) -> Theme {
        self.window.theme
    }

    pub fn controller(&self) -> Arc<dyn Controller> {
        Arc::clone(&self.controller)
    }

    /// The controller as its concrete type.
    pub fn controller_as<C: Controller>(&self) -> Option<Arc<C>> {
        downcast_controller(self.controller())
    }

    /// `Showing → ShuttingDown`: shuts the controller down and reports the
    /// exit status. Shutdown failures are logged, never propagated.
    pub async fn close(self) -> ExitStatus {
        info!(from = %ShellState::Showing, to = %ShellState::ShuttingDown, "Shutting down application");

        match AssertUnwindSafe(self.controller.shutdown())
            .catch_unwind()
            .await
        {
            Ok(Ok(())) => info!("Controller shut down"),
            Ok(Err(e)) => warn!(error = %e, "Controller shutdown failed"),
            Err(panic) => {
                error!(panic = %panic_message(panic.as_ref()), "Controller shutdown panicked")
            }
        }

        ExitStatus::Success
    }
}

impl fmt::Debug for Running {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Running")
            .field("controller", &self.view.controller)
            .field("window", &self.window)
            .finish_non_exhaustive()
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(msg) = panic.downcast_ref::<&str>() {
        (*msg).to_string()
    } else if let Some(msg) = panic.downcast_ref::<String>() {
        msg.clone()
    } else {
        "unexpected panic".to_string()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::{MainController, MAIN_CONTROLLER};
    use crate::error::{ControllerError, ControllerResult, LoadError};
    use crate::layout::ControllerRegistry;
    use std::path::Path;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use stopb4u_core::{ProbeFailureKind, ThemeId};
    use stopb4u_db::{Database, DbConfig};

    const MAIN: &str = r#"{
        "controller": "main",
        "root": { "kind": "column", "id": "root", "children": [
            { "kind": "text_field", "id": "searchField" },
            { "kind": "table", "id": "productTable" },
            { "kind": "panel", "id": "comparisonPanel" }
        ]}
    }"#;

    // -------------------------------------------------------------------------
    // Fakes
    // -------------------------------------------------------------------------

    struct FixedProbe(ConnectionStatus);

    #[async_trait]
    impl DataSourceProbe for FixedProbe {
        async fn test_connection(&self) -> ConnectionStatus {
            self.0.clone()
        }
    }

    struct PanickingProbe;

    #[async_trait]
    impl DataSourceProbe for PanickingProbe {
        async fn test_connection(&self) -> ConnectionStatus {
            panic!("driver exploded")
        }
    }

    #[derive(Clone)]
    struct CountingTheme {
        theme: Option<&'static str>,
        calls: Arc<AtomicUsize>,
    }

    impl CountingTheme {
        fn new(theme: Option<&'static str>) -> Self {
            CountingTheme {
                theme,
                calls: Arc::new(AtomicUsize::new(0)),
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl ThemeSource for CountingTheme {
        fn theme(&self) -> ThemeId {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.theme.map(ThemeId::new).unwrap_or_default()
        }
    }

    #[derive(Default)]
    struct RecordingHost {
        shown: Vec<(WindowSpec, ViewTree, bool)>,
        refuse: bool,
    }

    impl WindowHost for RecordingHost {
        fn show(
            &mut self,
            window: &WindowSpec,
            view: &ViewTree,
            icon: Option<&IconAsset>,
        ) -> Result<(), HostError> {
            if self.refuse {
                return Err("no display".into());
            }
            self.shown.push((window.clone(), view.clone(), icon.is_some()));
            Ok(())
        }
    }

    enum Shutdown {
        Ok,
        Fail,
        Panic,
    }

    struct CountingController {
        shutdowns: Arc<AtomicUsize>,
        behaviour: Shutdown,
    }

    #[async_trait]
    impl Controller for CountingController {
        fn required_ids(&self) -> &'static [&'static str] {
            MainController::REQUIRED_IDS
        }

        async fn shutdown(&self) -> ControllerResult<()> {
            self.shutdowns.fetch_add(1, Ordering::SeqCst);
            match self.behaviour {
                Shutdown::Ok => Ok(()),
                Shutdown::Fail => Err(ControllerError::ShutDown),
                Shutdown::Panic => panic!("shutdown exploded"),
            }
        }

        fn into_any(self: Arc<Self>) -> Arc<dyn Any + Send + Sync> {
            self
        }
    }

    fn layouts() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("main-layout.json"), MAIN).unwrap();
        dir
    }

    fn registry(shutdowns: Arc<AtomicUsize>, behaviour: fn() -> Shutdown) -> ControllerRegistry {
        ControllerRegistry::new().with(MAIN_CONTROLLER, move || {
            let controller: Arc<dyn Controller> = Arc::new(CountingController {
                shutdowns: Arc::clone(&shutdowns),
                behaviour: behaviour(),
            });
            Ok(controller)
        })
    }

    fn shell(
        dir: &Path,
        probe: impl DataSourceProbe + 'static,
        theme: CountingTheme,
        shutdowns: Arc<AtomicUsize>,
    ) -> Shell {
        let loader = ViewLoader::new(dir, registry(shutdowns, || Shutdown::Ok));
        Shell::new(probe, theme, loader)
    }

    fn unreachable() -> FixedProbe {
        FixedProbe(ConnectionStatus::failed(
            ProbeFailureKind::Unreachable,
            "connection refused",
        ))
    }

    // -------------------------------------------------------------------------
    // Startup scenarios
    // -------------------------------------------------------------------------

    #[tokio::test]
    async fn test_db_unreachable_aborts_before_window() {
        let dir = layouts();
        let theme = CountingTheme::new(Some("dark"));
        let shutdowns = Arc::new(AtomicUsize::new(0));
        let mut host = RecordingHost::default();

        let fatal = shell(dir.path(), unreachable(), theme.clone(), shutdowns.clone())
            .launch(&mut host)
            .await
            .unwrap_err();

        assert_eq!(fatal.state, ShellState::DbFailed);
        assert!(fatal.state.is_terminal());
        assert!(matches!(fatal.error, StartupError::Connectivity(_)));
        assert_eq!(fatal.diagnostic.title, "Database Connection Failed");
        assert_eq!(fatal.exit_status().code(), 1);

        assert!(host.shown.is_empty());
        assert_eq!(theme.calls(), 0);
        assert_eq!(shutdowns.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_probe_timeout_uses_db_diagnostic() {
        let dir = layouts();
        let probe = FixedProbe(ConnectionStatus::failed(
            ProbeFailureKind::Timeout,
            "no response within 10s",
        ));
        let mut host = RecordingHost::default();

        let fatal = shell(dir.path(), probe, CountingTheme::new(None), Arc::default())
            .launch(&mut host)
            .await
            .unwrap_err();

        assert_eq!(fatal.diagnostic.title, "Database Connection Failed");
        assert!(fatal.diagnostic.message.contains("timed out"));
    }

    #[tokio::test]
    async fn test_missing_layout_is_application_error() {
        let dir = tempfile::tempdir().unwrap();
        let theme = CountingTheme::new(Some("dark"));
        let mut host = RecordingHost::default();

        let fatal = shell(
            dir.path(),
            FixedProbe(ConnectionStatus::Connected),
            theme.clone(),
            Arc::default(),
        )
        .launch(&mut host)
        .await
        .unwrap_err();

        assert_eq!(fatal.state, ShellState::Loading);
        assert!(matches!(fatal.error, StartupError::Load(LoadError::NotFound(_))));
        assert_eq!(fatal.diagnostic.title, "Application Error");
        assert!(fatal
            .diagnostic
            .message
            .starts_with("Failed to start application: Layout not found"));
        assert_eq!(fatal.exit_status(), ExitStatus::Failure);

        assert!(host.shown.is_empty());
        assert_eq!(theme.calls(), 0);
    }

    #[tokio::test]
    async fn test_layout_missing_required_nodes_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("main-layout.json"),
            r#"{ "controller": "main", "root": { "kind": "pane", "id": "searchField" } }"#,
        )
        .unwrap();
        let mut host = RecordingHost::default();

        let fatal = shell(
            dir.path(),
            FixedProbe(ConnectionStatus::Connected),
            CountingTheme::new(None),
            Arc::default(),
        )
        .launch(&mut host)
        .await
        .unwrap_err();

        assert!(matches!(
            fatal.error,
            StartupError::Load(LoadError::Controller { .. })
        ));
        assert!(fatal.diagnostic.message.contains("productTable"));
    }

    #[tokio::test]
    async fn test_dark_theme_window() {
        let dir = layouts();
        let theme = CountingTheme::new(Some("dark"));
        let mut host = RecordingHost::default();

        let running = shell(
            dir.path(),
            FixedProbe(ConnectionStatus::Connected),
            theme.clone(),
            Arc::default(),
        )
        .launch(&mut host)
        .await
        .unwrap();

        assert_eq!(running.state(), ShellState::Showing);
        assert_eq!(running.theme(), Theme::Dark);
        assert_eq!(running.view().theme(), Some("dark"));
        assert!(running.view().root.has_class("theme-dark"));
        assert_eq!(theme.calls(), 1);

        assert_eq!(host.shown.len(), 1);
        let (window, view, has_icon) = &host.shown[0];
        assert_eq!(window.title, "STOP B4U SHOP - Product Comparison Analyzer");
        assert_eq!((window.width, window.height), (1400, 900));
        assert_eq!((window.min_width, window.min_height), (1200, 700));
        assert!(window.theme.is_dark());
        assert_eq!(view, running.view());
        assert!(!has_icon);
    }

    #[tokio::test]
    async fn test_absent_theme_gets_default_styling() {
        let dir = layouts();
        let mut host = RecordingHost::default();

        let running = shell(
            dir.path(),
            FixedProbe(ConnectionStatus::Connected),
            CountingTheme::new(None),
            Arc::default(),
        )
        .launch(&mut host)
        .await
        .unwrap();

        assert_eq!(running.theme(), Theme::Light);
        assert!(running.view().root.has_class("theme-light"));
    }

    #[tokio::test]
    async fn test_missing_icon_is_not_fatal() {
        let dir = layouts();
        let mut host = RecordingHost::default();

        let running = shell(
            dir.path(),
            FixedProbe(ConnectionStatus::Connected),
            CountingTheme::new(None),
            Arc::default(),
        )
        .with_icon(Some(dir.path().join("icon.png")))
        .launch(&mut host)
        .await;

        assert!(running.is_ok());
        assert!(!host.shown[0].2);
    }

    #[tokio::test]
    async fn test_probe_panic_is_unhandled() {
        let dir = layouts();
        let mut host = RecordingHost::default();

        let fatal = shell(dir.path(), PanickingProbe, CountingTheme::new(None), Arc::default())
            .launch(&mut host)
            .await
            .unwrap_err();

        assert_eq!(fatal.state, ShellState::ProbingDb);
        assert!(matches!(fatal.error, StartupError::Unhandled(ref m) if m == "driver exploded"));
        assert_eq!(
            fatal.diagnostic.message,
            "Failed to start application: driver exploded"
        );
        assert!(host.shown.is_empty());
    }

    #[tokio::test]
    async fn test_window_failure_is_unhandled() {
        let dir = layouts();
        let shutdowns = Arc::new(AtomicUsize::new(0));
        let mut host = RecordingHost {
            refuse: true,
            ..Default::default()
        };

        let fatal = shell(
            dir.path(),
            FixedProbe(ConnectionStatus::Connected),
            CountingTheme::new(None),
            shutdowns.clone(),
        )
        .launch(&mut host)
        .await
        .unwrap_err();

        assert_eq!(fatal.state, ShellState::Theming);
        assert_eq!(fatal.diagnostic.title, "Application Error");
        assert_eq!(shutdowns.load(Ordering::SeqCst), 0);
    }

    // -------------------------------------------------------------------------
    // Shutdown
    // -------------------------------------------------------------------------

    async fn running_with(behaviour: fn() -> Shutdown) -> (Running, Arc<AtomicUsize>) {
        let dir = layouts();
        let shutdowns = Arc::new(AtomicUsize::new(0));
        let loader = ViewLoader::new(dir.path(), registry(shutdowns.clone(), behaviour));
        let running = Shell::new(
            FixedProbe(ConnectionStatus::Connected),
            CountingTheme::new(None),
            loader,
        )
        .launch(&mut RecordingHost::default())
        .await
        .unwrap();
        (running, shutdowns)
    }

    #[tokio::test]
    async fn test_close_shuts_down_exactly_once() {
        let (running, shutdowns) = running_with(|| Shutdown::Ok).await;
        assert_eq!(shutdowns.load(Ordering::SeqCst), 0);

        let status = running.close().await;
        assert_eq!(status, ExitStatus::Success);
        assert_eq!(status.code(), 0);
        assert_eq!(shutdowns.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_failed_shutdown_still_exits_cleanly() {
        let (running, shutdowns) = running_with(|| Shutdown::Fail).await;
        assert_eq!(running.close().await, ExitStatus::Success);
        assert_eq!(shutdowns.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_panicking_shutdown_still_exits_cleanly() {
        let (running, shutdowns) = running_with(|| Shutdown::Panic).await;
        assert_eq!(running.close().await, ExitStatus::Success);
        assert_eq!(shutdowns.load(Ordering::SeqCst), 1);
    }

    // -------------------------------------------------------------------------
    // End to end over a real store
    // -------------------------------------------------------------------------

    #[tokio::test]
    async fn test_main_controller_over_sqlite() {
        let dir = layouts();
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let beans = db
            .products()
            .insert_product("Espresso Beans 1kg", None, None)
            .await
            .unwrap();

        let catalog = db.clone();
        let loader = ViewLoader::new(
            dir.path(),
            ControllerRegistry::new().with(MAIN_CONTROLLER, move || {
                let controller: Arc<dyn Controller> =
                    Arc::new(MainController::new(Arc::new(catalog.clone())));
                Ok(controller)
            }),
        );

        let probe = SqlProbe::new(DbConfig::in_memory());
        let running = Shell::new(probe, CountingTheme::new(Some("dark")), loader)
            .launch(&mut RecordingHost::default())
            .await
            .unwrap();

        let main = running.controller_as::<MainController>().unwrap();
        let hits = main.search("espresso").await.unwrap();
        assert_eq!(hits, vec![beans]);

        assert_eq!(running.close().await, ExitStatus::Success);
        assert!(main.is_shut_down());
        assert!(db.is_closed());
    }

    #[tokio::test]
    async fn test_fresh_database_is_usable_after_launch() {
        let dir = layouts();
        let url = format!("sqlite://{}?mode=rwc", dir.path().join("fresh.db").display());
        let config = DbConfig::new(url);

        let pool_config = config.clone();
        let loader = ViewLoader::new(
            dir.path(),
            ControllerRegistry::new().with(MAIN_CONTROLLER, move || {
                let db = Database::connect_lazy(&pool_config)?;
                let controller: Arc<dyn Controller> = Arc::new(MainController::new(Arc::new(db)));
                Ok(controller)
            }),
        );

        let running = Shell::new(SqlProbe::new(config), CountingTheme::new(None), loader)
            .launch(&mut RecordingHost::default())
            .await
            .unwrap();

        let main = running.controller_as::<MainController>().unwrap();
        assert!(main.search("").await.unwrap().is_empty());
        assert!(matches!(
            main.compare("missing").await,
            Err(ControllerError::UnknownProduct(_))
        ));

        assert_eq!(running.close().await, ExitStatus::Success);
    }
}
