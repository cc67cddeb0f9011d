//! # Lifecycle State
//!
//! Holds the running application between `Shell::launch` and window
//! close.

use std::sync::{Arc, Mutex, MutexGuard};
use tracing::debug;

use stopb4u_core::ViewTree;
use stopb4u_shell::{MainController, Running};

/// The running shell, once startup has reached `Showing`.
///
/// Managed empty before launch so commands invoked by an early webview
/// get an error rather than a missing-state panic.
#[derive(Default)]
pub struct LifecycleState {
    running: Mutex<Option<Running>>,
}

impl LifecycleState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores the running application.
    pub fn install(&self, running: Running) {
        debug!(state = %running.state(), "Lifecycle installed");
        *self.lock() = Some(running);
    }

    /// Removes the running application for shutdown. Returns `None` on
    /// every call after the first.
    pub fn take(&self) -> Option<Running> {
        self.lock().take()
    }

    pub fn is_running(&self) -> bool {
        self.lock().is_some()
    }

    /// The themed view, if the window is up.
    pub fn view(&self) -> Option<ViewTree> {
        self.lock().as_ref().map(|running| running.view().clone())
    }

    /// The main controller, if the window is up.
    pub fn controller(&self) -> Option<Arc<MainController>> {
        self.lock()
            .as_ref()
            .and_then(|running| running.controller_as::<MainController>())
    }

    fn lock(&self) -> MutexGuard<'_, Option<Running>> {
        self.running
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
