//! # View Commands

use tauri::State;
use tracing::debug;

use stopb4u_core::ViewTree;

use crate::error::ApiError;
use crate::state::LifecycleState;

/// The themed main view, for rendering or re-rendering after a reload.
#[tauri::command]
pub fn get_view(lifecycle: State<'_, LifecycleState>) -> Result<ViewTree, ApiError> {
    debug!("get_view command");
    lifecycle
        .view()
        .ok_or_else(|| ApiError::unavailable("No view is loaded"))
}
