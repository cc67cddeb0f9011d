//! # Config Commands

use tauri::State;
use tracing::debug;

use crate::state::{ConfigState, SettingsView};

/// Settings in effect, with credentials removed.
#[tauri::command]
pub fn get_settings(config: State<'_, ConfigState>) -> SettingsView {
    debug!("get_settings command");
    config.view()
}
