//! # Fatal Diagnostics
//!
//! Blocking native message box for startup failures. Shown before any
//! window exists, so it cannot go through the webview.

use rfd::{MessageButtons, MessageDialog, MessageLevel};
use tracing::error;

use stopb4u_shell::Diagnostic;

/// Shows `diagnostic` as an error dialog and waits for the user to
/// dismiss it.
pub fn show_fatal(diagnostic: &Diagnostic) {
    error!(title = %diagnostic.title, message = %diagnostic.message, "Fatal startup error");

    MessageDialog::new()
        .set_level(MessageLevel::Error)
        .set_title(diagnostic.title.as_str())
        .set_description(diagnostic.message.as_str())
        .set_buttons(MessageButtons::Ok)
        .show();
}
