//! # Window Host
//!
//! Puts the main window on screen for `Shell::launch`.
//!
//! The themed view is handed to the webview twice: baked into an
//! initialization script so the first paint needs no IPC round trip, and
//! through the `get_view` command for reloads.

use tauri::image::Image;
use tauri::{AppHandle, WebviewUrl, WebviewWindowBuilder};
use tracing::{info, warn};

use stopb4u_core::{Theme, ViewTree};
use stopb4u_shell::{HostError, IconAsset, WindowHost, WindowSpec};

/// Label of the main window.
pub const MAIN_WINDOW: &str = "main";

/// Global the frontend reads the initial view from.
const VIEW_GLOBAL: &str = "__STOPB4U_VIEW__";

/// Builds Tauri webview windows.
pub struct TauriHost {
    handle: AppHandle,
}

impl TauriHost {
    pub fn new(handle: AppHandle) -> Self {
        TauriHost { handle }
    }
}

impl WindowHost for TauriHost {
    fn show(
        &mut self,
        window: &WindowSpec,
        view: &ViewTree,
        icon: Option<&IconAsset>,
    ) -> Result<(), HostError> {
        let script = bootstrap_script(view)?;

        let url = WebviewUrl::App("index.html".into());
        let mut builder = WebviewWindowBuilder::new(&self.handle, MAIN_WINDOW, url)
            .title(&window.title)
            .inner_size(window.width.into(), window.height.into())
            .min_inner_size(window.min_width.into(), window.min_height.into())
            .theme(Some(chrome_theme(window.theme)))
            .initialization_script(&script);

        if let Some(icon) = icon {
            match Image::from_bytes(&icon.bytes) {
                Ok(image) => builder = builder.icon(image)?,
                Err(e) => warn!(path = %icon.path.display(), error = %e, "Icon could not be decoded"),
            }
        }

        builder.build()?;
        info!(
            title = %window.title,
            width = window.width,
            height = window.height,
            theme = window.theme.name(),
            "Main window shown"
        );
        Ok(())
    }
}

fn chrome_theme(theme: Theme) -> tauri::Theme {
    if theme.is_dark() {
        tauri::Theme::Dark
    } else {
        tauri::Theme::Light
    }
}

/// Script that publishes `view` as a global before the page loads.
fn bootstrap_script(view: &ViewTree) -> Result<String, serde_json::Error> {
    let json = serde_json::to_string(view)?;
    Ok(format!("window.{} = {};", VIEW_GLOBAL, json))
}

#[cfg(test)]
mod tests {
    use super::*;
    use stopb4u_core::view::{NodeKind, ViewNode};

    #[test]
    fn test_bootstrap_script_embeds_view() {
        let view = ViewTree {
            controller: "main".into(),
            theme: Some("dark".into()),
            root: ViewNode::new(NodeKind::Pane).with_id("root"),
        };

        let script = bootstrap_script(&view).unwrap();
        assert!(script.starts_with("window.__STOPB4U_VIEW__ = {"));
        assert!(script.ends_with("};"));

        let json = &script["window.__STOPB4U_VIEW__ = ".len()..script.len() - 1];
        let parsed: ViewTree = serde_json::from_str(json).unwrap();
        assert_eq!(parsed, view);
    }

    #[test]
    fn test_chrome_theme() {
        assert_eq!(chrome_theme(Theme::Dark), tauri::Theme::Dark);
        assert_eq!(chrome_theme(Theme::Light), tauri::Theme::Light);
    }
}
