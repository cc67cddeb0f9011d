//! # View Loader
//!
//! Resolves a layout reference to a file, parses it, and binds the
//! controller it names.
//!
//! ## Load Steps
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  "main-layout"                                                          │
//! │       │  resolve: <layout_dir>/main-layout.json                         │
//! │       ▼                                                                 │
//! │  read file          ──Err──► LoadError::NotFound / Read                 │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  LayoutDocument::parse ──Err──► LoadError::Malformed                    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  registry.create(doc.controller) ──Err──► UnknownController/Controller  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  controller.bind(&tree) ──Err──► LoadError::Controller                  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  LoadedView { view, controller }                                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};

use stopb4u_core::{LayoutDocument, ViewTree};

use crate::controller::Controller;
use crate::error::{ControllerError, LoadError};

/// Extension of layout files.
pub const LAYOUT_EXTENSION: &str = "json";

// =============================================================================
// Controller Registry
// =============================================================================

/// Builds a controller instance.
pub type ControllerFactory =
    Box<dyn Fn() -> Result<Arc<dyn Controller>, ControllerError> + Send + Sync>;

/// Controller names a layout may refer to.
#[derive(Default)]
pub struct ControllerRegistry {
    factories: HashMap<String, ControllerFactory>,
}

impl ControllerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `factory` under `name`, replacing any earlier one.
    pub fn register<F>(&mut self, name: impl Into<String>, factory: F)
    where
        F: Fn() -> Result<Arc<dyn Controller>, ControllerError> + Send + Sync + 'static,
    {
        self.factories.insert(name.into(), Box::new(factory));
    }

    /// Builder form of [`ControllerRegistry::register`].
    pub fn with<F>(mut self, name: impl Into<String>, factory: F) -> Self
    where
        F: Fn() -> Result<Arc<dyn Controller>, ControllerError> + Send + Sync + 'static,
    {
        self.register(name, factory);
        self
    }

    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    fn create(&self, name: &str) -> Result<Arc<dyn Controller>, LoadError> {
        let factory = self
            .factories
            .get(name)
            .ok_or_else(|| LoadError::UnknownController(name.to_string()))?;

        factory().map_err(|source| LoadError::Controller {
            name: name.to_string(),
            source,
        })
    }
}

impl std::fmt::Debug for ControllerRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut names: Vec<&String> = self.factories.keys().collect();
        names.sort();
        f.debug_struct("ControllerRegistry")
            .field("controllers", &names)
            .finish()
    }
}

// =============================================================================
// View Loader
// =============================================================================

/// A parsed view and its bound controller.
pub struct LoadedView {
    pub view: ViewTree,
    pub controller: Arc<dyn Controller>,
}

/// Loads layouts from a directory.
#[derive(Debug)]
pub struct ViewLoader {
    layout_dir: PathBuf,
    registry: ControllerRegistry,
}

impl ViewLoader {
    pub fn new(layout_dir: impl Into<PathBuf>, registry: ControllerRegistry) -> Self {
        ViewLoader {
            layout_dir: layout_dir.into(),
            registry,
        }
    }

    pub fn layout_dir(&self) -> &Path {
        &self.layout_dir
    }

    /// Maps a layout name to its file.
    ///
    /// Names are bare: no separators, no `..`, no extension.
    pub fn resolve(&self, layout: &str) -> Result<PathBuf, LoadError> {
        let bare = !layout.is_empty()
            && layout != "."
            && layout != ".."
            && !layout.contains(['/', '\\'])
            && Path::new(layout).extension().is_none();

        if !bare {
            return Err(LoadError::InvalidReference(layout.to_string()));
        }

        Ok(self
            .layout_dir
            .join(format!("{}.{}", layout, LAYOUT_EXTENSION)))
    }

    /// Parses `layout` and binds its controller.
    pub fn load(&self, layout: &str) -> Result<LoadedView, LoadError> {
        let path = self.resolve(layout)?;
        debug!(path = %path.display(), "Loading layout");

        let source = std::fs::read_to_string(&path).map_err(|source| {
            if source.kind() == std::io::ErrorKind::NotFound {
                LoadError::NotFound(path.clone())
            } else {
                LoadError::Read {
                    path: path.clone(),
                    source,
                }
            }
        })?;

        let view = LayoutDocument::parse(&source)
            .map_err(|source| LoadError::Malformed {
                layout: layout.to_string(),
                source,
            })?
            .into_tree();

        let controller = self.registry.create(&view.controller)?;
        controller
            .bind(&view)
            .map_err(|source| LoadError::Controller {
                name: view.controller.clone(),
                source,
            })?;

        info!(
            layout = %layout,
            controller = %view.controller,
            nodes = view.node_count(),
            "Layout loaded"
        );
        Ok(LoadedView { view, controller })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
