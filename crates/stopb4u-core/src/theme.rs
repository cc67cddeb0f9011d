//! # Themes
//!
//! Theme identifiers, the built-in palettes, and the theme applier.
//!
//! ## How Styling Works
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        apply_theme(tree, id)                            │
//! │                                                                         │
//! │  ThemeId("Dark ") ──► Theme::resolve ──► Theme::Dark ──► Palette       │
//! │  ThemeId("neon")  ──► Theme::resolve ──► Theme::Light (fallback)       │
//! │                                                                         │
//! │  For every node:                                                        │
//! │    style[key] = palette value for (node.kind, node.classes)             │
//! │  Root only:                                                             │
//! │    classes: drop "theme-*", push "theme-<name>"                         │
//! │    tree.theme = Some("<name>")                                          │
//! │                                                                         │
//! │  Every key a theme writes is written by every theme, so re-applying     │
//! │  (same or different theme) fully overwrites the previous styling.       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::view::{NodeKind, ViewNode, ViewTree};

/// Prefix of the root class naming the applied theme.
const THEME_CLASS_PREFIX: &str = "theme-";

const FONT_STACK: &str = "\"Segoe UI\", \"Helvetica Neue\", Arial, sans-serif";

// =============================================================================
// Theme Identifier
// =============================================================================

/// Opaque name of a visual style, as stored in settings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ThemeId(String);

impl ThemeId {
    pub fn new(id: impl Into<String>) -> Self {
        ThemeId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for ThemeId {
    fn default() -> Self {
        Theme::default().id()
    }
}

impl fmt::Display for ThemeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// =============================================================================
// Built-in Themes
// =============================================================================

/// The themes this application ships.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    /// Every built-in theme.
    pub const ALL: [Theme; 2] = [Theme::Light, Theme::Dark];

    /// Maps a stored identifier to a theme, falling back to the default for
    /// anything unknown. Matching ignores case and surrounding whitespace.
    pub fn resolve(id: &ThemeId) -> Theme {
        let wanted = id.as_str().trim();
        Theme::ALL
            .into_iter()
            .find(|theme| theme.name().eq_ignore_ascii_case(wanted))
            .unwrap_or_default()
    }

    /// Canonical name.
    pub fn name(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    /// Canonical identifier.
    pub fn id(&self) -> ThemeId {
        ThemeId::new(self.name())
    }

    /// Whether the window chrome should be dark.
    pub fn is_dark(&self) -> bool {
        matches!(self, Theme::Dark)
    }

    /// Colours for this theme.
    pub fn palette(&self) -> Palette {
        match self {
            Theme::Light => Palette {
                background: "#f5f6f8",
                surface: "#ffffff",
                text: "#1f2328",
                muted_text: "#59636e",
                accent: "#1f6feb",
                accent_text: "#ffffff",
                border: "#d0d7de",
            },
            Theme::Dark => Palette {
                background: "#0d1117",
                surface: "#161b22",
                text: "#e6edf3",
                muted_text: "#8d96a0",
                accent: "#2f81f7",
                accent_text: "#ffffff",
                border: "#30363d",
            },
        }
    }
}

/// Colour slots a theme fills.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub background: &'static str,
    pub surface: &'static str,
    pub text: &'static str,
    pub muted_text: &'static str,
    pub accent: &'static str,
    pub accent_text: &'static str,
    pub border: &'static str,
}

// =============================================================================
// Theme Applier
// =============================================================================

/// Styles `tree` with the theme named by `id`.
///
/// Never fails: unknown ids get the default theme. Idempotent.
///
/// ## Example
/// ```rust
/// use stopb4u_core::theme::{apply_theme, ThemeId};
/// use stopb4u_core::view::{NodeKind, ViewNode, ViewTree};
///
/// let mut tree = ViewTree {
///     controller: "main".into(),
///     theme: None,
///     root: ViewNode::new(NodeKind::Pane),
/// };
///
/// let applied = apply_theme(&mut tree, &ThemeId::new("solarized"));
/// assert_eq!(applied.name(), "light");
/// assert!(tree.root.has_class("theme-light"));
/// ```
pub fn apply_theme(tree: &mut ViewTree, id: &ThemeId) -> Theme {
    let theme = Theme::resolve(id);
    let palette = theme.palette();

    tree.root.visit_mut(&mut |node| style_node(node, &palette));

    tree.root
        .classes
        .retain(|class| !class.starts_with(THEME_CLASS_PREFIX));
    tree.root
        .classes
        .push(format!("{}{}", THEME_CLASS_PREFIX, theme.name()));
    tree.root
        .style
        .insert("font-family".to_string(), FONT_STACK.to_string());
    tree.theme = Some(theme.name().to_string());

    theme
}

/// Writes the palette-derived properties for one node.
fn style_node(node: &mut ViewNode, palette: &Palette) {
    let (background, color, border) = match node.kind {
        NodeKind::Pane | NodeKind::Row | NodeKind::Column => {
            (palette.background, palette.text, "none".to_string())
        }
        NodeKind::Panel | NodeKind::TextField | NodeKind::Table => (
            palette.surface,
            palette.text,
            format!("1px solid {}", palette.border),
        ),
        NodeKind::Label => {
            let color = if node.has_class("muted") {
                palette.muted_text
            } else {
                palette.text
            };
            ("transparent", color, "none".to_string())
        }
        NodeKind::Button if node.has_class("secondary") => (
            palette.surface,
            palette.text,
            format!("1px solid {}", palette.border),
        ),
        NodeKind::Button => (
            palette.accent,
            palette.accent_text,
            format!("1px solid {}", palette.accent),
        ),
        NodeKind::Separator => (palette.border, palette.text, "none".to_string()),
    };

    node.style
        .insert("background-color".to_string(), background.to_string());
    node.style.insert("color".to_string(), color.to_string());
    node.style.insert("border".to_string(), border);
}

// =============================================================================
// Unit Tests
// =============================================================================
