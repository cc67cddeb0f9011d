//! # View Tree
//!
//! In-memory representation of the window's component hierarchy, and the
//! declarative layout document it is parsed from.
//!
//! ## Layout Document
//! ```json
//! {
//!   "controller": "main",
//!   "root": {
//!     "kind": "column",
//!     "id": "root",
//!     "children": [
//!       { "kind": "text_field", "id": "searchField", "text": "Search products" },
//!       { "kind": "table", "id": "productTable", "columns": ["Name", "Brand"] }
//!     ]
//!   }
//! }
//! ```
//!
//! ## Lifecycle
//! ```text
//! main-layout.json ──► LayoutDocument::parse ──► into_tree ──► ViewTree
//!                                                                 │
//!                            apply_theme (theme.rs) ◄─────────────┘
//!                                    │
//!                                    ▼
//!                     serialized to the frontend (get_view)
//! ```

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use ts_rs::TS;

use crate::error::LayoutError;

// =============================================================================
// Nodes
// =============================================================================

/// The kinds of component a layout may use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum NodeKind {
    /// Generic container.
    Pane,
    /// Horizontal container.
    Row,
    /// Vertical container.
    Column,
    /// Titled container.
    Panel,
    Label,
    Button,
    TextField,
    Table,
    Separator,
}

impl NodeKind {
    /// Containers are the only kinds that may have children.
    pub fn is_container(&self) -> bool {
        matches!(
            self,
            NodeKind::Pane | NodeKind::Row | NodeKind::Column | NodeKind::Panel
        )
    }
}

/// One component in the view tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ViewNode {
    pub kind: NodeKind,

    /// Identifier the controller binds to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub id: Option<String>,

    /// Label, button caption or placeholder.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub text: Option<String>,

    /// Style classes ("primary", "theme-dark").
    #[serde(default)]
    pub classes: Vec<String>,

    /// Presentation attributes, CSS property → value.
    #[serde(default)]
    pub style: BTreeMap<String, String>,

    /// Column headers (tables only; empty elsewhere).
    #[serde(default)]
    pub columns: Vec<String>,

    #[serde(default)]
    pub children: Vec<ViewNode>,
}

impl ViewNode {
    /// Creates an empty node of the given kind.
    pub fn new(kind: NodeKind) -> Self {
        ViewNode {
            kind,
            id: None,
            text: None,
            classes: Vec::new(),
            style: BTreeMap::new(),
            columns: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Builder: sets the id.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Builder: sets the text.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Builder: appends a child.
    pub fn with_child(mut self, child: ViewNode) -> Self {
        self.children.push(child);
        self
    }

    /// Returns true if the node carries the class.
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    /// Depth-first search by id.
    pub fn find(&self, id: &str) -> Option<&ViewNode> {
        if self.id.as_deref() == Some(id) {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find(id))
    }

    /// Visits this node and every descendant, parents first.
    pub fn visit_mut<F>(&mut self, f: &mut F)
    where
        F: FnMut(&mut ViewNode),
    {
        f(self);
        for child in &mut self.children {
            child.visit_mut(f);
        }
    }

    /// Visits this node and every descendant, parents first.
    pub fn visit<F>(&self, f: &mut F)
    where
        F: FnMut(&ViewNode),
    {
        f(self);
        for child in &self.children {
            child.visit(f);
        }
    }
}

// =============================================================================
// Tree
// =============================================================================

/// A parsed, possibly styled, window tree.
///
/// Exactly one exists per process; the shell owns it from load until exit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ViewTree {
    /// Controller binding name from the layout.
    pub controller: String,

    /// Theme currently applied, if any.
    pub theme: Option<String>,

    pub root: ViewNode,
}

impl ViewTree {
    /// Returns the applied theme name.
    pub fn theme(&self) -> Option<&str> {
        self.theme.as_deref()
    }

    /// Finds a node anywhere in the tree.
    pub fn find(&self, id: &str) -> Option<&ViewNode> {
        self.root.find(id)
    }

    /// Returns true if a node with this id exists.
    pub fn contains(&self, id: &str) -> bool {
        self.find(id).is_some()
    }

    /// Total number of nodes.
    pub fn node_count(&self) -> usize {
        let mut count = 0;
        self.root.visit(&mut |_| count += 1);
        count
    }

    /// Returns the ids of `required` that are absent from the tree.
    ///
    /// ## Usage
    /// Controllers call this at bind time:
    /// ```rust
    /// # use stopb4u_core::view::{NodeKind, ViewNode, ViewTree};
    /// let tree = ViewTree {
    ///     controller: "main".into(),
    ///     theme: None,
    ///     root: ViewNode::new(NodeKind::Pane).with_id("root"),
    /// };
    /// assert_eq!(tree.missing_ids(&["root", "productTable"]), vec!["productTable"]);
    /// ```
    pub fn missing_ids<'a>(&self, required: &[&'a str]) -> Vec<&'a str> {
        required
            .iter()
            .copied()
            .filter(|id| !self.contains(id))
            .collect()
    }
}

// =============================================================================
// Layout Document
// =============================================================================

/// The declarative description a [`ViewTree`] is built from.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LayoutDocument {
    /// Name of the controller to bind.
    pub controller: String,

    pub root: ViewNode,
}

impl LayoutDocument {
    /// Parses and validates a JSON layout.
    ///
    /// ## Validation
    /// - Must be well-formed JSON matching the schema
    /// - `controller` must be non-empty
    /// - Node ids must be unique
    /// - Only containers may have children
    pub fn parse(source: &str) -> Result<Self, LayoutError> {
        let doc: LayoutDocument = serde_json::from_str(source)?;

        if doc.controller.trim().is_empty() {
            return Err(LayoutError::MissingController);
        }

        let mut seen = HashSet::new();
        let mut problem = None;
        doc.root.visit(&mut |node| {
            if problem.is_some() {
                return;
            }
            if !node.kind.is_container() && !node.children.is_empty() {
                problem = Some(LayoutError::Malformed(format!(
                    "{:?} node cannot have children",
                    node.kind
                )));
                return;
            }
            if let Some(id) = &node.id {
                if !seen.insert(id.clone()) {
                    problem = Some(LayoutError::DuplicateId(id.clone()));
                }
            }
        });

        match problem {
            Some(err) => Err(err),
            None => Ok(doc),
        }
    }

    /// Converts into an unstyled tree.
    pub fn into_tree(self) -> ViewTree {
        ViewTree {
            controller: self.controller,
            theme: None,
            root: self.root,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const LAYOUT: &str = r#"{
        "controller": "main",
        "root": {
            "kind": "column",
            "id": "root",
            "children": [
                { "kind": "text_field", "id": "searchField", "text": "Search" },
                { "kind": "row", "children": [
                    { "kind": "button", "id": "searchButton", "text": "Go", "classes": ["primary"] }
                ]},
                { "kind": "table", "id": "productTable", "columns": ["Name", "Brand"] }
            ]
        }
    }"#;

    #[test]
    fn test_parse_layout() {
        let doc = LayoutDocument::parse(LAYOUT).unwrap();
        assert_eq!(doc.controller, "main");

        let tree = doc.into_tree();
        assert_eq!(tree.theme(), None);
        assert_eq!(tree.node_count(), 5);

        let button = tree.find("searchButton").unwrap();
        assert_eq!(button.kind, NodeKind::Button);
        assert!(button.has_class("primary"));

        let table = tree.find("productTable").unwrap();
        assert_eq!(table.columns, vec!["Name", "Brand"]);
    }

    #[test]
    fn test_malformed_json() {
        let err = LayoutDocument::parse("{ not json").unwrap_err();
        assert!(matches!(err, LayoutError::Malformed(_)));
    }

    #[test]
    fn test_unknown_kind_rejected() {
        let err = LayoutDocument::parse(
            r#"{ "controller": "main", "root": { "kind": "carousel" } }"#,
        )
        .unwrap_err();
        assert!(matches!(err, LayoutError::Malformed(_)));
    }

    #[test]
    fn test_missing_controller() {
        let err =
            LayoutDocument::parse(r#"{ "controller": " ", "root": { "kind": "pane" } }"#)
                .unwrap_err();
        assert!(matches!(err, LayoutError::MissingController));
    }

    #[test]
    fn test_duplicate_ids() {
        let err = LayoutDocument::parse(
            r#"{ "controller": "main", "root": { "kind": "pane", "id": "a", "children": [
                { "kind": "label", "id": "a" }
            ]}}"#,
        )
        .unwrap_err();
        assert!(matches!(err, LayoutError::DuplicateId(ref id) if id == "a"));
    }

    #[test]
    fn test_leaf_with_children_rejected() {
        let err = LayoutDocument::parse(
            r#"{ "controller": "main", "root": { "kind": "label", "children": [
                { "kind": "label" }
            ]}}"#,
        )
        .unwrap_err();
        assert!(matches!(err, LayoutError::Malformed(_)));
    }

    #[test]
    fn test_missing_ids() {
        let tree = LayoutDocument::parse(LAYOUT).unwrap().into_tree();
        assert!(tree.missing_ids(&["searchField", "productTable"]).is_empty());
        assert_eq!(
            tree.missing_ids(&["searchField", "comparisonPanel"]),
            vec!["comparisonPanel"]
        );
    }

    #[test]
    fn test_builder() {
        let node = ViewNode::new(NodeKind::Panel)
            .with_id("comparisonPanel")
            .with_text("Compare")
            .with_child(ViewNode::new(NodeKind::Label));
        assert_eq!(node.children.len(), 1);
        assert_eq!(node.find("comparisonPanel").unwrap().text.as_deref(), Some("Compare"));
    }

    #[test]
    fn test_bindings_match_serialized_shape() {
        let decl = ViewNode::decl();
        assert!(decl.contains("id?: string"), "{decl}");
        assert!(decl.contains("text?: string"), "{decl}");
        assert!(decl.contains("columns: Array<string>"), "{decl}");

        let json = serde_json::to_value(ViewNode::new(NodeKind::Pane)).unwrap();
        let node = json.as_object().unwrap();
        assert!(!node.contains_key("id"));
        assert!(!node.contains_key("text"));
        assert_eq!(json["columns"], serde_json::json!([]));
    }
}
