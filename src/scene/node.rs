use crate::scene::transform::Transform;
use crate::scene::{MaterialKey, NodeKey};

/// A scene node: name, hierarchy links, transform and optional components.
///
/// Nodes form a tree through parent-child relationships. Only per-frame hot
/// data lives on the node itself; heavier components (materials) are stored
/// in the [`Scene`](crate::scene::Scene)'s component pools and referenced by
/// key.
///
/// The `name` is what animation curve bindings resolve against: a binding's
/// relative path is a `/`-separated list of node names walked down from the
/// animated root.
#[derive(Debug, Clone)]
pub struct Node {
    // === Core Hierarchy ===
    pub(crate) parent: Option<NodeKey>,
    pub(crate) children: Vec<NodeKey>,

    /// Node name, used for path lookup. Not required to be unique globally,
    /// only among siblings for unambiguous resolution.
    pub name: String,

    // === Core Spatial Data ===
    pub transform: Transform,

    // === Components ===
    /// Material component driven by color / texture curves, if any.
    pub material: Option<MaterialKey>,

    /// Visibility flag for culling.
    pub visible: bool,
}

impl Node {
    #[must_use]
    pub fn new() -> Self {
        Self {
            parent: None,
            children: Vec::new(),
            name: String::new(),
            transform: Transform::new(),
            material: None,
            visible: true,
        }
    }

    #[must_use]
    pub fn with_name(name: impl Into<String>) -> Self {
        let mut node = Self::new();
        node.name = name.into();
        node
    }

    /// Returns the parent node key, if any.
    #[inline]
    #[must_use]
    pub fn parent(&self) -> Option<NodeKey> {
        self.parent
    }

    /// Returns a read-only slice of child node keys.
    #[inline]
    #[must_use]
    pub fn children(&self) -> &[NodeKey] {
        &self.children
    }
}

impl Default for Node {
    fn default() -> Self {
        Self::new()
    }
}
