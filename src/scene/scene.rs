use slotmap::SlotMap;

use crate::scene::material::Material;
use crate::scene::node::Node;
use crate::scene::{MaterialKey, NodeKey};

/// Scene graph container.
///
/// Pure data layer: stores the node hierarchy plus component pools. The
/// animation core resolves curve bindings against it and writes sampled
/// values back into node transforms and materials each frame.
pub struct Scene {
    pub nodes: SlotMap<NodeKey, Node>,
    pub root_nodes: Vec<NodeKey>,

    // ==== Component pools ====
    pub materials: SlotMap<MaterialKey, Material>,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene {
    #[must_use]
    pub fn new() -> Self {
        Self {
            nodes: SlotMap::with_key(),
            root_nodes: Vec::new(),
            materials: SlotMap::with_key(),
        }
    }

    // ========================================================================
    // Node management
    // ========================================================================

    /// Adds a node to the scene as a root node.
    pub fn add_node(&mut self, node: Node) -> NodeKey {
        let key = self.nodes.insert(node);
        self.root_nodes.push(key);
        key
    }

    /// Creates an empty root node with the given name.
    pub fn create_node(&mut self, name: &str) -> NodeKey {
        self.add_node(Node::with_name(name))
    }

    /// Creates a node with the given name attached under `parent`.
    pub fn create_child(&mut self, parent: NodeKey, name: &str) -> NodeKey {
        let key = self.nodes.insert(Node::with_name(name));
        if let Some(p) = self.nodes.get_mut(parent) {
            p.children.push(key);
        }
        if let Some(c) = self.nodes.get_mut(key) {
            c.parent = Some(parent);
        }
        key
    }

    /// Re-parents `child` under `parent`, keeping both sides of the link in
    /// sync. A root node is removed from the root list.
    pub fn attach(&mut self, child: NodeKey, parent: NodeKey) {
        if !self.nodes.contains_key(child) || !self.nodes.contains_key(parent) {
            return;
        }
        self.detach_from_parent(child);
        self.root_nodes.retain(|&k| k != child);

        if let Some(p) = self.nodes.get_mut(parent) {
            p.children.push(child);
        }
        if let Some(c) = self.nodes.get_mut(child) {
            c.parent = Some(parent);
        }
    }

    /// Removes a node and its whole subtree.
    pub fn remove_node(&mut self, key: NodeKey) {
        self.detach_from_parent(key);
        self.root_nodes.retain(|&k| k != key);
        self.remove_subtree(key);
    }

    fn remove_subtree(&mut self, key: NodeKey) {
        let Some(node) = self.nodes.remove(key) else {
            return;
        };
        for child in node.children {
            self.remove_subtree(child);
        }
    }

    fn detach_from_parent(&mut self, key: NodeKey) {
        let parent = self.nodes.get(key).and_then(Node::parent);
        if let Some(parent) = parent
            && let Some(p) = self.nodes.get_mut(parent)
        {
            p.children.retain(|&k| k != key);
        }
        if let Some(node) = self.nodes.get_mut(key) {
            node.parent = None;
        }
    }

    #[inline]
    #[must_use]
    pub fn get_node(&self, key: NodeKey) -> Option<&Node> {
        self.nodes.get(key)
    }

    #[inline]
    pub fn get_node_mut(&mut self, key: NodeKey) -> Option<&mut Node> {
        self.nodes.get_mut(key)
    }

    // ========================================================================
    // Path lookup
    // ========================================================================

    /// Resolves a `/`-separated relative name path against `root`.
    ///
    /// An empty path resolves to `root` itself. Each segment selects the
    /// first child whose name matches; `None` if any segment fails.
    #[must_use]
    pub fn find_by_path(&self, root: NodeKey, path: &str) -> Option<NodeKey> {
        if path.is_empty() {
            return self.nodes.contains_key(root).then_some(root);
        }

        let mut current = root;
        for segment in path.split('/') {
            current = self.find_child_by_name(current, segment)?;
        }
        Some(current)
    }

    /// Finds a direct child of `parent` by name.
    #[must_use]
    pub fn find_child_by_name(&self, parent: NodeKey, name: &str) -> Option<NodeKey> {
        let node = self.nodes.get(parent)?;
        node.children
            .iter()
            .copied()
            .find(|&child| self.nodes.get(child).is_some_and(|c| c.name == name))
    }

    // ========================================================================
    // Materials
    // ========================================================================

    /// Adds a material to the pool and returns its key.
    pub fn add_material(&mut self, material: Material) -> MaterialKey {
        self.materials.insert(material)
    }

    /// Adds a material and assigns it to `node` in one step.
    pub fn assign_material(&mut self, node: NodeKey, material: Material) -> MaterialKey {
        let key = self.materials.insert(material);
        if let Some(n) = self.nodes.get_mut(node) {
            n.material = Some(key);
        }
        key
    }

    #[inline]
    #[must_use]
    pub fn get_material(&self, key: MaterialKey) -> Option<&Material> {
        self.materials.get(key)
    }

    #[inline]
    pub fn get_material_mut(&mut self, key: MaterialKey) -> Option<&mut Material> {
        self.materials.get_mut(key)
    }

    // ========================================================================
    // Transform update
    // ========================================================================

    /// Refreshes the cached local matrices of every node whose TRS changed
    /// this frame. Called by the engine after animation has been applied.
    pub fn update_local_matrices(&mut self) {
        for node in self.nodes.values_mut() {
            node.transform.update_local_matrix();
        }
    }
}
