//! Arena-backed view tree used while risk is being annotated.
//!
//! Nodes are addressed by [`NodeId`] and hold their parent as an index, so
//! the upward walk needs no shared ownership. Ids are allocated in pre-order,
//! which means every ancestor has a smaller id than its descendants.

use crate::models::ViewTreeNode;

/// Index of a node inside a [`ViewTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

#[derive(Debug, Clone)]
pub(crate) struct ArenaNode {
    pub(crate) name: String,
    pub(crate) children: Vec<NodeId>,
    pub(crate) parent: Option<NodeId>,
    pub(crate) risk: f64,
    pub(crate) direct_risk: f64,
}

/// Materialized dependency tree with mutable risk accumulators.
#[derive(Debug, Clone)]
pub struct ViewTree {
    pub(crate) nodes: Vec<ArenaNode>,
}

impl ViewTree {
    pub const ROOT: NodeId = NodeId(0);

    pub(crate) fn with_root(name: String) -> Self {
        let mut tree = Self { nodes: Vec::new() };
        tree.push_node(name, None);
        tree
    }

    /// Append a node under `parent` and return its id.
    pub(crate) fn push_node(&mut self, name: String, parent: Option<NodeId>) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(ArenaNode {
            name,
            children: Vec::new(),
            parent,
            risk: 0.0,
            direct_risk: 0.0,
        });
        if let Some(parent) = parent {
            self.nodes[parent.0].children.push(id);
        }
        id
    }

    pub fn root(&self) -> NodeId {
        Self::ROOT
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Every constructor allocates the root, so this is false for any tree
    /// built by this crate.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn name(&self, id: NodeId) -> &str {
        &self.nodes[id.0].name
    }

    /// Aggregate risk: direct risk plus everything propagated from descendants.
    pub fn risk(&self, id: NodeId) -> f64 {
        self.nodes[id.0].risk
    }

    /// Risk from vulnerabilities matching this node's own name only.
    pub fn direct_risk(&self, id: NodeId) -> f64 {
        self.nodes[id.0].direct_risk
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].parent
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.0].children
    }

    /// All node ids in pre-order.
    pub fn ids(&self) -> impl Iterator<Item = NodeId> {
        (0..self.nodes.len()).map(NodeId)
    }

    /// Ancestors of `id`, nearest first.
    pub fn ancestors(&self, id: NodeId) -> Ancestors<'_> {
        Ancestors {
            tree: self,
            next: self.parent(id),
        }
    }

    /// First node in pre-order with the given name.
    pub fn find(&self, name: &str) -> Option<NodeId> {
        self.ids().find(|&id| self.name(id) == name)
    }

    /// Detach into a plain owned tree. The result carries no parent links.
    pub fn into_view(self) -> ViewTreeNode {
        let mut nodes = self.nodes;
        // The arena always holds the root at index 0.
        let root = nodes.remove(0);

        // Descendants have larger ids than their parents, so a reverse sweep
        // builds every child before the node that owns it.
        let mut built: Vec<Option<ViewTreeNode>> = Vec::with_capacity(nodes.len());
        built.resize_with(nodes.len(), || None);
        for (offset, node) in nodes.into_iter().enumerate().rev() {
            let children = take_children(&mut built, &node.children);
            built[offset] = Some(ViewTreeNode {
                name: node.name,
                children,
                risk: node.risk,
            });
        }

        let children = take_children(&mut built, &root.children);
        ViewTreeNode {
            name: root.name,
            children,
            risk: root.risk,
        }
    }
}

fn take_children(built: &mut [Option<ViewTreeNode>], ids: &[NodeId]) -> Vec<ViewTreeNode> {
    ids.iter()
        .filter_map(|id| built[id.0 - 1].take())
        .collect()
}

/// Iterator over the ancestor chain of a node.
pub struct Ancestors<'a> {
    tree: &'a ViewTree,
    next: Option<NodeId>,
}

impl Iterator for Ancestors<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let current = self.next?;
        self.next = self.tree.parent(current);
        Some(current)
    }
}
