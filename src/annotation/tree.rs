use std::collections::HashMap;

use crate::annotation::types::{Node, NodeId, Tree};

impl Tree {
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id]
    }

    pub fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id]
    }

    pub fn is_leaf(&self, id: NodeId) -> bool {
        self.nodes[id].children.is_empty()
    }

    /// Node ids in pre-order: a node before its children, children in
    /// stored order. This order is a contract, not an accident: the
    /// name index, ambiguity tie-breaks and the report all observe it,
    /// and gap filling relies on parents preceding children.
    pub fn preorder(&self) -> Vec<NodeId> {
        let mut order = Vec::with_capacity(self.nodes.len());
        let mut stack = vec![self.root];
        while let Some(id) = stack.pop() {
            order.push(id);
            for &child in self.nodes[id].children.iter().rev() {
                stack.push(child);
            }
        }
        order
    }

    /// Build the name index: trimmed non-empty label to the nodes
    /// carrying it, in pre-order discovery order. Lookups that need
    /// determinism iterate the per-name vectors, never the map.
    pub fn index_by_name(&self) -> HashMap<String, Vec<NodeId>> {
        let mut index: HashMap<String, Vec<NodeId>> = HashMap::new();
        for id in self.preorder() {
            let label = self.nodes[id].label.trim();
            if !label.is_empty() {
                index.entry(label.to_string()).or_default().push(id);
            }
        }
        index
    }

    /// Resolve a mapping-table name to a node. The literal `root`
    /// (ASCII case-insensitive) always means the tree root, whatever
    /// its actual label. Ambiguous names resolve to the first
    /// discovered node and warn on stderr.
    pub fn resolve(&self, name: &str, index: &HashMap<String, Vec<NodeId>>) -> Option<NodeId> {
        if name.eq_ignore_ascii_case("root") {
            return Some(self.root);
        }
        let ids = index.get(name)?;
        if ids.len() > 1 {
            eprintln!(
                "[warn] Multiple nodes named '{}'. Using the first encountered.",
                name
            );
        }
        ids.first().copied()
    }

    /// Nodes on the path from `ancestor` down to `descendant`, ancestor
    /// excluded, descendant included. Walks parent links upward from
    /// `descendant`; when the walk reaches the root without meeting
    /// `ancestor` (and the two differ) the result is empty, which
    /// callers must treat as "not a descendant", not as an empty work
    /// list.
    pub fn path_between(&self, ancestor: NodeId, descendant: NodeId) -> Vec<NodeId> {
        let mut path = Vec::new();
        let mut current = descendant;
        while current != ancestor {
            path.push(current);
            match self.nodes[current].parent {
                Some(parent) => current = parent,
                None => return Vec::new(),
            }
        }
        path.reverse();
        path
    }
}
