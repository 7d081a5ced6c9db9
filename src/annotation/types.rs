/// Index of a node in the [`Tree`] arena.
pub type NodeId = usize;

/// A single point in the tree, internal or leaf.
///
/// Nodes live in the [`Tree`] arena and reference each other by index.
/// `parent` is a non-owning back-reference used only for upward walks;
/// ownership follows the `children` direction, where every id appears
/// under exactly one parent.
#[derive(Debug, Clone)]
pub struct Node {
    pub label: String,
    /// Branch length to the parent. Absent is distinct from `0.0`;
    /// state propagation ignores lengths entirely.
    pub branch_length: Option<f64>,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
    /// Resolved host state. `None` until propagation assigns one.
    pub state: Option<String>,
    /// The parent's final resolved state, captured after gap filling.
    pub prev_state: Option<String>,
    /// True when a mapping row named this node as its ancestral anchor.
    pub change_point: bool,
    /// True when this node is a change point or any direct child
    /// resolved to a different state.
    pub state_change: bool,
}

impl Node {
    pub fn new(label: String, branch_length: Option<f64>) -> Self {
        Self {
            label,
            branch_length,
            parent: None,
            children: Vec::new(),
            state: None,
            prev_state: None,
            change_point: false,
            state_change: false,
        }
    }
}

/// A rooted tree stored as a flat arena. The root is created first
/// during parsing, so `root` is always index 0 in practice, but callers
/// go through the field rather than assuming that.
#[derive(Debug, Clone)]
pub struct Tree {
    pub nodes: Vec<Node>,
    pub root: NodeId,
}

/// One usable row of the mapping table, fields trimmed and non-empty.
/// Rows keep file order; order decides conflict precedence.
#[derive(Debug, Clone)]
pub struct MappingRow {
    pub ancestral: String,
    pub accession: String,
    pub host: String,
}
