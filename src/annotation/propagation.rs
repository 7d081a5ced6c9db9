use std::collections::HashMap;

use crate::annotation::types::{MappingRow, NodeId, Tree};

/// Sentinel used when no mapping row anchors a state at the root. From
/// the moment it is assigned it behaves like any other state value: it
/// propagates downward and can be matched as a marking target.
pub const UNKNOWN_STATE: &str = "Unknown";

/// Run the five propagation passes in order. Given the same tree and
/// rows the result is identical across runs: counting is
/// insertion-ordered, rows apply in file order and both sweeps follow
/// the documented pre-order.
pub fn propagate(tree: &mut Tree, rows: &[MappingRow], index: &HashMap<String, Vec<NodeId>>) {
    let root_label = tree.node(tree.root).label.trim().to_string();
    let base = match root_state(rows, &root_label) {
        Some(state) => state,
        None => {
            eprintln!(
                "[warn] Could not infer a base state at root from mapping. Using '{}'.",
                UNKNOWN_STATE
            );
            UNKNOWN_STATE.to_string()
        }
    };
    tree.node_mut(tree.root).state = Some(base);

    apply_rows(tree, rows, index);
    fill_gaps(tree);
    capture_previous(tree);
    flag_changes(tree);
}

/// Majority host among rows anchored at the root, i.e. rows whose
/// ancestral name is the literal `root` (ASCII case-insensitive) or the
/// root's actual label. The tally is kept in an insertion-ordered
/// vector, so on a tied count the first-encountered value wins and the
/// result never depends on hash order. `None` when no row anchors the
/// root.
fn root_state(rows: &[MappingRow], root_label: &str) -> Option<String> {
    let mut counts: Vec<(&str, usize)> = Vec::new();
    for row in rows {
        if row.ancestral.eq_ignore_ascii_case("root") || row.ancestral == root_label {
            match counts.iter_mut().find(|(host, _)| *host == row.host) {
                Some(entry) => entry.1 += 1,
                None => counts.push((&row.host, 1)),
            }
        }
    }

    let mut best: Option<(&str, usize)> = None;
    for &(host, count) in &counts {
        if best.map_or(true, |(_, top)| count > top) {
            best = Some((host, count));
        }
    }
    best.map(|(host, _)| host.to_string())
}

/// Apply every mapping row in file order. Precondition: the root state
/// is already set. Each row resolves its ancestral node and its
/// accession, validates that the accession sits in the ancestor's
/// subtree, marks the ancestor as a change point and assigns the host
/// to every node on the exclusive ancestor-to-accession path. A node
/// that already carries a different state is overwritten with a
/// diagnostic; rows run in order, so the last writer wins. All per-row
/// failures skip the row with a warning and never abort.
fn apply_rows(tree: &mut Tree, rows: &[MappingRow], index: &HashMap<String, Vec<NodeId>>) {
    for row in rows {
        let Some(ancestor) = tree.resolve(&row.ancestral, index) else {
            eprintln!(
                "[warn] Ancestral node '{}' not found in tree. Skipping row '{}' / '{}' / '{}'.",
                row.ancestral, row.ancestral, row.accession, row.host
            );
            continue;
        };
        let Some(tip) = resolve_accession(tree, &row.accession, index) else {
            eprintln!(
                "[warn] Accession '{}' not found in tree. Skipping row '{}' / '{}' / '{}'.",
                row.accession, row.ancestral, row.accession, row.host
            );
            continue;
        };

        let path = tree.path_between(ancestor, tip);
        if tip != ancestor && path.is_empty() {
            eprintln!(
                "[warn] '{}' is not under ancestor '{}'. Skipping row '{}' / '{}' / '{}'.",
                row.accession, row.ancestral, row.ancestral, row.accession, row.host
            );
            continue;
        }

        // Marked even when the path is empty (accession == ancestor).
        tree.node_mut(ancestor).change_point = true;

        for id in path {
            let node = tree.node_mut(id);
            if let Some(old) = node.state.as_deref() {
                if old != row.host {
                    let shown = if node.label.trim().is_empty() {
                        "[unnamed]"
                    } else {
                        node.label.trim()
                    };
                    eprintln!(
                        "[warn] Conflicting state at node '{}': was '{}', new '{}'. Overwriting.",
                        shown, old, row.host
                    );
                }
            }
            node.state = Some(row.host.clone());
        }
    }
}

/// Among same-named candidates prefer a leaf, since accessions name
/// sequenced samples; otherwise fall back to the first discovered node.
fn resolve_accession(
    tree: &Tree,
    name: &str,
    index: &HashMap<String, Vec<NodeId>>,
) -> Option<NodeId> {
    let ids = index.get(name)?;
    ids.iter()
        .copied()
        .find(|&id| tree.is_leaf(id))
        .or_else(|| ids.first().copied())
}

/// Give every still-unresolved node its parent's state. Precondition:
/// the root is resolved. One pre-order sweep suffices because parents
/// are visited before their children, so a child never copies an unset
/// placeholder.
fn fill_gaps(tree: &mut Tree) {
    for id in tree.preorder() {
        if tree.node(id).state.is_some() {
            continue;
        }
        let Some(parent) = tree.node(id).parent else {
            continue;
        };
        let inherited = tree.node(parent).state.clone();
        tree.node_mut(id).state = inherited;
    }
}

/// Record each non-root node's previous state as its parent's final
/// resolved state. Precondition: gap filling is complete; this has to
/// be a separate sweep so that the captured values are the
/// post-propagation ones.
fn capture_previous(tree: &mut Tree) {
    for id in tree.preorder() {
        let previous = match tree.node(id).parent {
            Some(parent) => tree.node(parent).state.clone(),
            None => None,
        };
        tree.node_mut(id).prev_state = previous;
    }
}

/// Derive the state-change flag: explicit change point, or any direct
/// child whose resolved state differs. Descriptive output only; nothing
/// downstream propagates from it.
fn flag_changes(tree: &mut Tree) {
    for id in tree.preorder() {
        let state = tree.node(id).state.clone();
        let child_differs = tree
            .node(id)
            .children
            .iter()
            .any(|&child| tree.node(child).state != state);
        let node = tree.node_mut(id);
        node.state_change = node.change_point || child_differs;
    }
}
