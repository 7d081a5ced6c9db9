use anyhow::{Context, Result};
use serde::Serialize;
use std::fs::File;
use std::io::BufWriter;

use crate::annotation::propagation::UNKNOWN_STATE;
use crate::annotation::types::Tree;

/// One per-node record of the diagnostic report, in pre-order. Unnamed
/// nodes get synthesized `__internal_N` names so every line is
/// attributable.
#[derive(Debug, Serialize)]
pub struct NodeRecord {
    pub name: String,
    pub state: String,
    pub previous_state: Option<String>,
    pub is_leaf: bool,
    pub is_state_change: bool,
}

pub fn build_report(tree: &Tree) -> Vec<NodeRecord> {
    let mut unnamed = 0usize;
    let mut records = Vec::with_capacity(tree.nodes.len());
    for id in tree.preorder() {
        let node = tree.node(id);
        let label = node.label.trim();
        let name = if label.is_empty() {
            unnamed += 1;
            format!("__internal_{}", unnamed)
        } else {
            label.to_string()
        };
        records.push(NodeRecord {
            name,
            state: node
                .state
                .clone()
                .unwrap_or_else(|| UNKNOWN_STATE.to_string()),
            previous_state: node.prev_state.clone(),
            is_leaf: tree.is_leaf(id),
            is_state_change: node.state_change,
        });
    }
    records
}

/// Human-readable report on stderr, one block per node. Debugging aid,
/// not part of the stdout contract.
pub fn print_report(tree: &Tree) {
    for record in build_report(tree) {
        eprintln!("Node: {}", record.name);
        eprintln!("  State: {}", record.state);
        eprintln!(
            "  Previous state: {}",
            record.previous_state.as_deref().unwrap_or("None")
        );
        eprintln!("  Is state-change: {}", record.is_state_change);
        eprintln!("  Is leaf: {}\n", record.is_leaf);
    }
}

/// Machine-readable variant of the same records, pretty-printed JSON.
pub fn write_json_report(tree: &Tree, path: &str) -> Result<()> {
    let records = build_report(tree);
    let file = File::create(path)
        .with_context(|| format!("Failed to create report file '{}'", path))?;
    serde_json::to_writer_pretty(BufWriter::new(file), &records)
        .with_context(|| format!("Failed to write report file '{}'", path))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::annotation::propagation::propagate;
    use crate::annotation::types::MappingRow;
    use crate::newick::parse;

    #[test]
    fn report_follows_preorder_and_numbers_unnamed_nodes() {
        let mut tree = parse("(A:1,(B:1,C:1):1)Root;").unwrap();
        let rows = vec![MappingRow {
            ancestral: "root".to_string(),
            accession: "A".to_string(),
            host: "Fox".to_string(),
        }];
        let index = tree.index_by_name();
        propagate(&mut tree, &rows, &index);

        let records = build_report(&tree);
        let names: Vec<&str> = records.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Root", "A", "__internal_1", "B", "C"]);

        assert_eq!(records[0].state, "Fox");
        assert_eq!(records[0].previous_state, None);
        assert!(!records[0].is_leaf);
        assert!(records[1].is_leaf);
        assert_eq!(records[3].previous_state.as_deref(), Some("Fox"));
    }
}
