use crate::annotation::types::Tree;

/// Append `suffix` to the label of every node whose resolved state
/// equals `target`. Labels already ending in the suffix are left alone,
/// so marking is idempotent. Unnamed nodes only receive the bare suffix
/// as a label when `include_unnamed` is set; silently renaming
/// anonymous internal nodes would change the shape of the emitted
/// labels, so that is an explicit opt-in.
pub fn mark_target(tree: &mut Tree, target: &str, suffix: &str, include_unnamed: bool) {
    for id in tree.preorder() {
        let node = tree.node_mut(id);
        if node.state.as_deref() != Some(target) {
            continue;
        }
        let label = node.label.trim();
        if !label.is_empty() {
            if !label.ends_with(suffix) {
                node.label = format!("{}{}", label, suffix);
            }
        } else if include_unnamed {
            node.label = suffix.to_string();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::annotation::types::MappingRow;
    use crate::newick::{parse, to_newick};

    fn marked(text: &str, rows: &[(&str, &str, &str)], target: &str, include_unnamed: bool) -> Tree {
        let mut tree = parse(text).unwrap();
        let rows: Vec<MappingRow> = rows
            .iter()
            .map(|&(ancestral, accession, host)| MappingRow {
                ancestral: ancestral.to_string(),
                accession: accession.to_string(),
                host: host.to_string(),
            })
            .collect();
        let index = tree.index_by_name();
        crate::annotation::propagation::propagate(&mut tree, &rows, &index);
        mark_target(&mut tree, target, "#1", include_unnamed);
        tree
    }

    #[test]
    fn marks_target_lineage_and_leaves_rest_alone() {
        let tree = marked(
            "(A:1,(B:1,C:1)N1:1)Root:0;",
            &[("Root", "A", "Fox"), ("N1", "B", "Fox"), ("N1", "C", "Wolf")],
            "Fox",
            false,
        );
        assert_eq!(to_newick(&tree), "(A#1:1,(B#1:1,C:1)N1#1:1)Root#1:0;");
    }

    #[test]
    fn marking_is_idempotent() {
        let mut tree = marked(
            "(A:1,(B:1,C:1)N1:1)Root:0;",
            &[("Root", "A", "Fox"), ("N1", "B", "Fox"), ("N1", "C", "Wolf")],
            "Fox",
            false,
        );
        let once = to_newick(&tree);
        mark_target(&mut tree, "Fox", "#1", false);
        assert_eq!(to_newick(&tree), once);
    }

    #[test]
    fn unnamed_nodes_marked_only_on_opt_in() {
        let silent = marked("(A:1,(B:1,C:1):1)Root;", &[("root", "A", "Fox")], "Fox", false);
        assert_eq!(to_newick(&silent), "(A#1:1,(B#1:1,C#1:1):1)Root#1;");

        let opted = marked("(A:1,(B:1,C:1):1)Root;", &[("root", "A", "Fox")], "Fox", true);
        assert_eq!(to_newick(&opted), "(A#1:1,(B#1:1,C#1:1)#1:1)Root#1;");
    }
}
