use crate::annotation::types::{NodeId, Tree};

/// Serialize the tree back into the grammar [`parse`](crate::newick::parse)
/// consumes, root label and trailing `;` included. Branch lengths are
/// emitted only where present, using the shortest decimal form that
/// round-trips the stored `f64`.
pub fn to_newick(tree: &Tree) -> String {
    let mut out = String::new();
    write_node(tree, tree.root, &mut out);
    out.push(';');
    out
}

fn write_node(tree: &Tree, id: NodeId, out: &mut String) {
    let node = tree.node(id);
    if !node.children.is_empty() {
        out.push('(');
        for (i, &child) in node.children.iter().enumerate() {
            if i > 0 {
                out.push(',');
            }
            write_node(tree, child, out);
        }
        out.push(')');
    }
    out.push_str(&node.label);
    if let Some(length) = node.branch_length {
        out.push(':');
        out.push_str(&length.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::newick::parse;

    #[test]
    fn round_trips_labels_and_lengths() {
        for text in [
            "(A:1,(B:1,C:1)N1:1)Root:0;",
            "((A:0.25,B:2)N1:0.5,C:3)R;",
            "(A,B)R;",
            "(A:1,B:2);",
        ] {
            let tree = parse(text).unwrap();
            assert_eq!(to_newick(&tree), text);
        }
    }

    #[test]
    fn reparse_of_output_is_identity() {
        let tree = parse("((A:0.1,B:0.2)N1:0.3,(C:0.4,D)N2)Root:0;").unwrap();
        let written = to_newick(&tree);
        let reparsed = parse(&written).unwrap();
        assert_eq!(to_newick(&reparsed), written);
    }

    #[test]
    fn omits_colon_for_absent_lengths() {
        let tree = parse("(A,B)R;").unwrap();
        assert_eq!(to_newick(&tree), "(A,B)R;");
    }
}
