use std::fmt;

use crate::annotation::types::{Node, NodeId, Tree};

/// Malformed tree text, pointing at the offending byte offset within
/// the (trimmed) input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    pub pos: usize,
    pub message: String,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at position {}", self.message, self.pos)
    }
}

impl std::error::Error for ParseError {}

/// Parse a Newick-style tree description into a [`Tree`].
///
/// Grammar: a subtree is either `(` subtree `,` ... `)` label? length?
/// or a bare label? length?, where a label runs up to the next `:`,
/// `,`, `)` or `;` and a length is `:` followed by a real number. The
/// final `;` is consumed when present; anything but whitespace after it
/// is an error.
///
/// Quoted labels, comments and NHX-style annotations are not
/// interpreted; their characters simply fall into labels. Callers that
/// need them must pre-process the text.
pub fn parse(text: &str) -> Result<Tree, ParseError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(ParseError {
            pos: 0,
            message: "empty tree text".to_string(),
        });
    }
    let mut parser = Parser {
        text,
        input: text.as_bytes(),
        pos: 0,
        nodes: Vec::new(),
    };
    let root = parser.subtree(None)?;
    parser.finish()?;
    Ok(Tree {
        nodes: parser.nodes,
        root,
    })
}

struct Parser<'a> {
    text: &'a str,
    input: &'a [u8],
    pos: usize,
    nodes: Vec<Node>,
}

impl Parser<'_> {
    fn peek(&self) -> Option<u8> {
        self.input.get(self.pos).copied()
    }

    // Nodes are allocated before their children, so arena order is the
    // pre-order the rest of the crate documents.
    fn subtree(&mut self, parent: Option<NodeId>) -> Result<NodeId, ParseError> {
        let id = self.nodes.len();
        let mut node = Node::new(String::new(), None);
        node.parent = parent;
        self.nodes.push(node);

        if self.peek() == Some(b'(') {
            self.pos += 1;
            loop {
                let child = self.subtree(Some(id))?;
                self.nodes[id].children.push(child);
                match self.peek() {
                    Some(b',') => self.pos += 1,
                    Some(b')') => {
                        self.pos += 1;
                        break;
                    }
                    Some(other) => {
                        return Err(ParseError {
                            pos: self.pos,
                            message: format!("unexpected character '{}'", other as char),
                        });
                    }
                    None => {
                        return Err(ParseError {
                            pos: self.pos,
                            message: "unexpected end of input".to_string(),
                        });
                    }
                }
            }
        }

        self.nodes[id].label = self.label();
        if self.peek() == Some(b':') {
            self.pos += 1;
            self.nodes[id].branch_length = Some(self.branch_length()?);
        }
        Ok(id)
    }

    // Structural characters are all ASCII, so byte offsets stay on
    // UTF-8 boundaries and the slice below cannot split a character.
    fn label(&mut self) -> String {
        let start = self.pos;
        while let Some(c) = self.peek() {
            if matches!(c, b':' | b',' | b')' | b';') {
                break;
            }
            self.pos += 1;
        }
        self.text[start..self.pos].to_string()
    }

    fn branch_length(&mut self) -> Result<f64, ParseError> {
        let start = self.pos;
        while let Some(c) = self.peek() {
            if matches!(c, b',' | b')' | b';') {
                break;
            }
            self.pos += 1;
        }
        let slice = self.text[start..self.pos].trim();
        let value: f64 = slice.parse().map_err(|_| ParseError {
            pos: start,
            message: format!("invalid branch length '{}'", slice),
        })?;
        if value < 0.0 {
            return Err(ParseError {
                pos: start,
                message: format!("negative branch length '{}'", slice),
            });
        }
        Ok(value)
    }

    fn finish(&mut self) -> Result<(), ParseError> {
        if self.peek() == Some(b';') {
            self.pos += 1;
        }
        while let Some(c) = self.peek() {
            if !c.is_ascii_whitespace() {
                return Err(ParseError {
                    pos: self.pos,
                    message: format!("unexpected character '{}' after tree end", c as char),
                });
            }
            self.pos += 1;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_labels_lengths_and_structure() {
        let tree = parse("(A:1,(B:1,C:1)N1:1)Root:0;").unwrap();
        let root = tree.node(tree.root);
        assert_eq!(root.label, "Root");
        assert_eq!(root.branch_length, Some(0.0));
        assert_eq!(root.children.len(), 2);

        let a = tree.node(root.children[0]);
        assert_eq!(a.label, "A");
        assert_eq!(a.branch_length, Some(1.0));
        assert!(a.children.is_empty());

        let n1 = tree.node(root.children[1]);
        assert_eq!(n1.label, "N1");
        assert_eq!(n1.children.len(), 2);
        assert_eq!(tree.node(n1.children[1]).label, "C");
    }

    #[test]
    fn absent_length_stays_unset() {
        let tree = parse("(A,B:0.5)R;").unwrap();
        let root = tree.node(tree.root);
        assert_eq!(tree.node(root.children[0]).branch_length, None);
        assert_eq!(tree.node(root.children[1]).branch_length, Some(0.5));
    }

    #[test]
    fn unnamed_internal_nodes_get_empty_labels() {
        let tree = parse("((A:1,B:2):0.1,C:3);").unwrap();
        let root = tree.node(tree.root);
        assert_eq!(root.label, "");
        let inner = tree.node(root.children[0]);
        assert_eq!(inner.label, "");
        assert_eq!(inner.branch_length, Some(0.1));
    }

    #[test]
    fn parent_links_point_upward() {
        let tree = parse("(A:1,(B:1,C:1)N1:1)Root;").unwrap();
        let root = tree.root;
        assert_eq!(tree.node(root).parent, None);
        let n1 = tree.node(root).children[1];
        assert_eq!(tree.node(n1).parent, Some(root));
        for &child in &tree.node(n1).children {
            assert_eq!(tree.node(child).parent, Some(n1));
        }
    }

    #[test]
    fn terminator_is_optional_but_trailing_garbage_is_not() {
        assert!(parse("(A:1,B:2)R").is_ok());
        assert!(parse("(A:1,B:2)R;\n").is_ok());
        let err = parse("(A:1,B:2)R; extra").unwrap_err();
        assert!(err.message.contains("after tree end"));
    }

    #[test]
    fn reports_position_of_unexpected_character() {
        let err = parse("(A,B;").unwrap_err();
        assert_eq!(err.pos, 4);
        assert!(err.message.contains("';'"));
    }

    #[test]
    fn reports_truncated_input() {
        let err = parse("(A,(B,C)").unwrap_err();
        assert_eq!(err.message, "unexpected end of input");
        assert_eq!(err.pos, 8);
    }

    #[test]
    fn rejects_bad_branch_lengths() {
        assert!(parse("A:;").is_err());
        assert!(parse("A:abc;").is_err());
        assert!(parse("(A:1,B:-0.5)R;").is_err());
        assert!(parse("").is_err());
    }

    #[test]
    fn handles_multibyte_labels() {
        let tree = parse("(Vulpes_vulpes:1,Canis_familiaris:2)Wurzel_Å:0.5;").unwrap();
        assert_eq!(tree.node(tree.root).label, "Wurzel_Å");
    }
}
