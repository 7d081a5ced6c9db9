pub mod mapping;
pub mod marking;
pub mod propagation;
pub mod report;
pub mod tree;
pub mod types;

pub use types::{MappingRow, Node, NodeId, Tree};

use anyhow::{anyhow, Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use std::fs;

use crate::newick;

/// Load the tree and the mapping table, then run the propagation
/// passes. Returns the annotated tree for the caller to mark, report
/// and serialize. The spinner draws on stderr and is cleared before
/// returning, so stdout stays clean for the tree output.
pub fn annotate(tree_path: &str, mapping_path: &str) -> Result<Tree> {
    let progress = ProgressBar::new_spinner();
    progress.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap(),
    );

    progress.set_message("Reading tree...");
    let text = fs::read_to_string(tree_path)
        .with_context(|| format!("Failed to read tree file '{}'", tree_path))?;
    let mut tree = newick::parse(&text)
        .map_err(|e| anyhow!("Failed to parse tree file '{}': {}", tree_path, e))?;

    progress.set_message("Loading mapping table...");
    let rows = mapping::load_mapping(mapping_path)?;

    progress.set_message("Propagating host states...");
    let index = tree.index_by_name();
    propagation::propagate(&mut tree, &rows, &index);

    progress.finish_and_clear();
    Ok(tree)
}
