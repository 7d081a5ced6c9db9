use anyhow::Result;

use crate::annotation;
use crate::annotation::{marking, report};
use crate::newick;

pub fn run(
    tree_file: String,
    mapping_file: String,
    target_state: String,
    suffix: String,
    include_unnamed: bool,
    print_report: bool,
    json_report: Option<String>,
) -> Result<()> {
    let mut tree = annotation::annotate(&tree_file, &mapping_file)?;

    marking::mark_target(&mut tree, &target_state, &suffix, include_unnamed);

    if print_report {
        report::print_report(&tree);
    }
    if let Some(path) = &json_report {
        report::write_json_report(&tree, path)?;
    }

    // The tree itself is the stdout contract; callers redirect it.
    println!("{}", newick::to_newick(&tree));
    Ok(())
}
