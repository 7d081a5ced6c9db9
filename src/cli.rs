use clap::Parser;

/// Annotate a rooted Newick tree with host states from a mapping table
/// and mark the lineages carrying a target state. The marked tree is
/// printed to stdout; diagnostics go to stderr.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Newick tree file (a single tree terminated by ';')
    pub tree_file: String,

    /// Tab-separated mapping table with 'Ancestral node', 'Accession'
    /// and 'Host' columns
    pub mapping_file: String,

    /// Host state whose nodes receive the marking suffix
    pub target_state: String,

    /// Suffix appended to the labels of target-state nodes
    #[arg(long, default_value = "#1")]
    pub suffix: String,

    /// Also label unnamed nodes with the bare suffix
    #[arg(long)]
    pub include_unnamed: bool,

    /// Print a per-node report to stderr
    #[arg(long)]
    pub report: bool,

    /// Write the per-node report as JSON to this file
    #[arg(long, value_name = "FILE")]
    pub json_report: Option<String>,
}
