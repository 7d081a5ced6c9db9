use clap::Parser;

use treemark::cli;
use treemark::commands;

fn main() {
    let args = cli::Args::parse();

    let result = commands::annotate::run(
        args.tree_file,
        args.mapping_file,
        args.target_state,
        args.suffix,
        args.include_unnamed,
        args.report,
        args.json_report,
    );

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
