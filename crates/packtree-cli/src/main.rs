// packtree CLI entry point

use clap::Parser;
use packtree_cli::{cli::Args, logging, output, run};

fn main() {
    let args = Args::parse();
    logging::init();

    if let Err(e) = run::execute(&args) {
        output::print_error(&format!("{e:#}"));
        std::process::exit(1);
    }
}
