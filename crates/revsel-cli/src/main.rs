//! revsel CLI
//!
//! Command-line interface for random reviewer selection

use clap::{Parser, Subcommand};

mod commands;

#[derive(Debug, Parser)]
#[command(name = "revsel")]
#[command(about = "revsel - Random reviewer selection for pending policy rules", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Select reviewers for every pending leaf of an evaluation result
    Select(commands::select::SelectArgs),
    /// List the pending leaves of an evaluation result
    Leaves(commands::leaves::LeavesArgs),
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Select(args) => commands::select::execute(args),
        Commands::Leaves(args) => commands::leaves::execute(args),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
