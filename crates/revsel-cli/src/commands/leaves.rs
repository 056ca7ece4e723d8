//! Pending leaf listing command
//!
//! Usage: revsel leaves --input <PATH>

use clap::Args;
use revsel_core::traversal::find_pending_leaves;
use std::path::PathBuf;

use super::load_fixture;

#[derive(Debug, Args)]
pub struct LeavesArgs {
    /// Fixture with `directory` and `result` (JSON, or YAML by extension)
    #[arg(long)]
    pub input: PathBuf,
}

/// Execute leaves command
///
/// Prints one `name<TAB>required_count` line per pending leaf, in traversal
/// order. Leaves without a review request rule show `-`.
pub fn execute(args: LeavesArgs) -> Result<(), Box<dyn std::error::Error>> {
    let fixture = load_fixture(&args.input)?;

    for leaf in find_pending_leaves(&fixture.result) {
        match &leaf.review_request_rule {
            Some(rule) => println!("{}\t{}", leaf.name, rule.required_count),
            None => println!("{}\t-", leaf.name),
        }
    }

    Ok(())
}
