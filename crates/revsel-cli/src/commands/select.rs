//! Reviewer selection command
//!
//! Usage: revsel select --input <PATH> [--seed N] [--settings PATH] [--json]

use clap::Args;
use rand::rngs::StdRng;
use rand::SeedableRng;
use revsel_core::logging_facility;
use revsel_core::{find_random_requesters_with, CachedCollaborators, SelectionSettings};
use std::path::PathBuf;

use super::load_fixture;

#[derive(Debug, Args)]
pub struct SelectArgs {
    /// Fixture with `directory` and `result` (JSON, or YAML by extension)
    #[arg(long)]
    pub input: PathBuf,

    /// Seed for a reproducible selection
    #[arg(long)]
    pub seed: Option<u64>,

    /// Settings TOML file
    #[arg(long)]
    pub settings: Option<PathBuf>,

    /// Print reviewers as a JSON array
    #[arg(long)]
    pub json: bool,
}

/// Execute select command
pub fn execute(args: SelectArgs) -> Result<(), Box<dyn std::error::Error>> {
    let settings = match &args.settings {
        Some(path) => SelectionSettings::load(path)?,
        None => SelectionSettings::default(),
    };
    logging_facility::init(settings.log_profile);

    let fixture = load_fixture(&args.input)?;
    let directory = CachedCollaborators::new(fixture.directory);

    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let reviewers = find_random_requesters_with(&fixture.result, &directory, &mut rng, &settings)?;

    if args.json {
        println!("{}", serde_json::to_string(&reviewers)?);
    } else {
        for reviewer in &reviewers {
            println!("{}", reviewer);
        }
    }

    Ok(())
}
