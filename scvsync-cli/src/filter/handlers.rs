use std::path::Path;

use anyhow::{Context, Result};
use clap::ArgMatches;

use scvsync_core::config::SubmissionConfig;
use scvsync_io::{FILTERED_DIR, filter_validated};

use crate::consts::CONFIG_ARG;

pub fn run_filter(matches: &ArgMatches) -> Result<()> {
    let input = matches
        .get_one::<String>("input")
        .context("A directory with submission sheets is required.")?;
    let release = matches
        .get_one::<String>("release")
        .context("A release name is required.")?;

    let config_path = matches.get_one::<String>(CONFIG_ARG).map(Path::new);
    let registry = SubmissionConfig::from_optional_path(config_path)
        .and_then(|config| config.registry())
        .context("Failed to load the laboratory registry")?;

    let input = Path::new(input);
    let summaries = filter_validated(input, release, &registry)
        .with_context(|| format!("Failed filtering sheets in {}", input.display()))?;

    for summary in &summaries {
        println!(
            "{}: kept {}, dropped {}",
            summary.short_code, summary.kept, summary.dropped
        );
    }
    println!("Filtered sheets written to {}", input.join(FILTERED_DIR).display());

    Ok(())
}
