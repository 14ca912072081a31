use std::path::Path;

use anyhow::{Context, Result};
use clap::ArgMatches;

use scvsync_core::config::SubmissionConfig;
use scvsync_io::{WriteOptions, write_submissions};
use scvsync_match::{PipelineInputs, ReconcileOptions, run_pipeline};

use crate::consts::CONFIG_ARG;

fn required<'a>(matches: &'a ArgMatches, id: &str) -> Result<&'a Path> {
    let value = matches
        .get_one::<String>(id)
        .with_context(|| format!("--{} is required.", id))?;
    Ok(Path::new(value))
}

pub fn run_reconcile(matches: &ArgMatches) -> Result<()> {
    let consensus = required(matches, "consensus")?;
    let assertions = required(matches, "assertions")?;
    let local_dir = required(matches, "local-dir")?;
    let output_dir = required(matches, "output-dir")?;
    let release = matches
        .get_one::<String>("release")
        .context("A release name is required.")?;

    let exclusions: Vec<String> = matches
        .get_many::<String>("exclude")
        .map(|values| values.map(|v| v.trim().to_string()).collect())
        .unwrap_or_default();
    let update_only = matches.get_flag("update-only");

    let config_path = matches.get_one::<String>(CONFIG_ARG).map(Path::new);
    let config = SubmissionConfig::from_optional_path(config_path)
        .context("Failed to load the submission config")?;

    let inputs = PipelineInputs::new(consensus, assertions, local_dir);
    let outcome = run_pipeline(&inputs, &config, &ReconcileOptions::new(exclusions))
        .context("Reconciliation failed, nothing was written")?;

    let paths = write_submissions(
        &outcome.submissions,
        output_dir,
        &WriteOptions::new(release, update_only),
    )
    .with_context(|| format!("Failed writing submission sheets to {}", output_dir.display()))?;

    println!(
        "Wrote {} sheets to {}: {} variant lines, {} deletes",
        paths.len(),
        output_dir.display(),
        outcome.total_variants(),
        outcome.total_deletes()
    );

    Ok(())
}
