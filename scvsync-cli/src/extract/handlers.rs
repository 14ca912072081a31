use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::ArgMatches;
use indicatif::{ProgressBar, ProgressStyle};

use scvsync_extract::AssertionExtractor;
use scvsync_io::AssertionTableWriter;

pub fn run_extract(matches: &ArgMatches) -> Result<()> {
    let input = matches
        .get_one::<String>("input")
        .context("A path to the ClinVar release is required.")?;
    let output = matches
        .get_one::<String>("output")
        .context("A path for the assertion table is required.")?;

    let input = Path::new(input);
    let output = Path::new(output);

    let mut extractor = AssertionExtractor::from_path(input)
        .with_context(|| format!("Failed to open ClinVar release {}", input.display()))?;
    let mut writer = AssertionTableWriter::create(output)?;

    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} [{elapsed_precise}] {msg} ({pos} assertions kept)")?,
    );
    pb.set_message(format!("Scanning {}", input.display()));
    pb.enable_steady_tick(Duration::from_millis(120));

    for record in extractor.by_ref() {
        let record = record.with_context(|| format!("Failed parsing {}", input.display()))?;
        writer.write(&record)?;
        pb.inc(1);
    }
    let written = writer.finish()?;
    pb.finish_and_clear();

    let stats = extractor.stats();
    println!(
        "Wrote {} assertions to {} ({} assertions scanned, {} from other studies, {} incomplete)",
        written,
        output.display(),
        stats.assertions,
        stats.other_study,
        stats.incomplete
    );

    Ok(())
}
