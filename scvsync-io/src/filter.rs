//! Narrow written submission sheets down to the rows an external HGVS validator accepted.
use std::fs::File;
use std::io::{BufRead, BufWriter, Write};
use std::path::{Path, PathBuf};

use fxhash::FxHashSet;

use scvsync_core::consts::TSV_DELIMITER;
use scvsync_core::labs::LabRegistry;
use scvsync_core::utils::{field, get_dynamic_reader};

use crate::error::{Result, TableError};
use crate::sheets::{SubmissionSheet, sheet_file_name};
use crate::tables::read_data_lines;

pub const FILTERED_DIR: &str = "filtered";

/// `<SHORT>_validated.tsv`
pub fn validation_file_name(short_code: &str) -> String {
    format!("{}_validated.tsv", short_code)
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSummary {
    pub short_code: String,
    /// Sheet rows copied, summed over the Variant and ExpEvidence sheets.
    pub kept: usize,
    pub dropped: usize,
}

///
/// Notations the validator reported no error for (column 0 notation, column 1 error).
///
pub fn read_validated_notations(path: &Path) -> Result<FxHashSet<String>> {
    let notations = read_data_lines(path)?
        .iter()
        .filter_map(|line| {
            let fields: Vec<&str> = line.split(TSV_DELIMITER).collect();
            if field(&fields, 1).is_empty() {
                Some(field(&fields, 0).to_string())
            } else {
                None
            }
        })
        .collect();

    Ok(notations)
}

/// Copy the header and every row whose `col0:col1` notation is valid. Returns (kept, dropped).
fn filter_sheet(
    input: &Path,
    output: &Path,
    valid: &FxHashSet<String>,
) -> Result<(usize, usize)> {
    let reader = get_dynamic_reader(input).map_err(|source| TableError::Open {
        path: input.to_path_buf(),
        source,
    })?;
    let to_write_error = |source| TableError::Write {
        path: output.to_path_buf(),
        source,
    };
    let mut writer = BufWriter::new(File::create(output).map_err(to_write_error)?);

    let (mut kept, mut dropped) = (0, 0);
    for (n, line) in reader.lines().enumerate() {
        let line = line.map_err(|source| TableError::Read {
            path: input.to_path_buf(),
            source,
        })?;

        if n == 0 {
            writeln!(writer, "{}", line).map_err(to_write_error)?;
            continue;
        }
        if line.is_empty() {
            continue;
        }

        let fields: Vec<&str> = line.split(TSV_DELIMITER).collect();
        let notation = format!("{}:{}", field(&fields, 0), field(&fields, 1));
        if valid.contains(&notation) {
            writeln!(writer, "{}", line).map_err(to_write_error)?;
            kept += 1;
        } else {
            dropped += 1;
        }
    }
    writer.flush().map_err(to_write_error)?;

    Ok((kept, dropped))
}

///
/// For every laboratory with a validation file in `dir`, write filtered copies of its
/// Variant and ExpEvidence sheets into `dir/filtered/`. Laboratories without a
/// validation file are skipped.
///
/// # Arguments
/// - dir: directory holding the sheets and the `<SHORT>_validated.tsv` files
/// - release: release name of the sheets
/// - registry: the laboratories to look for
pub fn filter_validated(dir: &Path, release: &str, registry: &LabRegistry) -> Result<Vec<FilterSummary>> {
    let out_dir: PathBuf = dir.join(FILTERED_DIR);
    std::fs::create_dir_all(&out_dir).map_err(|source| TableError::Write {
        path: out_dir.clone(),
        source,
    })?;

    let mut summaries = Vec::new();
    for lab in registry {
        let validation = dir.join(validation_file_name(&lab.short_code));
        if !validation.exists() {
            log::warn!("No validation results for {}, skipping", lab.short_code);
            continue;
        }
        let valid = read_validated_notations(&validation)?;

        let mut summary = FilterSummary {
            short_code: lab.short_code.clone(),
            ..Default::default()
        };
        for sheet in [SubmissionSheet::Variant, SubmissionSheet::ExpEvidence] {
            let name = sheet_file_name(&lab.short_code, release, sheet);
            let (kept, dropped) = filter_sheet(&dir.join(&name), &out_dir.join(&name), &valid)?;
            summary.kept += kept;
            summary.dropped += dropped;
        }

        log::info!(
            "{}: kept {} sheet rows, dropped {}",
            summary.short_code,
            summary.kept,
            summary.dropped
        );
        summaries.push(summary);
    }

    Ok(summaries)
}
