use std::path::{Path, PathBuf};

use scvsync_core::config::SubmissionConfig;
use scvsync_io::{read_assertion_table, read_consensus_table};

use crate::error::Result;
use crate::index::AccessionIndex;
use crate::reconcile::{ReconcileOptions, ReconcileOutcome, reconcile};

/// Input files of a reconciliation run.
#[derive(Debug, Clone)]
pub struct PipelineInputs {
    /// Consensus table.
    pub consensus: PathBuf,
    /// Flattened assertion table.
    pub assertions: PathBuf,
    /// Directory with the local variant tables of every laboratory.
    pub local_dir: PathBuf,
}

impl PipelineInputs {
    pub fn new(consensus: &Path, assertions: &Path, local_dir: &Path) -> Self {
        PipelineInputs {
            consensus: consensus.to_path_buf(),
            assertions: assertions.to_path_buf(),
            local_dir: local_dir.to_path_buf(),
        }
    }
}

///
/// Read every input, build the accession index and reconcile the consensus against it.
/// Nothing is written; any failure aborts before a single output exists.
///
pub fn run_pipeline(
    inputs: &PipelineInputs,
    config: &SubmissionConfig,
    options: &ReconcileOptions,
) -> Result<ReconcileOutcome> {
    let registry = config.registry()?;

    let assertions = read_assertion_table(&inputs.assertions)?;
    let index = AccessionIndex::from_dir(&inputs.local_dir, &assertions, &registry, &config.local)?;
    let rows = read_consensus_table(&inputs.consensus)?;

    reconcile(&index, &rows, &registry, &config.consensus, options)
}
