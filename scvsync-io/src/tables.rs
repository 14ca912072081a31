use std::fs::File;
use std::io::{BufRead, BufWriter, Write};
use std::path::{Path, PathBuf};

use scvsync_core::consts::TSV_DELIMITER;
use scvsync_core::layout::LocalTableLayout;
use scvsync_core::models::{AssertionRecord, ConsensusRow, LocalVariantRecord};
use scvsync_core::utils::{field, get_dynamic_reader};

use crate::error::{Result, TableError};

///
/// Read every data line of a tab-separated table: the header row and blank lines are
/// skipped, trailing carriage returns dropped.
///
/// # Arguments
/// - path: path to the table, gzip'd or not
pub fn read_data_lines(path: &Path) -> Result<Vec<String>> {
    let reader = get_dynamic_reader(path).map_err(|source| TableError::Open {
        path: path.to_path_buf(),
        source,
    })?;

    let mut lines = Vec::new();
    for line in reader.lines().skip(1) {
        let line = line.map_err(|source| TableError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let line = line.trim_end_matches('\r');
        if line.is_empty() {
            continue;
        }
        lines.push(line.to_string());
    }

    Ok(lines)
}

///
/// Read the flattened assertion table (`cDNA, submissionId, gene, class, lab`).
/// Rows without accession or laboratory are skipped.
///
pub fn read_assertion_table(path: &Path) -> Result<Vec<AssertionRecord>> {
    let mut records = Vec::new();
    let mut skipped = 0;

    for line in read_data_lines(path)? {
        let fields: Vec<&str> = line.split(TSV_DELIMITER).collect();
        let record = AssertionRecord {
            cdna_notation: field(&fields, 0).to_string(),
            accession_id: field(&fields, 1).to_string(),
            gene: field(&fields, 2).to_string(),
            classification: field(&fields, 3).to_string(),
            submitting_lab: field(&fields, 4).to_string(),
        };

        if record.accession_id.is_empty() || record.submitting_lab.is_empty() {
            skipped += 1;
            continue;
        }
        records.push(record);
    }

    if skipped > 0 {
        log::debug!("Skipped {} assertion rows without accession or laboratory", skipped);
    }
    log::info!("Read {} assertions from {}", records.len(), path.display());

    Ok(records)
}

///
/// Read a laboratory's local variant table.
///
pub fn read_local_table(path: &Path, layout: &LocalTableLayout) -> Result<Vec<LocalVariantRecord>> {
    let records: Vec<LocalVariantRecord> = read_data_lines(path)?
        .iter()
        .map(|line| {
            let fields: Vec<&str> = line.split(TSV_DELIMITER).collect();
            LocalVariantRecord::from_fields(&fields, layout)
        })
        .collect();

    log::debug!("Read {} local variants from {}", records.len(), path.display());

    Ok(records)
}

///
/// Read the consensus table, in file order.
///
pub fn read_consensus_table(path: &Path) -> Result<Vec<ConsensusRow>> {
    let rows: Vec<ConsensusRow> = read_data_lines(path)?
        .iter()
        .map(|line| ConsensusRow::from_line(line))
        .collect();

    log::info!("Read {} consensus rows from {}", rows.len(), path.display());

    Ok(rows)
}

///
/// Streaming writer of the flattened assertion table.
///
pub struct AssertionTableWriter {
    path: PathBuf,
    writer: BufWriter<File>,
    written: usize,
}

impl AssertionTableWriter {
    ///
    /// Create the file (and its parent directories) and write the header.
    ///
    pub fn create(path: &Path) -> Result<Self> {
        let to_write_error = |source| TableError::Write {
            path: path.to_path_buf(),
            source,
        };

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(to_write_error)?;
        }
        let file = File::create(path).map_err(to_write_error)?;
        let mut writer = BufWriter::new(file);
        writeln!(writer, "{}", AssertionRecord::HEADER.join(TSV_DELIMITER)).map_err(to_write_error)?;

        Ok(AssertionTableWriter {
            path: path.to_path_buf(),
            writer,
            written: 0,
        })
    }

    pub fn write(&mut self, record: &AssertionRecord) -> Result<()> {
        writeln!(self.writer, "{}", record.as_string()).map_err(|source| TableError::Write {
            path: self.path.clone(),
            source,
        })?;
        self.written += 1;
        Ok(())
    }

    /// Flush and return the number of records written.
    pub fn finish(mut self) -> Result<usize> {
        self.writer.flush().map_err(|source| TableError::Write {
            path: self.path.clone(),
            source,
        })?;
        Ok(self.written)
    }
}
