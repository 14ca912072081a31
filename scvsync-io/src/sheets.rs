use std::fmt::{self, Display};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use scvsync_core::consts::TSV_DELIMITER;
use scvsync_core::models::{DeleteReason, LabSubmission, VariantLine};

use crate::classification::{condition_name, render_classification};
use crate::error::{Result, TableError};

pub const COLLECTION_METHOD_VALUE: &str = "clinical testing";
pub const ALLELE_ORIGIN_VALUE: &str = "germline";
pub const AFFECTED_STATUS_VALUE: &str = "yes";

const VARIANT_HEADER: [&str; 7] = [
    "Reference sequence",
    "HGVS",
    "Preferred condition name",
    "Clinical significance",
    "Date last evaluated",
    "Gene symbol",
    "ClinVarAccession",
];

const EXP_EVIDENCE_HEADER: [&str; 6] = [
    "Reference sequence",
    "HGVS",
    "Preferred condition name",
    "Collection method",
    "Allele origin",
    "Affected status",
];

const DELETES_HEADER: [&str; 1] = ["ClinVarAccession"];

///
/// The tab-separated sheets of a ClinVar submission, one set per laboratory.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SubmissionSheet {
    Variant,
    ExpEvidence,
    Deletes,
}

impl SubmissionSheet {
    pub fn header(&self) -> &'static [&'static str] {
        match self {
            SubmissionSheet::Variant => &VARIANT_HEADER,
            SubmissionSheet::ExpEvidence => &EXP_EVIDENCE_HEADER,
            SubmissionSheet::Deletes => &DELETES_HEADER,
        }
    }
}

impl Display for SubmissionSheet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SubmissionSheet::Variant => write!(f, "Variant"),
            SubmissionSheet::ExpEvidence => write!(f, "ExpEvidence"),
            SubmissionSheet::Deletes => write!(f, "Deletes"),
        }
    }
}

/// `<SHORT>_<release>_<Sheet>.tsv`
pub fn sheet_file_name(short_code: &str, release: &str, sheet: SubmissionSheet) -> String {
    format!("{}_{}_{}.tsv", short_code, release, sheet)
}

#[derive(Debug, Clone, Default)]
pub struct WriteOptions {
    /// Release name, part of every file name.
    pub release: String,
    /// Only write lines that update an existing accession, and no Deletes sheet.
    pub update_only: bool,
}

impl WriteOptions {
    pub fn new(release: &str, update_only: bool) -> Self {
        WriteOptions {
            release: release.to_string(),
            update_only,
        }
    }
}

fn variant_row(line: &VariantLine) -> String {
    let classification = render_classification(&line.classification);
    [
        line.transcript.as_str(),
        line.cdna.as_str(),
        condition_name(classification),
        classification,
        "",
        line.gene.as_str(),
        line.accession.as_deref().unwrap_or(""),
    ]
    .join(TSV_DELIMITER)
}

fn evidence_row(line: &VariantLine) -> String {
    let classification = render_classification(&line.classification);
    [
        line.transcript.as_str(),
        line.cdna.as_str(),
        condition_name(classification),
        COLLECTION_METHOD_VALUE,
        ALLELE_ORIGIN_VALUE,
        AFFECTED_STATUS_VALUE,
    ]
    .join(TSV_DELIMITER)
}

fn write_sheet<I>(path: &Path, sheet: SubmissionSheet, rows: I) -> Result<usize>
where
    I: IntoIterator<Item = String>,
{
    let to_write_error = |source| TableError::Write {
        path: path.to_path_buf(),
        source,
    };

    let file = File::create(path).map_err(to_write_error)?;
    let mut writer = BufWriter::new(file);

    writeln!(writer, "{}", sheet.header().join(TSV_DELIMITER)).map_err(to_write_error)?;
    let mut written = 0;
    for row in rows {
        writeln!(writer, "{}", row).map_err(to_write_error)?;
        written += 1;
    }
    writer.flush().map_err(to_write_error)?;

    Ok(written)
}

pub trait SubmissionWrite {
    ///
    /// Write the submission sheets into a directory.
    ///
    /// # Arguments
    /// - dir: output directory, created when missing
    /// - options: release name and update-only mode
    ///
    /// # Returns
    /// - the paths of the sheets written
    fn write_sheets<T: AsRef<Path>>(&self, dir: T, options: &WriteOptions) -> Result<Vec<PathBuf>>;
}

impl SubmissionWrite for LabSubmission {
    fn write_sheets<T: AsRef<Path>>(&self, dir: T, options: &WriteOptions) -> Result<Vec<PathBuf>> {
        let dir = dir.as_ref();
        std::fs::create_dir_all(dir).map_err(|source| TableError::Write {
            path: dir.to_path_buf(),
            source,
        })?;

        let path_for =
            |sheet| dir.join(sheet_file_name(&self.short_code, &options.release, sheet));
        let selected: Vec<&VariantLine> = self
            .variants
            .iter()
            .filter(|line| !options.update_only || line.is_update())
            .collect();

        let mut paths = Vec::with_capacity(3);

        let variant_path = path_for(SubmissionSheet::Variant);
        let written = write_sheet(
            &variant_path,
            SubmissionSheet::Variant,
            selected.iter().map(|line| variant_row(line)),
        )?;
        paths.push(variant_path);

        let evidence_path = path_for(SubmissionSheet::ExpEvidence);
        write_sheet(
            &evidence_path,
            SubmissionSheet::ExpEvidence,
            selected.iter().map(|line| evidence_row(line)),
        )?;
        paths.push(evidence_path);

        log::info!(
            "{}: wrote {} variant lines ({} updates)",
            self.short_code,
            written,
            self.updates().count()
        );

        if !options.update_only {
            let deletes_path = path_for(SubmissionSheet::Deletes);
            write_sheet(
                &deletes_path,
                SubmissionSheet::Deletes,
                self.deletes.iter().map(|line| line.accession_id.clone()),
            )?;
            paths.push(deletes_path);

            log::info!(
                "{}: wrote {} deletes ({} {}, {} {})",
                self.short_code,
                self.deletes.len(),
                self.deletes_with(DeleteReason::NoLocalVariant).count(),
                DeleteReason::NoLocalVariant,
                self.deletes_with(DeleteReason::NotInConsensus).count(),
                DeleteReason::NotInConsensus,
            );
        }

        Ok(paths)
    }
}

///
/// Write the sheets of every laboratory.
///
/// Sheets are staged in a hidden directory inside `dir` and moved into place only once
/// every laboratory has been written, so a failure leaves no sheets behind.
///
pub fn write_submissions<T: AsRef<Path>>(
    submissions: &[LabSubmission],
    dir: T,
    options: &WriteOptions,
) -> Result<Vec<PathBuf>> {
    let dir = dir.as_ref();
    let to_write_error = |source| TableError::Write {
        path: dir.to_path_buf(),
        source,
    };

    std::fs::create_dir_all(dir).map_err(to_write_error)?;
    // removed on drop, whether or not the sheets were promoted
    let staging = tempfile::Builder::new()
        .prefix(".scvsync-staging-")
        .tempdir_in(dir)
        .map_err(to_write_error)?;

    let mut staged = Vec::new();
    for submission in submissions {
        staged.extend(submission.write_sheets(staging.path(), options)?);
    }

    let mut paths = Vec::with_capacity(staged.len());
    for staged_path in &staged {
        let Some(file_name) = staged_path.file_name() else {
            continue;
        };
        let path = dir.join(file_name);
        if let Err(source) = std::fs::rename(staged_path, &path) {
            for promoted in &paths {
                let _ = std::fs::remove_file(promoted);
            }
            return Err(TableError::Write { path, source });
        }
        paths.push(path);
    }

    log::debug!("Moved {} sheets into {}", paths.len(), dir.display());
    Ok(paths)
}
