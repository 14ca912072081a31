use crate::consts::TSV_DELIMITER;
use crate::identity::{coordinate_key, transcript_key};
use crate::layout::LocalTableLayout;
use crate::utils::field;

///
/// One row of a laboratory's local variant table.
///
#[derive(Eq, PartialEq, Hash, Debug, Clone, Default)]
pub struct LocalVariantRecord {
    pub chrom: String,
    pub start: String,
    pub stop: String,
    pub ref_allele: String,
    pub alt: String,
    pub gene: String,
    /// Transcript accession with its version.
    pub transcript: String,
    pub cdna_notation: String,
}

impl LocalVariantRecord {
    ///
    /// Pick the record out of the split fields of a table row. Missing trailing columns
    /// read as empty.
    ///
    pub fn from_fields(fields: &[&str], layout: &LocalTableLayout) -> Self {
        LocalVariantRecord {
            chrom: field(fields, layout.chrom).to_string(),
            start: field(fields, layout.start).to_string(),
            stop: field(fields, layout.stop).to_string(),
            ref_allele: field(fields, layout.ref_allele).to_string(),
            alt: field(fields, layout.alt).to_string(),
            gene: field(fields, layout.gene).to_string(),
            transcript: field(fields, layout.transcript).to_string(),
            cdna_notation: field(fields, layout.cdna).to_string(),
        }
    }

    /// Coordinate-scheme identity, comparable with consensus rows.
    pub fn coordinate_key(&self) -> String {
        coordinate_key(
            &self.chrom,
            &self.start,
            &self.stop,
            &self.ref_allele,
            &self.alt,
            &self.gene,
        )
    }

    /// Transcript-scheme identity, comparable with ClinVar notations.
    pub fn transcript_key(&self) -> String {
        transcript_key(&self.transcript, &self.cdna_notation)
    }
}
