use std::fmt::{self, Display};

///
/// One flattened ClinVar submission record (an SCV) belonging to the consortium's shared
/// submission.
///
/// Fields the source did not provide are empty strings.
///
#[derive(Eq, PartialEq, Hash, Debug, Clone, Default)]
pub struct AssertionRecord {
    /// `transcript:change`, e.g. `NM_000123.5:c.76A>T`.
    pub cdna_notation: String,
    pub accession_id: String,
    pub gene: String,
    pub classification: String,
    /// ClinVar submitter name of the laboratory.
    pub submitting_lab: String,
}

impl AssertionRecord {
    pub const HEADER: [&'static str; 5] = ["cDNA", "submissionId", "gene", "class", "lab"];

    ///
    /// Render the record as one line of the flattened assertion table.
    ///
    pub fn as_string(&self) -> String {
        format!(
            "{}\t{}\t{}\t{}\t{}",
            self.cdna_notation,
            self.accession_id,
            self.gene,
            self.classification,
            self.submitting_lab
        )
    }
}

impl Display for AssertionRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_string())
    }
}
