use std::fmt::{self, Display};

///
/// An accession that was linked to a laboratory's local variant.
///
#[derive(Eq, PartialEq, Hash, Debug, Clone)]
pub struct SuccessMapping {
    pub accession_id: String,
    /// Coordinate-scheme identity of the matched local variant.
    pub canonical_identity: String,
    pub submitting_lab: String,
    pub cdna_notation: String,
}

#[derive(Eq, PartialEq, Hash, Debug, Clone, Copy)]
pub enum UnmappedReason {
    /// The notation was well formed but no local table has its transcript key.
    NoLocalVariant,
    /// The notation lists several transcripts or changes.
    AmbiguousNotation,
    /// The notation is empty or has no `transcript:change` shape.
    MalformedNotation,
}

impl Display for UnmappedReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnmappedReason::NoLocalVariant => {
                write!(f, "no local variant matches this accession's cDNA notation")
            }
            UnmappedReason::AmbiguousNotation => write!(f, "ambiguous cDNA notation"),
            UnmappedReason::MalformedNotation => write!(f, "malformed cDNA notation"),
        }
    }
}

///
/// An accession ClinVar knows about that could not be linked to any local variant.
///
#[derive(Eq, PartialEq, Hash, Debug, Clone)]
pub struct UnmappedAccession {
    pub accession_id: String,
    pub submitting_lab: String,
    pub reason: UnmappedReason,
}

///
/// Result of joining one assertion against the local variant tables.
///
#[derive(Eq, PartialEq, Hash, Debug, Clone)]
pub enum AccessionMapping {
    Success(SuccessMapping),
    Unmapped(UnmappedAccession),
}

impl AccessionMapping {
    pub fn accession_id(&self) -> &str {
        match self {
            AccessionMapping::Success(m) => &m.accession_id,
            AccessionMapping::Unmapped(m) => &m.accession_id,
        }
    }

    pub fn submitting_lab(&self) -> &str {
        match self {
            AccessionMapping::Success(m) => &m.submitting_lab,
            AccessionMapping::Unmapped(m) => &m.submitting_lab,
        }
    }
}
