use serde::{Deserialize, Serialize};

///
/// Zero-based column offsets of the consensus table.
///
/// Per-laboratory classification columns live on [crate::labs::Laboratory]; the
/// offsets here are shared by every laboratory.
///
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct ConsensusLayout {
    pub chrom: usize,
    pub start: usize,
    pub stop: usize,
    #[serde(rename = "ref")]
    pub ref_allele: usize,
    pub alt: usize,
    pub gene: usize,
    pub cdna: usize,
    pub transcript: usize,
    /// Consensus classification shared by all laboratories (e.g. `No Consensus`).
    pub classification: usize,
}

impl Default for ConsensusLayout {
    fn default() -> Self {
        Self {
            chrom: 1,
            start: 2,
            stop: 3,
            ref_allele: 4,
            alt: 5,
            gene: 6,
            cdna: 7,
            transcript: 8,
            classification: 11,
        }
    }
}

///
/// Zero-based column offsets of a laboratory's local variant table.
///
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct LocalTableLayout {
    pub chrom: usize,
    pub start: usize,
    pub stop: usize,
    #[serde(rename = "ref")]
    pub ref_allele: usize,
    pub alt: usize,
    pub gene: usize,
    pub cdna: usize,
    /// Transcript accession including its version.
    pub transcript: usize,
}

impl Default for LocalTableLayout {
    fn default() -> Self {
        Self {
            chrom: 0,
            start: 1,
            stop: 2,
            ref_allele: 3,
            alt: 4,
            gene: 5,
            cdna: 6,
            transcript: 9,
        }
    }
}
