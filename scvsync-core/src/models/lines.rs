use std::fmt::{self, Display};

///
/// A create (no accession) or update (with accession) of one laboratory's classification.
///
#[derive(Eq, PartialEq, Hash, Debug, Clone)]
pub struct VariantLine {
    pub lab: String,
    pub transcript: String,
    pub cdna: String,
    pub gene: String,
    /// Classification as the laboratory reported it in the consensus table.
    pub classification: String,
    pub accession: Option<String>,
}

impl VariantLine {
    /// `transcript:cdna`
    pub fn hgvs(&self) -> String {
        format!("{}:{}", self.transcript, self.cdna)
    }

    pub fn is_update(&self) -> bool {
        self.accession.is_some()
    }
}

///
/// Why an accession is retracted. The two reasons call for different follow-up by an
/// operator and are never merged.
///
#[derive(Eq, PartialEq, Hash, Debug, Clone, Copy, PartialOrd, Ord)]
pub enum DeleteReason {
    /// ClinVar has the accession but no local variant matches its notation.
    NoLocalVariant,
    /// The accession was linked to a local variant that is not in the current consensus.
    NotInConsensus,
}

impl Display for DeleteReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeleteReason::NoLocalVariant => write!(f, "unmappable: no local variant"),
            DeleteReason::NotInConsensus => {
                write!(f, "unmappable: not present in current consensus")
            }
        }
    }
}

#[derive(Eq, PartialEq, Hash, Debug, Clone)]
pub struct DeleteLine {
    pub accession_id: String,
    pub lab: String,
    pub reason: DeleteReason,
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::*;

    #[rstest]
    fn test_hgvs() {
        let line = VariantLine {
            lab: "LabA".to_string(),
            transcript: "NM_01.1".to_string(),
            cdna: "c.1A>T".to_string(),
            gene: "GENE1".to_string(),
            classification: "VUS".to_string(),
            accession: None,
        };
        assert_eq!(line.hgvs(), "NM_01.1:c.1A>T");
        assert!(!line.is_update());
    }

    #[rstest]
    fn test_delete_reasons_are_distinct() {
        assert_ne!(
            DeleteReason::NoLocalVariant.to_string(),
            DeleteReason::NotInConsensus.to_string()
        );
        assert_eq!(
            DeleteReason::NotInConsensus.to_string(),
            "unmappable: not present in current consensus"
        );
    }
}
