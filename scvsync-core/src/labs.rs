use fxhash::FxHashSet as HashSet;
use serde::{Deserialize, Serialize};

use crate::errors::{CoreError, Result};
use crate::layout::ConsensusLayout;

///
/// A participating laboratory.
///
/// `name` is the submitter name exactly as ClinVar reports it; it is the key every
/// lookup goes through. `short_code` only shows up in output file names.
///
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Laboratory {
    pub name: String,
    pub short_code: String,
    /// File name of the laboratory's local variant table, relative to the local table directory.
    pub local_table: String,
    /// Consensus column holding this laboratory's classification.
    pub classification_column: usize,
    /// Overrides the shared consensus cDNA column.
    #[serde(default)]
    pub cdna_column: Option<usize>,
    /// Overrides the shared consensus transcript column.
    #[serde(default)]
    pub transcript_column: Option<usize>,
}

impl Laboratory {
    pub fn new(name: &str, short_code: &str, local_table: &str, classification_column: usize) -> Self {
        Laboratory {
            name: name.to_string(),
            short_code: short_code.to_string(),
            local_table: local_table.to_string(),
            classification_column,
            cdna_column: None,
            transcript_column: None,
        }
    }

    pub fn cdna_column(&self, layout: &ConsensusLayout) -> usize {
        self.cdna_column.unwrap_or(layout.cdna)
    }

    pub fn transcript_column(&self, layout: &ConsensusLayout) -> usize {
        self.transcript_column.unwrap_or(layout.transcript)
    }
}

///
/// Ordered set of known laboratories. Order is the order laboratories are visited in
/// everywhere in the pipeline; it never changes output content, only the order files are
/// written in.
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabRegistry {
    labs: Vec<Laboratory>,
}

impl LabRegistry {
    pub fn new(labs: Vec<Laboratory>) -> Result<Self> {
        if labs.is_empty() {
            return Err(CoreError::EmptyRegistry);
        }

        let mut names: HashSet<&str> = HashSet::default();
        let mut codes: HashSet<&str> = HashSet::default();
        for lab in &labs {
            if !names.insert(lab.name.as_str()) {
                return Err(CoreError::DuplicateLaboratory(lab.name.clone()));
            }
            if !codes.insert(lab.short_code.as_str()) {
                return Err(CoreError::DuplicateLaboratory(lab.short_code.clone()));
            }
        }

        Ok(LabRegistry { labs })
    }

    ///
    /// Look a laboratory up by its ClinVar submitter name.
    ///
    pub fn get(&self, name: &str) -> Result<&Laboratory> {
        self.labs
            .iter()
            .find(|lab| lab.name == name)
            .ok_or_else(|| CoreError::UnknownLaboratory(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.labs.iter().any(|lab| lab.name == name)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Laboratory> {
        self.labs.iter()
    }

    pub fn len(&self) -> usize {
        self.labs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labs.is_empty()
    }
}

impl<'a> IntoIterator for &'a LabRegistry {
    type Item = &'a Laboratory;
    type IntoIter = std::slice::Iter<'a, Laboratory>;

    fn into_iter(self) -> Self::IntoIter {
        self.labs.iter()
    }
}

impl Default for LabRegistry {
    ///
    /// The eight laboratories of the consortium with their consensus columns.
    ///
    fn default() -> Self {
        LabRegistry {
            labs: vec![
                Laboratory::new("LUMC", "LUMC", "vkgl_lumc.tsv", 13),
                Laboratory::new("AMC", "AMC", "vkgl_amc.tsv", 15),
                Laboratory::new("NKI", "NKI", "vkgl_nki.tsv", 17),
                Laboratory::new(
                    "Genome Diagnostics Laboratory,VU University Medical Center Amsterdam",
                    "VU",
                    "vkgl_vumc.tsv",
                    19,
                ),
                Laboratory::new(
                    "Diagnostic Laboratory, Department of Genetics,University Medical Center Groningen",
                    "UMCG",
                    "vkgl_umcg.tsv",
                    21,
                ),
                Laboratory::new(
                    "Genome Diagnostics Laboratory,University Medical Center Utrecht",
                    "UMCU",
                    "vkgl_umcu.tsv",
                    23,
                ),
                Laboratory::new("Radboud", "RADBOUD_MUMC", "vkgl_radboud_mumc.tsv", 25),
                Laboratory::new(
                    "DNA and Cytogenetics Diagnostics Unit,Erasmus Medical Center",
                    "ERASMUS",
                    "vkgl_erasmus.tsv",
                    27,
                ),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::*;

    #[fixture]
    fn registry() -> LabRegistry {
        LabRegistry::default()
    }

    #[rstest]
    fn test_default_registry_has_all_labs(registry: LabRegistry) {
        assert_eq!(registry.len(), 8);
        let codes: Vec<&str> = registry.iter().map(|l| l.short_code.as_str()).collect();
        assert_eq!(
            codes,
            vec!["LUMC", "AMC", "NKI", "VU", "UMCG", "UMCU", "RADBOUD_MUMC", "ERASMUS"]
        );
    }

    #[rstest]
    fn test_lookup_by_submitter_name(registry: LabRegistry) {
        let lab = registry.get("Radboud").unwrap();
        assert_eq!(lab.short_code, "RADBOUD_MUMC");
        assert_eq!(lab.classification_column, 25);
    }

    #[rstest]
    fn test_unknown_lab_is_an_error(registry: LabRegistry) {
        let result = registry.get("Nowhere Hospital");
        assert!(matches!(result, Err(CoreError::UnknownLaboratory(name)) if name == "Nowhere Hospital"));
    }

    #[rstest]
    fn test_column_overrides() {
        let layout = ConsensusLayout::default();
        let mut lab = Laboratory::new("LabA", "A", "a.tsv", 13);
        assert_eq!(lab.cdna_column(&layout), 7);
        assert_eq!(lab.transcript_column(&layout), 8);

        lab.cdna_column = Some(30);
        lab.transcript_column = Some(31);
        assert_eq!(lab.cdna_column(&layout), 30);
        assert_eq!(lab.transcript_column(&layout), 31);
    }

    #[rstest]
    fn test_duplicate_labs_rejected() {
        let result = LabRegistry::new(vec![
            Laboratory::new("LabA", "A", "a.tsv", 13),
            Laboratory::new("LabA", "B", "b.tsv", 15),
        ]);
        assert!(matches!(result, Err(CoreError::DuplicateLaboratory(_))));
    }

    #[rstest]
    fn test_duplicate_short_codes_rejected() {
        let result = LabRegistry::new(vec![
            Laboratory::new("LabA", "LAB", "a.tsv", 13),
            Laboratory::new("LabB", "LAB", "b.tsv", 15),
        ]);
        assert!(matches!(result, Err(CoreError::DuplicateLaboratory(code)) if code == "LAB"));
    }

    #[rstest]
    fn test_empty_registry_rejected() {
        assert!(matches!(LabRegistry::new(vec![]), Err(CoreError::EmptyRegistry)));
    }
}
