use crate::consts::TSV_DELIMITER;
use crate::identity::{coordinate_key, is_ambiguous};
use crate::labs::Laboratory;
use crate::layout::ConsensusLayout;

///
/// One data row of the multi-laboratory consensus table, kept as raw fields since the
/// columns that matter are only known through a [ConsensusLayout].
///
#[derive(Eq, PartialEq, Debug, Clone, Default)]
pub struct ConsensusRow {
    pub fields: Vec<String>,
}

///
/// What a single laboratory contributes to a consensus row.
///
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub struct LabEntry<'a> {
    pub classification: &'a str,
    pub cdna: &'a str,
    pub transcript: &'a str,
}

impl LabEntry<'_> {
    ///
    /// An entry can only be submitted when it names exactly one transcript and one change.
    ///
    pub fn is_submittable(&self) -> bool {
        !self.cdna.is_empty()
            && !self.transcript.is_empty()
            && !is_ambiguous(self.cdna)
            && !is_ambiguous(self.transcript)
    }
}

impl ConsensusRow {
    pub fn from_line(line: &str) -> Self {
        ConsensusRow {
            fields: line.split(TSV_DELIMITER).map(|s| s.to_string()).collect(),
        }
    }

    /// Field at `idx`, empty when the row is shorter.
    pub fn get(&self, idx: usize) -> &str {
        self.fields.get(idx).map(String::as_str).unwrap_or("")
    }

    pub fn gene(&self, layout: &ConsensusLayout) -> &str {
        self.get(layout.gene)
    }

    /// The consensus classification shared by all laboratories.
    pub fn classification(&self, layout: &ConsensusLayout) -> &str {
        self.get(layout.classification)
    }

    /// Coordinate-scheme identity, comparable with local variant records.
    pub fn coordinate_key(&self, layout: &ConsensusLayout) -> String {
        coordinate_key(
            self.get(layout.chrom),
            self.get(layout.start),
            self.get(layout.stop),
            self.get(layout.ref_allele),
            self.get(layout.alt),
            self.get(layout.gene),
        )
    }

    ///
    /// The laboratory's contribution to this row; `None` when the laboratory did not
    /// classify the variant.
    ///
    pub fn lab_entry(&self, lab: &Laboratory, layout: &ConsensusLayout) -> Option<LabEntry<'_>> {
        let classification = self.get(lab.classification_column);
        if classification.is_empty() {
            return None;
        }

        Some(LabEntry {
            classification,
            cdna: self.get(lab.cdna_column(layout)),
            transcript: self.get(lab.transcript_column(layout)),
        })
    }
}

impl From<Vec<String>> for ConsensusRow {
    fn from(fields: Vec<String>) -> Self {
        ConsensusRow { fields }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::*;

    fn row(lab_a: &str, cdna: &str, transcript: &str) -> ConsensusRow {
        let mut fields = vec![""; 14];
        fields[1] = "chr1";
        fields[2] = "100";
        fields[3] = "100";
        fields[4] = "A";
        fields[5] = "T";
        fields[6] = "GENE1";
        fields[7] = cdna;
        fields[8] = transcript;
        fields[11] = "Classified";
        fields[13] = lab_a;
        ConsensusRow::from_line(&fields.join(TSV_DELIMITER))
    }

    #[fixture]
    fn lab() -> Laboratory {
        Laboratory::new("LabA", "A", "vkgl_a.tsv", 13)
    }

    #[rstest]
    fn test_coordinate_key() {
        let layout = ConsensusLayout::default();
        let r = row("VUS", "c.1A>T", "NM_01.1");
        assert_eq!(r.coordinate_key(&layout), "chr1_100_100_A_T_GENE1");
        assert_eq!(r.classification(&layout), "Classified");
        assert_eq!(r.gene(&layout), "GENE1");
    }

    #[rstest]
    fn test_lab_entry(lab: Laboratory) {
        let layout = ConsensusLayout::default();
        let r = row("VUS", "c.1A>T", "NM_01.1");
        let entry = r.lab_entry(&lab, &layout).unwrap();
        assert_eq!(entry.classification, "VUS");
        assert_eq!(entry.cdna, "c.1A>T");
        assert_eq!(entry.transcript, "NM_01.1");
        assert!(entry.is_submittable());
    }

    #[rstest]
    fn test_no_entry_without_classification(lab: Laboratory) {
        let layout = ConsensusLayout::default();
        assert_eq!(row("", "c.1A>T", "NM_01.1").lab_entry(&lab, &layout), None);
    }

    #[rstest]
    #[case("", "NM_01.1")]
    #[case("c.1A>T", "")]
    #[case("c.1A>T,c.2A>T", "NM_01.1")]
    #[case("c.1A>T", "NM_01.1,NM_02.1")]
    fn test_unsubmittable_entries(lab: Laboratory, #[case] cdna: &str, #[case] transcript: &str) {
        let layout = ConsensusLayout::default();
        let r = row("VUS", cdna, transcript);
        let entry = r.lab_entry(&lab, &layout).unwrap();
        assert!(!entry.is_submittable());
    }

    #[rstest]
    fn test_short_row_reads_empty() {
        let r = ConsensusRow::from_line("id\tchr1");
        assert_eq!(r.get(1), "chr1");
        assert_eq!(r.get(27), "");
    }
}
