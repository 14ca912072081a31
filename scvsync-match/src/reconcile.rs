use fxhash::FxHashSet as HashSet;

use scvsync_core::labs::LabRegistry;
use scvsync_core::layout::ConsensusLayout;
use scvsync_core::models::{
    AccessionMapping, ConsensusRow, DeleteLine, DeleteReason, LabSubmission, VariantLine,
};
use scvsync_core::CoreError;

use crate::error::Result;
use crate::index::AccessionIndex;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReconcileOptions {
    /// Consensus classifications whose rows are left out entirely (e.g. `No Consensus`).
    pub exclusions: Vec<String>,
}

impl ReconcileOptions {
    pub fn new(exclusions: Vec<String>) -> Self {
        ReconcileOptions { exclusions }
    }

    pub fn is_excluded(&self, classification: &str) -> bool {
        self.exclusions.iter().any(|excluded| excluded == classification)
    }
}

///
/// Per-laboratory submissions, in registry order, plus the accessions attached to at
/// least one variant line.
///
#[derive(Debug, Clone, Default)]
pub struct ReconcileOutcome {
    pub submissions: Vec<LabSubmission>,
    pub used: HashSet<String>,
}

impl ReconcileOutcome {
    pub fn submission(&self, lab: &str) -> Result<&LabSubmission> {
        self.submissions
            .iter()
            .find(|submission| submission.lab == lab)
            .ok_or_else(|| CoreError::UnknownLaboratory(lab.to_string()).into())
    }

    pub fn total_variants(&self) -> usize {
        self.submissions.iter().map(|s| s.variants.len()).sum()
    }

    pub fn total_deletes(&self) -> usize {
        self.submissions.iter().map(|s| s.deletes.len()).sum()
    }
}

///
/// Turn the consensus rows into per-laboratory variant lines, attach known accessions,
/// and retract every accession of a laboratory that ended up attached to nothing.
///
/// # Arguments
/// - index: mapped assertions
/// - rows: consensus data rows, header already dropped
/// - registry: laboratories, visited in order
/// - layout: column offsets of the consensus table
/// - options: exclusion list
pub fn reconcile(
    index: &AccessionIndex,
    rows: &[ConsensusRow],
    registry: &LabRegistry,
    layout: &ConsensusLayout,
    options: &ReconcileOptions,
) -> Result<ReconcileOutcome> {
    let mut submissions: Vec<LabSubmission> = registry.iter().map(LabSubmission::new).collect();
    let mut used: HashSet<String> = HashSet::default();
    let (mut excluded, mut rejected) = (0, 0);

    for row in rows {
        if options.is_excluded(row.classification(layout)) {
            excluded += 1;
            continue;
        }

        let identity = row.coordinate_key(layout);
        for (lab, submission) in registry.iter().zip(submissions.iter_mut()) {
            let Some(entry) = row.lab_entry(lab, layout) else {
                continue;
            };
            if !entry.is_submittable() {
                log::debug!(
                    "{}: skipping {} ({}:{}), needs exactly one transcript and change",
                    lab.short_code,
                    identity,
                    entry.transcript,
                    entry.cdna
                );
                rejected += 1;
                continue;
            }

            let accession = index.find(&identity, &lab.name).map(|success| {
                used.insert(success.accession_id.clone());
                success.accession_id.clone()
            });

            submission.variants.push(VariantLine {
                lab: lab.name.clone(),
                transcript: entry.transcript.to_string(),
                cdna: entry.cdna.to_string(),
                gene: row.gene(layout).to_string(),
                classification: entry.classification.to_string(),
                accession,
            });
        }
    }

    log::info!(
        "Reconciled {} consensus rows ({} excluded, {} lab entries rejected)",
        rows.len(),
        excluded,
        rejected
    );

    for submission in submissions.iter_mut() {
        let mappings: Vec<&AccessionMapping> = index.for_lab(&submission.lab).collect();

        for mapping in &mappings {
            if let AccessionMapping::Unmapped(unmapped) = mapping {
                submission.deletes.push(DeleteLine {
                    accession_id: unmapped.accession_id.clone(),
                    lab: submission.lab.clone(),
                    reason: DeleteReason::NoLocalVariant,
                });
            }
        }
        for mapping in &mappings {
            if let AccessionMapping::Success(success) = mapping
                && !used.contains(&success.accession_id)
            {
                submission.deletes.push(DeleteLine {
                    accession_id: success.accession_id.clone(),
                    lab: submission.lab.clone(),
                    reason: DeleteReason::NotInConsensus,
                });
            }
        }

        log::info!(
            "{}: {} variant lines ({} updates), {} deletes",
            submission.short_code,
            submission.variants.len(),
            submission.updates().count(),
            submission.deletes.len()
        );
    }

    Ok(ReconcileOutcome { submissions, used })
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::*;
    use scvsync_core::labs::Laboratory;
    use scvsync_core::consts::TSV_DELIMITER;
    use scvsync_core::models::{AssertionRecord, LocalVariantRecord};

    use crate::error::MatchError;
    use crate::index::LocalVariants;

    // consensus columns: chrom 1, start 2, stop 3, ref 4, alt 5, gene 6, cdna 7,
    // transcript 8, consensus class 9, LabA class 10, LabB class 11
    fn layout() -> ConsensusLayout {
        ConsensusLayout {
            classification: 9,
            ..Default::default()
        }
    }

    fn registry() -> LabRegistry {
        LabRegistry::new(vec![
            Laboratory::new("LabA", "LABA", "vkgl_laba.tsv", 10),
            Laboratory::new("LabB", "LABB", "vkgl_labb.tsv", 11),
        ])
        .unwrap()
    }

    fn row(pos: &str, cdna: &str, consensus: &str, lab_a: &str, lab_b: &str) -> ConsensusRow {
        ConsensusRow::from_line(
            &[
                "id", "1", pos, pos, "A", "T", "GENE1", cdna, "NM_000001.2", consensus, lab_a, lab_b,
            ]
            .join(TSV_DELIMITER),
        )
    }

    fn local_variant(pos: &str, cdna: &str) -> LocalVariantRecord {
        LocalVariantRecord {
            chrom: "1".to_string(),
            start: pos.to_string(),
            stop: pos.to_string(),
            ref_allele: "A".to_string(),
            alt: "T".to_string(),
            gene: "GENE1".to_string(),
            transcript: "NM_000001.2".to_string(),
            cdna_notation: cdna.to_string(),
        }
    }

    fn assertion(notation: &str, accession: &str, lab: &str) -> AssertionRecord {
        AssertionRecord {
            cdna_notation: notation.to_string(),
            accession_id: accession.to_string(),
            gene: "GENE1".to_string(),
            classification: "Benign".to_string(),
            submitting_lab: lab.to_string(),
        }
    }

    fn index(assertions: &[AssertionRecord]) -> AccessionIndex {
        let local: LocalVariants = [
            local_variant("100", "c.100A>T"),
            local_variant("200", "c.200A>T"),
        ]
        .into_iter()
        .collect();
        AccessionIndex::build(assertions, &local, &registry()).unwrap()
    }

    #[rstest]
    fn test_unmatched_row_is_a_create() {
        let outcome = reconcile(
            &index(&[]),
            &[row("100", "c.100A>T", "Benign", "B", "")],
            &registry(),
            &layout(),
            &ReconcileOptions::default(),
        )
        .unwrap();

        let lab_a = outcome.submission("LabA").unwrap();
        assert_eq!(
            lab_a.variants,
            vec![VariantLine {
                lab: "LabA".to_string(),
                transcript: "NM_000001.2".to_string(),
                cdna: "c.100A>T".to_string(),
                gene: "GENE1".to_string(),
                classification: "B".to_string(),
                accession: None,
            }]
        );
        assert!(lab_a.deletes.is_empty());
        assert!(outcome.submission("LabB").unwrap().variants.is_empty());
    }

    #[rstest]
    fn test_matched_row_is_an_update() {
        let outcome = reconcile(
            &index(&[assertion("NM_000001.3:c.100A>T", "SCV1", "LabA")]),
            &[row("100", "c.100A>T", "Benign", "B", "LB")],
            &registry(),
            &layout(),
            &ReconcileOptions::default(),
        )
        .unwrap();

        let lab_a = outcome.submission("LabA").unwrap();
        assert_eq!(lab_a.variants[0].accession.as_deref(), Some("SCV1"));
        assert!(outcome.used.contains("SCV1"));

        // the accession belongs to LabA only
        let lab_b = outcome.submission("LabB").unwrap();
        assert_eq!(lab_b.variants[0].accession, None);
    }

    #[rstest]
    fn test_unmapped_accession_is_deleted() {
        let outcome = reconcile(
            &index(&[assertion("NM_000001.2:c.999A>T", "SCV9", "LabB")]),
            &[],
            &registry(),
            &layout(),
            &ReconcileOptions::default(),
        )
        .unwrap();

        assert_eq!(
            outcome.submission("LabB").unwrap().deletes,
            vec![DeleteLine {
                accession_id: "SCV9".to_string(),
                lab: "LabB".to_string(),
                reason: DeleteReason::NoLocalVariant,
            }]
        );
    }

    #[rstest]
    fn test_excluded_row_retracts_its_accession() {
        let outcome = reconcile(
            &index(&[assertion("NM_000001.2:c.200A>T", "SCV2", "LabA")]),
            &[
                row("100", "c.100A>T", "Benign", "B", ""),
                row("200", "c.200A>T", "No Consensus", "B", "P"),
            ],
            &registry(),
            &layout(),
            &ReconcileOptions::new(vec!["No Consensus".to_string()]),
        )
        .unwrap();

        let lab_a = outcome.submission("LabA").unwrap();
        assert_eq!(lab_a.variants.len(), 1);
        assert_eq!(lab_a.variants[0].cdna, "c.100A>T");
        assert_eq!(
            lab_a.deletes,
            vec![DeleteLine {
                accession_id: "SCV2".to_string(),
                lab: "LabA".to_string(),
                reason: DeleteReason::NotInConsensus,
            }]
        );
        assert!(outcome.submission("LabB").unwrap().variants.is_empty());
    }

    #[rstest]
    #[case("c.100A>T,c.101A>T")]
    #[case("")]
    fn test_unsubmittable_entries_rejected(#[case] cdna: &str) {
        let outcome = reconcile(
            &index(&[]),
            &[row("100", cdna, "Benign", "B", "B")],
            &registry(),
            &layout(),
            &ReconcileOptions::default(),
        )
        .unwrap();

        assert_eq!(outcome.total_variants(), 0);
    }

    #[rstest]
    fn test_first_match_wins_and_others_are_retracted() {
        let outcome = reconcile(
            &index(&[
                assertion("NM_000001.2:c.100A>T", "SCV1", "LabA"),
                assertion("NM_000001.1:c.100A>T", "SCV2", "LabA"),
            ]),
            &[
                row("100", "c.100A>T", "Benign", "B", ""),
                row("100", "c.100A>T", "Benign", "LB", ""),
            ],
            &registry(),
            &layout(),
            &ReconcileOptions::default(),
        )
        .unwrap();

        let lab_a = outcome.submission("LabA").unwrap();
        assert_eq!(lab_a.variants.len(), 2);
        assert!(
            lab_a
                .variants
                .iter()
                .all(|line| line.accession.as_deref() == Some("SCV1"))
        );
        assert_eq!(lab_a.deletes.len(), 1);
        assert_eq!(lab_a.deletes[0].accession_id, "SCV2");
        assert_eq!(lab_a.deletes[0].reason, DeleteReason::NotInConsensus);
    }

    #[rstest]
    fn test_every_accession_is_attached_or_deleted() {
        let assertions = [
            assertion("NM_000001.2:c.100A>T", "SCV1", "LabA"),
            assertion("NM_000001.2:c.200A>T", "SCV2", "LabA"),
            assertion("NM_000001.2:c.300A>T", "SCV3", "LabB"),
            assertion("NM_000001.2:c.100A>T,c.1A>T", "SCV4", "LabB"),
            assertion("NM_000001.2:c.100A>T", "SCV5", "LabB"),
        ];
        let outcome = reconcile(
            &index(&assertions),
            &[
                row("100", "c.100A>T", "Benign", "B", ""),
                row("200", "c.200A>T", "No Consensus", "B", ""),
            ],
            &registry(),
            &layout(),
            &ReconcileOptions::new(vec!["No Consensus".to_string()]),
        )
        .unwrap();

        for record in &assertions {
            let submission = outcome.submission(&record.submitting_lab).unwrap();
            let attached = submission
                .variants
                .iter()
                .any(|line| line.accession.as_deref() == Some(record.accession_id.as_str()));
            let deleted = submission
                .deletes
                .iter()
                .filter(|line| line.accession_id == record.accession_id)
                .count();

            assert!(
                attached ^ (deleted == 1),
                "{} attached={} deleted={}",
                record.accession_id,
                attached,
                deleted
            );
        }
    }

    #[rstest]
    fn test_unknown_lab_lookup() {
        let outcome = reconcile(
            &index(&[]),
            &[],
            &registry(),
            &layout(),
            &ReconcileOptions::default(),
        )
        .unwrap();

        assert!(matches!(
            outcome.submission("LabZ"),
            Err(MatchError::Laboratory(CoreError::UnknownLaboratory(_)))
        ));
    }
}
