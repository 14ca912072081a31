use std::path::Path;

use fxhash::FxHashMap as HashMap;

use scvsync_core::identity::{is_ambiguous, notation_transcript_key};
use scvsync_core::labs::LabRegistry;
use scvsync_core::layout::LocalTableLayout;
use scvsync_core::models::{
    AccessionMapping, AssertionRecord, LocalVariantRecord, SuccessMapping, UnmappedAccession,
    UnmappedReason,
};
use scvsync_core::CoreError;
use scvsync_io::read_local_table;

use crate::error::Result;

///
/// Local variants of all laboratories keyed by their transcript-scheme identity.
/// When two rows share a key the one inserted last wins.
///
#[derive(Debug, Default, Clone)]
pub struct LocalVariants {
    by_transcript_key: HashMap<String, LocalVariantRecord>,
}

impl LocalVariants {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, record: LocalVariantRecord) {
        self.by_transcript_key.insert(record.transcript_key(), record);
    }

    pub fn get(&self, transcript_key: &str) -> Option<&LocalVariantRecord> {
        self.by_transcript_key.get(transcript_key)
    }

    pub fn len(&self) -> usize {
        self.by_transcript_key.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_transcript_key.is_empty()
    }

    ///
    /// Load the local table of every registered laboratory from `dir`, in registry order.
    /// Any unreadable table aborts the load.
    ///
    /// # Arguments
    /// - dir: directory holding the tables named in the registry
    /// - registry: laboratories to load
    /// - layout: column offsets of the local tables
    pub fn from_dir(dir: &Path, registry: &LabRegistry, layout: &LocalTableLayout) -> Result<Self> {
        let mut variants = LocalVariants::new();
        let mut rows = 0;

        for lab in registry {
            let records = read_local_table(&dir.join(&lab.local_table), layout)?;
            rows += records.len();
            variants.extend(records);
        }

        log::info!(
            "Loaded {} local variants ({} distinct transcript keys)",
            rows,
            variants.len()
        );

        Ok(variants)
    }
}

impl Extend<LocalVariantRecord> for LocalVariants {
    fn extend<T: IntoIterator<Item = LocalVariantRecord>>(&mut self, iter: T) {
        for record in iter {
            self.insert(record);
        }
    }
}

impl FromIterator<LocalVariantRecord> for LocalVariants {
    fn from_iter<T: IntoIterator<Item = LocalVariantRecord>>(iter: T) -> Self {
        let mut variants = LocalVariants::new();
        variants.extend(iter);
        variants
    }
}

///
/// Join one assertion against the local variants.
///
/// Notations listing several alternatives, or without a `transcript:change` shape, are
/// never looked up.
///
pub fn map_assertion(
    record: &AssertionRecord,
    local: &LocalVariants,
    registry: &LabRegistry,
) -> Result<AccessionMapping> {
    if !registry.contains(&record.submitting_lab) {
        return Err(CoreError::UnknownLaboratory(record.submitting_lab.clone()).into());
    }

    let unmapped = |reason: UnmappedReason| {
        log::debug!("{}: {} ({})", record.accession_id, reason, record.cdna_notation);
        AccessionMapping::Unmapped(UnmappedAccession {
            accession_id: record.accession_id.clone(),
            submitting_lab: record.submitting_lab.clone(),
            reason,
        })
    };

    if is_ambiguous(&record.cdna_notation) {
        return Ok(unmapped(UnmappedReason::AmbiguousNotation));
    }
    let Some(key) = notation_transcript_key(&record.cdna_notation) else {
        return Ok(unmapped(UnmappedReason::MalformedNotation));
    };

    match local.get(&key) {
        Some(variant) => Ok(AccessionMapping::Success(SuccessMapping {
            accession_id: record.accession_id.clone(),
            canonical_identity: variant.coordinate_key(),
            submitting_lab: record.submitting_lab.clone(),
            cdna_notation: record.cdna_notation.clone(),
        })),
        None => Ok(unmapped(UnmappedReason::NoLocalVariant)),
    }
}

///
/// Every assertion mapped to a local variant or marked unmapped, in assertion order,
/// with a lookup from (coordinate identity, laboratory) to the successful mappings.
///
#[derive(Debug, Default, Clone)]
pub struct AccessionIndex {
    mappings: Vec<AccessionMapping>,
    successes: HashMap<(String, String), Vec<usize>>,
}

impl AccessionIndex {
    ///
    /// Map every assertion. An assertion from an unregistered laboratory is an error.
    ///
    pub fn build(
        assertions: &[AssertionRecord],
        local: &LocalVariants,
        registry: &LabRegistry,
    ) -> Result<Self> {
        let mut index = AccessionIndex::default();

        for record in assertions {
            let mapping = map_assertion(record, local, registry)?;
            index.push(mapping);
        }

        log::info!(
            "Mapped {} accessions: {} to a local variant, {} unmapped",
            index.len(),
            index.successes().count(),
            index.unmapped().count()
        );

        Ok(index)
    }

    ///
    /// Load the local tables from `dir`, then map the assertions.
    ///
    pub fn from_dir(
        dir: &Path,
        assertions: &[AssertionRecord],
        registry: &LabRegistry,
        layout: &LocalTableLayout,
    ) -> Result<Self> {
        let local = LocalVariants::from_dir(dir, registry, layout)?;
        AccessionIndex::build(assertions, &local, registry)
    }

    fn push(&mut self, mapping: AccessionMapping) {
        if let AccessionMapping::Success(success) = &mapping {
            let key = (
                success.canonical_identity.clone(),
                success.submitting_lab.clone(),
            );
            let positions = self.successes.entry(key).or_default();
            if let Some(&first) = positions.first() {
                log::warn!(
                    "{} and {} both map to {} for {}; only {} will be attached",
                    self.mappings[first].accession_id(),
                    success.accession_id,
                    success.canonical_identity,
                    success.submitting_lab,
                    self.mappings[first].accession_id(),
                );
            }
            positions.push(self.mappings.len());
        }
        self.mappings.push(mapping);
    }

    ///
    /// First successful mapping, in assertion order, with this coordinate identity and
    /// submitting laboratory.
    ///
    pub fn find(&self, identity: &str, lab: &str) -> Option<&SuccessMapping> {
        let positions = self
            .successes
            .get(&(identity.to_string(), lab.to_string()))?;

        positions
            .iter()
            .find_map(|&position| match &self.mappings[position] {
                AccessionMapping::Success(success) => Some(success),
                AccessionMapping::Unmapped(_) => None,
            })
    }

    pub fn successes(&self) -> impl Iterator<Item = &SuccessMapping> {
        self.mappings.iter().filter_map(|mapping| match mapping {
            AccessionMapping::Success(success) => Some(success),
            AccessionMapping::Unmapped(_) => None,
        })
    }

    pub fn unmapped(&self) -> impl Iterator<Item = &UnmappedAccession> {
        self.mappings.iter().filter_map(|mapping| match mapping {
            AccessionMapping::Unmapped(unmapped) => Some(unmapped),
            AccessionMapping::Success(_) => None,
        })
    }

    /// Mappings submitted by one laboratory, in assertion order.
    pub fn for_lab<'a>(&'a self, lab: &'a str) -> impl Iterator<Item = &'a AccessionMapping> {
        self.mappings
            .iter()
            .filter(move |mapping| mapping.submitting_lab() == lab)
    }

    pub fn len(&self) -> usize {
        self.mappings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mappings.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::path::PathBuf;

    use pretty_assertions::assert_eq;
    use rstest::*;
    use scvsync_core::labs::Laboratory;

    use crate::error::MatchError;

    fn get_test_path(file_name: &str) -> PathBuf {
        std::env::current_dir()
            .unwrap()
            .join("../tests/data")
            .join(file_name)
    }

    fn local_variant(pos: &str, transcript: &str, cdna: &str) -> LocalVariantRecord {
        LocalVariantRecord {
            chrom: "1".to_string(),
            start: pos.to_string(),
            stop: pos.to_string(),
            ref_allele: "A".to_string(),
            alt: "T".to_string(),
            gene: "GENE1".to_string(),
            transcript: transcript.to_string(),
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

    #[fixture]
    fn registry() -> LabRegistry {
        LabRegistry::new(vec![
            Laboratory::new("LabA", "LABA", "vkgl_laba.tsv", 13),
            Laboratory::new("LabB", "LABB", "vkgl_labb.tsv", 15),
        ])
        .unwrap()
    }

    #[fixture]
    fn local() -> LocalVariants {
        [local_variant("100", "NM_000001.2", "c.100A>T")]
            .into_iter()
            .collect()
    }

    #[rstest]
    fn test_success_ignores_transcript_version(local: LocalVariants, registry: LabRegistry) {
        let mapping = map_assertion(
            &assertion("NM_000001.3:c.100A>T", "SCV1", "LabA"),
            &local,
            &registry,
        )
        .unwrap();

        assert_eq!(
            mapping,
            AccessionMapping::Success(SuccessMapping {
                accession_id: "SCV1".to_string(),
                canonical_identity: "1_100_100_A_T_GENE1".to_string(),
                submitting_lab: "LabA".to_string(),
                cdna_notation: "NM_000001.3:c.100A>T".to_string(),
            })
        );
    }

    #[rstest]
    #[case("NM_000009.1:c.9A>T", UnmappedReason::NoLocalVariant)]
    #[case("NM_000001.2:c.100A>T,NM_000001.2:c.101A>T", UnmappedReason::AmbiguousNotation)]
    #[case("NM_000001.2", UnmappedReason::MalformedNotation)]
    #[case("", UnmappedReason::MalformedNotation)]
    fn test_unmapped(
        local: LocalVariants,
        registry: LabRegistry,
        #[case] notation: &str,
        #[case] reason: UnmappedReason,
    ) {
        let mapping = map_assertion(&assertion(notation, "SCV1", "LabB"), &local, &registry).unwrap();

        assert_eq!(
            mapping,
            AccessionMapping::Unmapped(UnmappedAccession {
                accession_id: "SCV1".to_string(),
                submitting_lab: "LabB".to_string(),
                reason,
            })
        );
    }

    #[rstest]
    fn test_unknown_lab_is_fatal(local: LocalVariants, registry: LabRegistry) {
        let result = AccessionIndex::build(
            &[
                assertion("NM_000001.2:c.100A>T", "SCV1", "LabA"),
                assertion("NM_000001.2:c.100A>T", "SCV2", "LabZ"),
            ],
            &local,
            &registry,
        );

        assert!(matches!(
            result,
            Err(MatchError::Laboratory(CoreError::UnknownLaboratory(lab))) if lab == "LabZ"
        ));
    }

    #[rstest]
    fn test_later_local_rows_overwrite_earlier() {
        let local: LocalVariants = [
            local_variant("100", "NM_000001.1", "c.100A>T"),
            local_variant("200", "NM_000001.2", "c.100A>T"),
        ]
        .into_iter()
        .collect();

        assert_eq!(local.len(), 1);
        assert_eq!(
            local.get("NM_000001:c.100A>T").unwrap().coordinate_key(),
            "1_200_200_A_T_GENE1"
        );
    }

    #[rstest]
    fn test_find_returns_first_in_assertion_order(local: LocalVariants, registry: LabRegistry) {
        let index = AccessionIndex::build(
            &[
                assertion("NM_000009.1:c.9A>T", "SCV0", "LabA"),
                assertion("NM_000001.2:c.100A>T", "SCV1", "LabA"),
                assertion("NM_000001.1:c.100A>T", "SCV2", "LabA"),
                assertion("NM_000001.2:c.100A>T", "SCV3", "LabB"),
            ],
            &local,
            &registry,
        )
        .unwrap();

        assert_eq!(index.len(), 4);
        assert_eq!(index.successes().count(), 3);
        assert_eq!(index.unmapped().count(), 1);

        let found = index.find("1_100_100_A_T_GENE1", "LabA").unwrap();
        assert_eq!(found.accession_id, "SCV1");
        let found = index.find("1_100_100_A_T_GENE1", "LabB").unwrap();
        assert_eq!(found.accession_id, "SCV3");

        assert!(index.find("1_100_100_A_T_GENE2", "LabA").is_none());
        assert_eq!(index.for_lab("LabB").count(), 1);
    }

    #[rstest]
    fn test_local_variants_from_dir(registry: LabRegistry) {
        let local = LocalVariants::from_dir(
            &get_test_path("pipeline/local"),
            &registry,
            &LocalTableLayout::default(),
        )
        .unwrap();

        assert!(local.get("NM_000001:c.100A>T").is_some());
        assert!(local.get("NM_000002:c.200G>C").is_some());
    }

    #[rstest]
    fn test_missing_local_table_is_fatal() {
        let registry = LabRegistry::new(vec![Laboratory::new(
            "LabA",
            "LABA",
            "vkgl_missing.tsv",
            13,
        )])
        .unwrap();

        let result = LocalVariants::from_dir(
            &get_test_path("pipeline/local"),
            &registry,
            &LocalTableLayout::default(),
        );
        assert!(matches!(result, Err(MatchError::Table(_))));
    }
}
