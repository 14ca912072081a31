//! Identity keys.
//!
//! Two independent schemes decide when two records describe "the same" variant:
//!
//! - the *coordinate* scheme (`chrom_start_stop_ref_alt_gene`) correlates a consensus
//!   row with a laboratory's local variant table;
//! - the *transcript* scheme (`transcript_without_version:cdna`) correlates a ClinVar
//!   accession's cDNA notation with a laboratory's local variant table.
//!
//! The transcript scheme is the weaker of the two since it drops the transcript version.
//! The schemes are never compared against each other.

/// Separator of the coordinate scheme, joining fields as `chrom_start_stop_ref_alt_gene`.
/// Fields may themselves contain it (alt contigs such as `chr1_KI270706v1_random`),
/// so distinct variants can collide on the same key.
pub const COORDINATE_SEPARATOR: &str = "_";

/// Separator between transcript and cDNA change in a notation.
pub const NOTATION_SEPARATOR: char = ':';

///
/// Build the coordinate-scheme identity of a variant.
///
pub fn coordinate_key(
    chrom: &str,
    start: &str,
    stop: &str,
    ref_allele: &str,
    alt: &str,
    gene: &str,
) -> String {
    [chrom, start, stop, ref_allele, alt, gene].join(COORDINATE_SEPARATOR)
}

///
/// Build the transcript-scheme identity of a variant: everything from the first `.`
/// of `transcript` onward is dropped and the remainder joined with `cdna`.
///
/// # Arguments
/// - transcript: transcript accession, with or without version (`NM_000123.5`)
/// - cdna: cDNA change (`c.76A>T`)
pub fn transcript_key(transcript: &str, cdna: &str) -> String {
    format!("{}{}{}", strip_version(transcript), NOTATION_SEPARATOR, cdna)
}

/// Drop the version suffix of a transcript accession (`NM_000123.5` -> `NM_000123`).
pub fn strip_version(transcript: &str) -> &str {
    match transcript.split_once('.') {
        Some((accession, _)) => accession,
        None => transcript,
    }
}

///
/// Split a full notation (`NM_000123.5:c.76A>T`) at its first `:` into transcript and
/// cDNA change. Returns `None` when there is no `:` or either side is empty.
///
pub fn split_notation(notation: &str) -> Option<(&str, &str)> {
    let (transcript, cdna) = notation.trim().split_once(NOTATION_SEPARATOR)?;
    if transcript.is_empty() || cdna.is_empty() {
        return None;
    }
    Some((transcript, cdna))
}

/// Transcript-scheme identity of a full notation, `None` if it can't be split.
pub fn notation_transcript_key(notation: &str) -> Option<String> {
    split_notation(notation).map(|(transcript, cdna)| transcript_key(transcript, cdna))
}

/// A comma means several equivalent transcripts or changes were listed in one field.
pub fn is_ambiguous(field: &str) -> bool {
    field.contains(',')
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::*;

    #[rstest]
    fn test_transcript_key_ignores_version() {
        assert_eq!(
            transcript_key("NM_000123.5", "c.76A>T"),
            transcript_key("NM_000123.4", "c.76A>T")
        );
        assert_eq!(transcript_key("NM_000123.5", "c.76A>T"), "NM_000123:c.76A>T");
    }

    #[rstest]
    #[case("NM_01.1", "NM_01")]
    #[case("NM_01", "NM_01")]
    #[case("NM_01.1.2", "NM_01")]
    #[case("", "")]
    fn test_strip_version(#[case] transcript: &str, #[case] expected: &str) {
        assert_eq!(strip_version(transcript), expected);
    }

    #[rstest]
    fn test_transcript_key_is_idempotent_on_stripped_input() {
        let once = transcript_key("NM_01.1", "c.1A>T");
        let (transcript, cdna) = split_notation(&once).unwrap();
        assert_eq!(transcript_key(transcript, cdna), once);
    }

    #[rstest]
    fn test_coordinate_key() {
        assert_eq!(
            coordinate_key("chr1", "100", "100", "A", "T", "GENE1"),
            "chr1_100_100_A_T_GENE1"
        );
    }

    #[rstest]
    fn test_coordinate_key_keeps_separator_inside_fields() {
        assert_eq!(
            coordinate_key("chr1_KI270706v1_random", "100", "100", "A", "T", "GENE1"),
            "chr1_KI270706v1_random_100_100_A_T_GENE1"
        );
        assert_eq!(
            coordinate_key("1_2", "3", "3", "A", "T", "G"),
            coordinate_key("1", "2_3", "3", "A", "T", "G")
        );
    }

    #[rstest]
    fn test_split_notation_uses_first_colon() {
        assert_eq!(
            split_notation("NM_01.1:c.1A>T"),
            Some(("NM_01.1", "c.1A>T"))
        );
        assert_eq!(split_notation("NM_01.1:c.1:2"), Some(("NM_01.1", "c.1:2")));
    }

    #[rstest]
    #[case("")]
    #[case("NM_01.1")]
    #[case(":c.1A>T")]
    #[case("NM_01.1:")]
    fn test_split_notation_rejects_malformed(#[case] notation: &str) {
        assert_eq!(split_notation(notation), None);
    }

    #[rstest]
    fn test_notation_transcript_key() {
        assert_eq!(
            notation_transcript_key("NM_01.1:c.1A>T"),
            Some("NM_01:c.1A>T".to_string())
        );
    }

    #[rstest]
    fn test_is_ambiguous() {
        assert!(is_ambiguous("NM_01.1,NM_02.1"));
        assert!(!is_ambiguous("NM_01.1"));
    }
}
