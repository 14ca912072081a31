//! Rendering of laboratory classifications into ClinVar vocabulary.

pub const NOT_SPECIFIED: &str = "not specified";
pub const NOT_PROVIDED: &str = "not provided";

const BENIGN: &str = "Benign";

const SYNONYMS: [(&str, &str); 5] = [
    ("VUS", "Uncertain significance"),
    ("LB", "Likely benign"),
    ("LP", "Likely pathogenic"),
    ("B", BENIGN),
    ("P", "Pathogenic"),
];

///
/// Map the short labels used in the consensus table onto ClinVar's clinical
/// significance terms. Matching is case-insensitive; anything else is returned as is.
///
pub fn render_classification(classification: &str) -> &str {
    SYNONYMS
        .iter()
        .find(|(short, _)| short.eq_ignore_ascii_case(classification))
        .map(|(_, long)| *long)
        .unwrap_or(classification)
}

/// Preferred condition name for an already rendered classification.
pub fn condition_name(rendered: &str) -> &'static str {
    if rendered == BENIGN {
        NOT_SPECIFIED
    } else {
        NOT_PROVIDED
    }
}
