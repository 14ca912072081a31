//! # Assertion extraction
//!
//! Streams a ClinVar XML release (`ReleaseSet` of `ClinVarSet`s) and yields one flat
//! [AssertionRecord](scvsync_core::models::AssertionRecord) per submitted assertion
//! that belongs to the consortium's shared submission. Parsing is permissive: a
//! missing classification, gene or HGVS attribute yields an empty field, and only
//! assertions without an accession or submitter are dropped.
//!
//! ```no_run
//! use std::path::Path;
//! use scvsync_extract::AssertionExtractor;
//!
//! let extractor = AssertionExtractor::from_path(Path::new("ClinVarFullRelease.xml.gz")).unwrap();
//! for record in extractor {
//!     println!("{}", record.unwrap());
//! }
//! ```
pub mod error;
pub mod extractor;

pub use error::*;
pub use extractor::*;

pub mod consts {
    pub const EXTRACT_CMD: &str = "extract";
}
