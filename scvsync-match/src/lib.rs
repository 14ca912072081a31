//! # Accession matching and consensus reconciliation
//!
//! The core of an scvsync run:
//!
//! 1. [index] joins every ClinVar assertion against the laboratories' local variant
//!    tables by transcript-scheme identity, giving each accession either a
//!    coordinate-scheme identity or an unmapped reason;
//! 2. [reconcile] walks the consensus table, emits one variant line per laboratory
//!    classification, attaches the matching accession where there is one, and turns
//!    every accession left over into a delete.
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::path::Path;
//!
//! use scvsync_core::config::SubmissionConfig;
//! use scvsync_match::{PipelineInputs, ReconcileOptions, run_pipeline};
//!
//! let inputs = PipelineInputs::new(
//!     Path::new("consensus.tsv"),
//!     Path::new("assertions.tsv"),
//!     Path::new("local/"),
//! );
//! let options = ReconcileOptions::new(vec!["No Consensus".to_string()]);
//! let outcome = run_pipeline(&inputs, &SubmissionConfig::default(), &options).unwrap();
//!
//! for submission in &outcome.submissions {
//!     println!("{}: {} lines", submission.short_code, submission.variants.len());
//! }
//! ```
pub mod error;
pub mod index;
pub mod pipeline;
pub mod reconcile;

pub use error::*;
pub use index::*;
pub use pipeline::*;
pub use reconcile::*;

pub mod consts {
    pub const RECONCILE_CMD: &str = "reconcile";
}
