//! # scvsync-core
//!
//! Shared building blocks for reconciling laboratory variant classifications with
//! the public submission records held by ClinVar.
//!
//! This crate has no file formats of its own beyond the optional TOML config. It holds:
//!
//! - the record types that flow through the pipeline ([models])
//! - the two identity schemes used to decide that two records describe the same
//!   variant ([identity])
//! - the set of participating laboratories ([labs]) and the column offsets of the
//!   tab-separated inputs ([layout])
//!
//! ## Example
//!
//! ```rust
//! use scvsync_core::identity::{coordinate_key, transcript_key};
//!
//! assert_eq!(
//!     transcript_key("NM_000123.5", "c.76A>T"),
//!     transcript_key("NM_000123.4", "c.76A>T"),
//! );
//! assert_eq!(coordinate_key("1", "100", "100", "A", "T", "GENE1"), "1_100_100_A_T_GENE1");
//! ```
pub mod config;
pub mod errors;
pub mod identity;
pub mod labs;
pub mod layout;
pub mod models;
pub mod utils;

// re-exports
pub use config::*;
pub use errors::*;
pub use labs::*;
pub use layout::*;
pub use models::*;

pub mod consts {
    /// Study name that marks an assertion as part of the consortium's shared submission.
    pub const SHARED_SUBMISSION_STUDY: &str = "VKGL Data-share Consensus";
    /// Field separator of every table read or written.
    pub const TSV_DELIMITER: &str = "\t";
}
