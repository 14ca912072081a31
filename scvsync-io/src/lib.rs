//! # Input/Output for scvsync.
//!
//! Readers for the tab-separated inputs of a reconciliation run (flattened assertions,
//! local laboratory tables, the consensus table) and writers for the per-laboratory
//! ClinVar submission sheets. Every reader skips the header row and decompresses
//! `.gz` files transparently.
//!
pub mod classification;
pub mod error;
pub mod filter;
pub mod sheets;
pub mod tables;

// re-expose core functions
pub use classification::*;
pub use error::*;
pub use filter::*;
pub use sheets::*;
pub use tables::*;

pub mod consts {
    pub const FILTER_CMD: &str = "filter";
}
