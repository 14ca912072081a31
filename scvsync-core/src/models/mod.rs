pub mod assertion;
pub mod consensus;
pub mod lines;
pub mod local_variant;
pub mod mapping;
pub mod submission;

// re-export for cleaner imports
pub use self::assertion::AssertionRecord;
pub use self::consensus::{ConsensusRow, LabEntry};
pub use self::lines::{DeleteLine, DeleteReason, VariantLine};
pub use self::local_variant::LocalVariantRecord;
pub use self::mapping::{AccessionMapping, SuccessMapping, UnmappedAccession, UnmappedReason};
pub use self::submission::LabSubmission;
