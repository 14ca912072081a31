//! Re-exports of the scvsync crates, each behind a feature of the same name
//! (`matching` for `scvsync-match`).
#[cfg(feature = "core")]
#[doc(inline)]
pub use scvsync_core as core;

#[cfg(feature = "extract")]
#[doc(inline)]
pub use scvsync_extract as extract;

#[cfg(feature = "io")]
#[doc(inline)]
pub use scvsync_io as io;

#[cfg(feature = "matching")]
#[doc(inline)]
pub use scvsync_match as matching;
