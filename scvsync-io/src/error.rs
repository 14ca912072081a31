use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Error type for scvsync-io operations.
#[derive(Error, Debug)]
pub enum TableError {
    /// An input table could not be opened.
    #[error("Can't open {path:?}: {source}")]
    Open { path: PathBuf, source: io::Error },

    /// Reading an opened table failed part way.
    #[error("Failed reading {path:?}: {source}")]
    Read { path: PathBuf, source: io::Error },

    /// A submission sheet could not be written.
    #[error("Failed writing {path:?}: {source}")]
    Write { path: PathBuf, source: io::Error },
}

/// Result type alias for scvsync-io operations.
pub type Result<T> = std::result::Result<T, TableError>;
