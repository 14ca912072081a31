use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Error type for assertion extraction.
#[derive(Error, Debug)]
pub enum ExtractError {
    /// The source document could not be opened.
    #[error("Can't open ClinVar release {path:?}: {source}")]
    Open { path: PathBuf, source: io::Error },

    /// The document is not well-formed XML.
    #[error("Malformed ClinVar XML near byte {position}: {message}")]
    Xml { position: u64, message: String },

    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Result type alias for extraction.
pub type Result<T> = std::result::Result<T, ExtractError>;
