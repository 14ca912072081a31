use thiserror::Error;

use scvsync_core::{ConfigError, CoreError};
use scvsync_io::TableError;

/// Error type for matching and reconciliation.
#[derive(Error, Debug)]
pub enum MatchError {
    /// An assertion or lookup named a laboratory that is not registered.
    #[error(transparent)]
    Laboratory(#[from] CoreError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    /// An input table could not be read; no partial index is ever built.
    #[error(transparent)]
    Table(#[from] TableError),
}

/// Result type alias for scvsync-match operations.
pub type Result<T> = std::result::Result<T, MatchError>;
