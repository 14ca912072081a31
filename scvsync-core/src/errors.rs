use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("No such laboratory: {0}")]
    UnknownLaboratory(String),

    #[error("Laboratory registered twice: {0}")]
    DuplicateLaboratory(String),

    #[error("The laboratory registry is empty")]
    EmptyRegistry,

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, CoreError>;
