use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum PopulationError {
    #[error("a site named {0:?} already exists")]
    DuplicateName(String),

    #[error("no site named {0:?}")]
    UnknownSite(String),

    #[error("invalid site {name:?}: {reason}")]
    InvalidSite { name: String, reason: String },
}

pub type PopulationResult<T> = Result<T, PopulationError>;
