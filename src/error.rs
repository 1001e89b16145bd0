//! Error handling
//!
//! One crate-level error enum. Validator failures are deliberately NOT here:
//! the fusion path models them as `ValidatorOutcome::Unavailable` instead of
//! propagating an error.

use std::fmt;

pub type EngineResult<T> = std::result::Result<T, EngineError>;

#[derive(Debug)]
pub enum EngineError {
    /// Neither a model artifact nor a training dataset exists
    ModelUnavailable(String),

    /// Model artifact could not be read or parsed
    Artifact(String),

    /// Training dataset could not be opened
    Dataset(String),

    /// Underlying filesystem error
    Io(std::io::Error),
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineError::ModelUnavailable(msg) => write!(f, "no usable classifier: {}", msg),
            EngineError::Artifact(msg) => write!(f, "model artifact error: {}", msg),
            EngineError::Dataset(msg) => write!(f, "dataset error: {}", msg),
            EngineError::Io(e) => write!(f, "io error: {}", e),
        }
    }
}

impl std::error::Error for EngineError {}

impl From<std::io::Error> for EngineError {
    fn from(e: std::io::Error) -> Self {
        EngineError::Io(e)
    }
}
