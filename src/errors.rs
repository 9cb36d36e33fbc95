use std::path::PathBuf;

use thiserror::Error;

use crate::vocabulary::Class;

/// The model cannot produce meaningful scores.
///
/// Raised when a class has no word occurrences left after the minimum
/// frequency filter, which would leave priors and likelihoods undefined.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DegenerateModelError {
    #[error("no {0} words meet the minimum word frequency")]
    EmptyClass(Class),
    #[error("model has no words that meet the minimum word frequency")]
    EmptyModel,
}

#[derive(Error, Debug)]
pub enum DocumentReadError {
    #[error("cannot read document {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl DocumentReadError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        DocumentReadError::Io {
            path: path.into(),
            source,
        }
    }
}

/// Failure of a whole directory evaluation.
#[derive(Error, Debug)]
pub enum EvaluationError {
    #[error(transparent)]
    DegenerateModel(#[from] DegenerateModelError),
    #[error(transparent)]
    Source(#[from] DocumentReadError),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("cannot read config from file: {0}")]
    ReadFile(#[from] std::io::Error),
    #[error("malformed config file: {0}")]
    Deserialize(#[from] serde_json::Error),
}
