use hipp_model::SourceKind;
use thiserror::Error;

/// Errors raised while building or querying the analysis frame.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A mandatory source is absent; no analysis frame can be built.
    #[error("mandatory {kind} source is not available")]
    MissingSource { kind: SourceKind },

    /// A source lacks the column it is joined on.
    #[error("{kind} source has no '{column}' column")]
    MissingKeyColumn { kind: SourceKind, column: String },

    /// Failed DataFrame operation.
    #[error("DataFrame operation failed: {message}")]
    DataFrame { message: String },
}

impl CoreError {
    pub fn is_missing_source(&self) -> bool {
        matches!(self, Self::MissingSource { .. })
    }
}

impl From<polars::prelude::PolarsError> for CoreError {
    fn from(err: polars::prelude::PolarsError) -> Self {
        Self::DataFrame {
            message: err.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, CoreError>;
