use thiserror::Error;

/// Degenerate input or numerical failure in a statistical routine.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StatsError {
    #[error("need at least {required} observations, got {available}")]
    InsufficientData { required: usize, available: usize },

    #[error("input has zero variance")]
    ZeroVariance,

    #[error("design matrix is singular")]
    SingularDesign,

    #[error("all values are identical")]
    IdenticalValues,

    #[error("no residual degrees of freedom")]
    NoResidualDegreesOfFreedom,

    #[error("input lengths differ: {left} vs {right}")]
    LengthMismatch { left: usize, right: usize },

    #[error("invalid distribution parameters: {0}")]
    Distribution(String),
}

pub type Result<T> = std::result::Result<T, StatsError>;
