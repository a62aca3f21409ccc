use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("unknown analysis method: {0}")]
    UnknownMethod(String),
    #[error("{0}")]
    Message(String),
}

pub type Result<T> = std::result::Result<T, ModelError>;
