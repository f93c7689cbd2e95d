//! Error types for the fallible edges of the engine

/// Errors raised when building or parsing engine values
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UrError {
    #[error("Invalid side: {0}")]
    InvalidSide(String),

    #[error("Invalid position: {0}")]
    InvalidPosition(String),

    #[error("Unknown agent: {0}")]
    UnknownAgent(String),
}
