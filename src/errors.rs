use thiserror::Error;

/// Error type that captures common crate-level failures.
#[derive(Debug, Error)]
pub enum RevenueError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
