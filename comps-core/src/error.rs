//! Error types for the terminal

use thiserror::Error;

/// Terminal-wide error type
#[derive(Error, Debug)]
pub enum CompsError {
    #[error("Dataset error: {0}")]
    Dataset(String),

    #[error("Embedding error during batch {batch}: {message}")]
    Embedding { batch: usize, message: String },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CompsError {
    pub fn dataset(msg: impl Into<String>) -> Self {
        CompsError::Dataset(msg.into())
    }

    pub fn embedding(batch: usize, message: impl Into<String>) -> Self {
        CompsError::Embedding {
            batch,
            message: message.into(),
        }
    }

    pub fn network(msg: impl Into<String>) -> Self {
        CompsError::Network(msg.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        CompsError::Config(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        CompsError::Internal(msg.into())
    }
}

/// Result type alias for terminal operations
pub type CompsResult<T> = Result<T, CompsError>;
