//! Error types for the core library.

use thiserror::Error;

use crate::relay::RelayValidationError;

/// Errors that can occur in core operations.
///
/// Scoring and screening never fail; these cover settings, the extraction
/// seam, and relay requests.
#[derive(Debug, Error)]
pub enum Error {
    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The language-model collaborator failed to answer.
    #[error("Extraction error: {0}")]
    Extraction(String),

    /// Relay request is incomplete or malformed.
    #[error("Invalid relay request: {}", join_messages(.0))]
    Relay(Vec<RelayValidationError>),
}

impl From<Vec<RelayValidationError>> for Error {
    fn from(errors: Vec<RelayValidationError>) -> Self {
        Self::Relay(errors)
    }
}

fn join_messages(errors: &[RelayValidationError]) -> String {
    errors
        .iter()
        .map(RelayValidationError::message)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;
