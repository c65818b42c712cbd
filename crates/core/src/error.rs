//! Error types

use thiserror::Error;

/// Errors raised at the engine boundary.
///
/// The detection, scoring and planning operations are total and never
/// return these; they come from validating caller input before it reaches
/// the engine.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid value for {field}: {message}")]
    InvalidInput { field: String, message: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    pub fn invalid_input(field: impl Into<String>, message: impl Into<String>) -> Self {
        Error::InvalidInput {
            field: field.into(),
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
