use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum CalcError {
    #[error("Not a number: {input:?}")]
    NotANumber { input: String },

    #[error("Unknown field: {field}")]
    UnknownField { field: String },

    #[error("Invalid input: {field} — {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for CalcError {
    fn from(e: serde_json::Error) -> Self {
        CalcError::SerializationError(e.to_string())
    }
}
