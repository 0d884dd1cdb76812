use serde_json::{json, Value};
use thiserror::Error;

use crate::runtime::contract::ValidationError;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("environment variable {0} must be configured")]
    MissingVariable(&'static str),
}

/// Failure of a single lookup, split so callers can tell a bad request from
/// an unavailable store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HandlerError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("{operation} against table {table} failed: {message}")]
    Store {
        table: String,
        operation: &'static str,
        message: String,
    },
}

impl HandlerError {
    pub fn status_code(&self) -> u16 {
        match self {
            HandlerError::Validation(_) => 400,
            HandlerError::Store { .. } => 502,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            HandlerError::Validation(_) => "validation_error",
            HandlerError::Store { .. } => "store_error",
        }
    }

    pub fn to_body(&self) -> Value {
        json!({
            "error": self.error_code(),
            "message": self.to_string(),
        })
    }
}
