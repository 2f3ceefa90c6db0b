use std::fmt::{Display, Formatter};

use serde_json::Error as SerdeError;

/// Failure of one store or controller operation.
///
/// `RemoteStore` is the single failure path for everything that crosses the
/// wire: a non-success status and a network-level failure look the same to
/// callers, and the payload is the raw response body (or the transport's own
/// message when no body arrived).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppError {
    RemoteStore(String),
    SerializationError(String),
    BadRequest(String),
    Busy(String),
}

impl Display for AppError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            AppError::RemoteStore(body) => write!(f, "Remote store error: {}", body),
            AppError::SerializationError(msg) => write!(f, "Serialization error: {}", msg),
            AppError::BadRequest(msg) => write!(f, "Bad Request: {}", msg),
            AppError::Busy(key) => write!(f, "Operation already in flight: {}", key),
        }
    }
}

impl std::error::Error for AppError {}

impl From<SerdeError> for AppError {
    fn from(err: SerdeError) -> Self {
        AppError::SerializationError(format!("JSON serialization error: {}", err))
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        AppError::RemoteStore(err.to_string())
    }
}

impl AppError {
    /// Raw diagnostic payload without the variant prefix.
    pub fn detail(&self) -> &str {
        match self {
            AppError::RemoteStore(msg)
            | AppError::SerializationError(msg)
            | AppError::BadRequest(msg)
            | AppError::Busy(msg) => msg,
        }
    }

    pub fn is_remote(&self) -> bool {
        matches!(self, AppError::RemoteStore(_))
    }
}
