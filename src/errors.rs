use serde::Serialize;

use crate::store::StoreError;

/// Errors surfaced by the service layer. Storage parse failures never reach
/// this level; the store recovers them by substituting defaults.
#[derive(Debug, thiserror::Error, Serialize)]
pub enum ServiceError {
    #[error("Storage error: {0}")]
    Storage(
        #[from]
        #[serde(skip)]
        StoreError,
    ),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Event error: {0}")]
    Event(String),
}

impl From<validator::ValidationErrors> for ServiceError {
    fn from(errors: validator::ValidationErrors) -> Self {
        ServiceError::Validation(errors.to_string())
    }
}

impl ServiceError {
    /// Whether the error means the target record does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, ServiceError::NotFound(_))
    }
}
