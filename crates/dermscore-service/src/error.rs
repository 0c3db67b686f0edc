use thiserror::Error;

use dermscore_engine::error::ValidationError;
use dermscore_export::error::ExportError;
use dermscore_storage::StorageError;

/// Failure kinds surfaced to callers. The message of every domain kind is
/// part of the response contract.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Authentication required")]
    Unauthenticated,

    #[error("{0}")]
    InvalidArgument(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    PermissionDenied(String),

    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("export error: {0}")]
    Export(#[from] ExportError),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("time error: {0}")]
    Time(#[from] jiff::Error),
}

impl ServiceError {
    /// Stable wire code for the error kind.
    pub fn code(&self) -> &'static str {
        match self {
            ServiceError::Unauthenticated => "unauthenticated",
            ServiceError::InvalidArgument(_) => "invalid-argument",
            ServiceError::NotFound(_) => "not-found",
            ServiceError::PermissionDenied(_) => "permission-denied",
            ServiceError::Storage(_)
            | ServiceError::Export(_)
            | ServiceError::Serialization(_)
            | ServiceError::Time(_) => "internal",
        }
    }
}

impl From<ValidationError> for ServiceError {
    fn from(e: ValidationError) -> Self {
        ServiceError::InvalidArgument(e.message)
    }
}
