use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("precondition failed for document: {collection}/{id}")]
    PreconditionFailed { collection: String, id: String },

    #[error("invalid query: {0}")]
    InvalidQuery(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("persistence error: {0}")]
    Io(#[from] std::io::Error),
}
