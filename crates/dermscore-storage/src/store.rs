use async_trait::async_trait;

use crate::document::{Query, Snapshot, Write};
use crate::error::StorageError;

/// A store of flat JSON document collections.
///
/// Implementations guarantee atomic single-document reads and an
/// all-or-nothing [`commit`](DocumentStore::commit) across documents.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Read one document. `Ok(None)` if it does not exist.
    async fn get(&self, collection: &str, id: &str) -> Result<Option<Snapshot>, StorageError>;

    /// Return every document in `collection` matching all of the query's
    /// filters.
    async fn query(&self, collection: &str, query: &Query) -> Result<Vec<Snapshot>, StorageError>;

    /// Apply `writes` atomically. If any precondition fails, nothing is
    /// written and [`StorageError::PreconditionFailed`] names the first
    /// offending document.
    async fn commit(&self, writes: Vec<Write>) -> Result<(), StorageError>;
}
