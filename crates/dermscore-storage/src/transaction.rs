use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::document::{Precondition, Snapshot, Write};
use crate::error::StorageError;
use crate::store::DocumentStore;

/// An optimistic read-modify-write across documents.
///
/// Every document read through the transaction is pinned to the version
/// that was observed (or to its absence). [`commit`](Transaction::commit)
/// applies the buffered writes only if none of those documents changed in
/// the meantime; otherwise it fails with
/// [`StorageError::PreconditionFailed`] and writes nothing. There is no
/// retry: callers decide whether to resubmit.
pub struct Transaction<'a> {
    store: &'a dyn DocumentStore,
    reads: BTreeMap<(String, String), Option<String>>,
    writes: Vec<Write>,
}

impl<'a> Transaction<'a> {
    pub fn new(store: &'a dyn DocumentStore) -> Self {
        Self {
            store,
            reads: BTreeMap::new(),
            writes: Vec::new(),
        }
    }

    pub async fn get(
        &mut self,
        collection: &str,
        id: &str,
    ) -> Result<Option<Snapshot>, StorageError> {
        let snapshot = self.store.get(collection, id).await?;
        self.reads
            .entry((collection.to_string(), id.to_string()))
            .or_insert_with(|| snapshot.as_ref().map(|s| s.etag.clone()));
        Ok(snapshot)
    }

    /// Buffer a full or merging write.
    pub fn set(&mut self, collection: &str, id: &str, data: Value, merge: bool) {
        self.writes.push(Write::set(collection, id, data, merge));
    }

    /// Buffer a write that fails the commit if the document already exists.
    pub fn create<T: Serialize>(
        &mut self,
        collection: &str,
        id: &str,
        value: &T,
    ) -> Result<(), StorageError> {
        self.writes
            .push(Write::create(collection, id, serde_json::to_value(value)?));
        Ok(())
    }

    pub async fn commit(self) -> Result<(), StorageError> {
        let mut writes: Vec<Write> = self
            .reads
            .into_iter()
            .map(|((collection, id), etag)| {
                let precondition = match etag {
                    Some(etag) => Precondition::Matches(etag),
                    None => Precondition::Absent,
                };
                Write::verify(&collection, &id, precondition)
            })
            .collect();
        writes.extend(self.writes);

        debug!(writes = writes.len(), "committing transaction");
        self.store.commit(writes).await
    }
}
