use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::sync::Mutex;
use tracing::{debug, info};
use uuid::Uuid;

use crate::document::{Direction, Query, Snapshot, Write, WriteOp, compare_values};
use crate::error::StorageError;
use crate::store::DocumentStore;

type Collections = BTreeMap<String, BTreeMap<String, StoredDocument>>;

#[derive(Debug, Clone, Serialize, Deserialize)]
struct StoredDocument {
    data: Value,
    etag: String,
}

/// In-process document store.
///
/// All operations take one lock, so a commit is atomic with respect to every
/// other read and commit. With a backing file, the full contents are
/// rewritten after each commit and reloaded by [`MemoryStore::open`].
#[derive(Debug, Default)]
pub struct MemoryStore {
    collections: Mutex<Collections>,
    path: Option<PathBuf>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a file-backed store, loading existing contents if the file exists.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, StorageError> {
        let path = path.as_ref().to_path_buf();
        let collections = match tokio::fs::read(&path).await {
            Ok(bytes) => serde_json::from_slice::<Collections>(&bytes)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Collections::new(),
            Err(e) => return Err(e.into()),
        };

        let documents: usize = collections.values().map(BTreeMap::len).sum();
        info!(path = %path.display(), documents, "opened document store");

        Ok(Self {
            collections: Mutex::new(collections),
            path: Some(path),
        })
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn get(&self, collection: &str, id: &str) -> Result<Option<Snapshot>, StorageError> {
        let collections = self.collections.lock().await;
        Ok(collections
            .get(collection)
            .and_then(|docs| docs.get(id))
            .map(|doc| snapshot(id, doc)))
    }

    async fn query(&self, collection: &str, query: &Query) -> Result<Vec<Snapshot>, StorageError> {
        query.check()?;

        let collections = self.collections.lock().await;
        let Some(docs) = collections.get(collection) else {
            return Ok(Vec::new());
        };

        let mut matched: Vec<Snapshot> = docs
            .iter()
            .filter(|(_, doc)| query.matches(&doc.data))
            .map(|(id, doc)| snapshot(id, doc))
            .collect();

        if let Some((field, direction)) = &query.order_by {
            matched.retain(|s| s.data.get(field).is_some());
            matched.sort_by(|a, b| {
                let ordering = compare_values(&a.data[field.as_str()], &b.data[field.as_str()])
                    .unwrap_or(std::cmp::Ordering::Equal);
                match direction {
                    Direction::Ascending => ordering,
                    Direction::Descending => ordering.reverse(),
                }
            });
        }

        if let Some(limit) = query.limit {
            matched.truncate(limit);
        }

        Ok(matched)
    }

    async fn commit(&self, writes: Vec<Write>) -> Result<(), StorageError> {
        let mut collections = self.collections.lock().await;

        for write in &writes {
            let current = collections
                .get(&write.collection)
                .and_then(|docs| docs.get(&write.id))
                .map(|doc| doc.etag.as_str());
            if !write.precondition.holds(current) {
                debug!(collection = %write.collection, id = %write.id, "precondition failed");
                return Err(StorageError::PreconditionFailed {
                    collection: write.collection.clone(),
                    id: write.id.clone(),
                });
            }
        }

        // Persisted stores stage on a copy so a failed write leaves memory untouched.
        let mut next = if self.path.is_some() {
            collections.clone()
        } else {
            std::mem::take(&mut *collections)
        };

        for write in writes {
            apply(&mut next, write);
        }

        if let Some(path) = &self.path {
            persist(path, &next).await?;
        }

        *collections = next;
        Ok(())
    }
}

fn snapshot(id: &str, doc: &StoredDocument) -> Snapshot {
    Snapshot {
        id: id.to_string(),
        data: doc.data.clone(),
        etag: doc.etag.clone(),
    }
}

fn apply(collections: &mut Collections, write: Write) {
    let WriteOp::Set { data, merge } = write.op else {
        return;
    };

    let docs = collections.entry(write.collection).or_default();
    let etag = Uuid::new_v4().simple().to_string();

    match docs.get_mut(&write.id) {
        Some(existing) if merge => {
            match data {
                Value::Object(updates) if existing.data.is_object() => {
                    if let Some(fields) = existing.data.as_object_mut() {
                        fields.extend(updates);
                    }
                }
                data => existing.data = data,
            }
            existing.etag = etag;
        }
        _ => {
            docs.insert(write.id, StoredDocument { data, etag });
        }
    }
}

async fn persist(path: &Path, collections: &Collections) -> Result<(), StorageError> {
    let body = serde_json::to_vec_pretty(collections)?;
    let tmp = path.with_extension("tmp");
    tokio::fs::write(&tmp, body).await?;
    tokio::fs::rename(&tmp, path).await?;
    Ok(())
}
