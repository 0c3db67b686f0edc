#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use serde_json::{Value, json};

use dermscore_core::collections::TEMPLATES;
use dermscore_core::models::template::Template;
use dermscore_storage::{DocumentStore, MemoryStore, Query, Snapshot, StorageError, Write};

/// A one-input template: age 0..=120, minor below 18, adult from 18.
pub fn age_template() -> Template {
    serde_json::from_value(json!({
        "name": "Age band",
        "slug": "age-band",
        "category": "general",
        "version": "1",
        "description": "Adult or minor",
        "inputs": [
            { "id": "age", "label": "Age", "type": "number", "required": true,
              "min": 0, "max": 120, "weight": 1 }
        ],
        "interpretation": {
            "ranges": [
                { "min": 0, "max": 17, "label": "minor", "guidance": "Paediatric pathway." },
                { "min": 18, "max": 120, "label": "adult", "guidance": "Adult pathway." }
            ]
        },
        "copyBlocks": [
            { "label": "Note", "bodyTemplate": "Age {{score}} ({{interpretationLabel}})" }
        ],
        "updatedAt": "2024-01-01T00:00:00Z"
    }))
    .unwrap()
}

pub async fn store_with(templates: &[(&str, Template)]) -> MemoryStore {
    let store = MemoryStore::new();
    let writes = templates
        .iter()
        .map(|(id, t)| Write::set(TEMPLATES, id, serde_json::to_value(t).unwrap(), false))
        .collect();
    store.commit(writes).await.unwrap();
    store
}

pub async fn count(store: &dyn DocumentStore, collection: &str) -> usize {
    store.query(collection, &Query::new()).await.unwrap().len()
}

pub fn inputs(value: Value) -> serde_json::Map<String, Value> {
    value.as_object().cloned().unwrap()
}

/// Wraps a store and counts `query` calls.
#[derive(Default)]
pub struct CountingStore {
    pub inner: MemoryStore,
    pub queries: AtomicUsize,
}

impl CountingStore {
    pub fn queries(&self) -> usize {
        self.queries.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DocumentStore for CountingStore {
    async fn get(&self, collection: &str, id: &str) -> Result<Option<Snapshot>, StorageError> {
        self.inner.get(collection, id).await
    }

    async fn query(&self, collection: &str, query: &Query) -> Result<Vec<Snapshot>, StorageError> {
        self.queries.fetch_add(1, Ordering::SeqCst);
        self.inner.query(collection, query).await
    }

    async fn commit(&self, writes: Vec<Write>) -> Result<(), StorageError> {
        self.inner.commit(writes).await
    }
}
