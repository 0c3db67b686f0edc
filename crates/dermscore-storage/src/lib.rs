//! dermscore-storage
//!
//! Document-store access. A small async trait over flat, independently keyed
//! collections of JSON documents, optimistic multi-document transactions,
//! and an in-memory implementation with optional file persistence.

pub mod document;
pub mod error;
pub mod memory;
pub mod store;
pub mod transaction;

pub use document::{Direction, Filter, Precondition, Query, Snapshot, Write, WriteOp};
pub use error::StorageError;
pub use memory::MemoryStore;
pub use store::DocumentStore;
pub use transaction::Transaction;
