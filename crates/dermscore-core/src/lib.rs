//! dermscore-core
//!
//! Pure domain types and document-store key conventions.
//! No I/O here; this is the shared vocabulary of the dermscore system.

pub mod collections;
pub mod error;
pub mod models;
