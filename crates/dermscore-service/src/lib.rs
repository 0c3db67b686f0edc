//! dermscore-service
//!
//! The persistence workflows around the scoring engine: transactional
//! session/result submission, batch result export, and the daily
//! aggregation job.

pub mod aggregate;
pub mod caller;
pub mod error;
pub mod export;
pub mod submit;
pub mod templates;

pub use caller::Caller;
pub use error::ServiceError;
