//! dermscore-export
//!
//! Clinician-facing text and CSV renderings of stored results.

pub mod csv;
pub mod error;
pub mod render;

pub use csv::render_csv;
pub use render::render_text;
