//! dermscore-engine
//!
//! Template-driven scoring. Pure computation, no store access: validate and
//! sanitize raw inputs, resolve the interpretation range, render copy text.

pub mod error;
pub mod evaluate;
pub mod instruments;
pub mod interpret;
pub mod render;
pub mod validate;

pub use evaluate::{Evaluation, evaluate};
pub use instruments::{all_templates, get_template};
