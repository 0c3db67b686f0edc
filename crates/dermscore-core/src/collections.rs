//! Document-store collection names and id conventions.
//!
//! Pure string functions. These define the canonical layout of documents
//! in the backing store.

use jiff::civil::Date;

pub const TEMPLATES: &str = "templates";

pub const SESSIONS: &str = "sessions";

pub const RESULTS: &str = "results";

pub const AGGREGATES: &str = "aggregates";

/// Document id for a template version, e.g. `dlqi@1.0.0`.
pub fn template_id(slug: &str, version: &str) -> String {
    format!("{slug}@{version}")
}

/// Document id for one template's daily rollup, e.g. `dlqi@1.0.0_2024-03-01`.
pub fn aggregate_id(template_id: &str, period_start: Date) -> String {
    format!("{template_id}_{period_start}")
}

/// Field names used in store queries.
pub mod field {
    pub const SLUG: &str = "slug";
    pub const UPDATED_AT: &str = "updatedAt";
    pub const CREATED_AT: &str = "createdAt";
    pub const SESSION_ID: &str = "sessionId";
}
