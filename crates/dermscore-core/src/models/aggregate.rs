use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Daily rollup of results for one template. Recomputing the same
/// `(template_id, period_start)` overwrites the prior snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct AggregateSnapshot {
    pub template_id: String,
    pub period_start: jiff::civil::Date,
    pub count: u64,
    pub numeric_count: u64,
    pub average_score: Option<f64>,
    pub min_score: Option<f64>,
    pub max_score: Option<f64>,
    #[serde(default)]
    pub updated_at: Option<jiff::Timestamp>,
}
