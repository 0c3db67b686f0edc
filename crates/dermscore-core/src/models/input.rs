use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// A validated input value, canonicalized according to the input's
/// declared type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(untagged)]
#[ts(export)]
pub enum SanitizedValue {
    Number(f64),
    Boolean(bool),
    Select(String),
    Multiselect(Vec<String>),
    /// Free text is stored as submitted.
    Text(serde_json::Value),
}

/// The points one input added to the running total.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Contribution {
    pub input_id: String,
    pub label: String,
    pub points: f64,
}
