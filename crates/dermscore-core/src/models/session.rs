use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// The mutable record of one clinical encounter with a template.
///
/// `user_id` is fixed when the session is created. Later submissions
/// overwrite the scoring fields and `updated_at` only.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Session {
    pub user_id: String,
    pub template_id: String,
    pub template_slug: String,
    pub template_name: String,
    pub status: SessionStatus,
    #[serde(default)]
    pub patient_ref: Option<String>,
    #[serde(default)]
    pub inputs: BTreeMap<String, serde_json::Value>,
    #[serde(default)]
    pub score: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score_text: Option<String>,
    pub interpretation_label: String,
    pub interpretation_summary: String,
    #[serde(default)]
    pub created_at: Option<jiff::Timestamp>,
    #[serde(default)]
    pub updated_at: Option<jiff::Timestamp>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum SessionStatus {
    Draft,
    Submitted,
}
