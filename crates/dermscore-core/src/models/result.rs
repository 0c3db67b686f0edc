use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// An immutable snapshot of one scoring computation.
///
/// One is appended per submission; many may reference the same session.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ScoreResult {
    pub session_id: String,
    pub user_id: String,
    pub template_id: String,
    pub template_slug: String,
    pub template_name: String,
    #[serde(default)]
    pub score: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score_text: Option<String>,
    pub interpretation_label: String,
    pub interpretation_summary: String,
    #[serde(default)]
    pub copy_blocks: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<BTreeMap<String, serde_json::Value>>,
    /// Legacy records may lack a timestamp.
    #[serde(default)]
    pub created_at: Option<jiff::Timestamp>,
}

impl ScoreResult {
    /// The numeric score, falling back to a `score_text` that parses as a
    /// finite number.
    pub fn numeric_score(&self) -> Option<f64> {
        if let Some(score) = self.score {
            return Some(score);
        }
        self.score_text
            .as_deref()
            .and_then(|text| text.trim().parse::<f64>().ok())
            .filter(|n| n.is_finite())
    }

    /// Score as displayed to clinicians: the number, else the text, else "".
    pub fn display_score(&self) -> String {
        match (self.score, &self.score_text) {
            (Some(score), _) => score.to_string(),
            (None, Some(text)) => text.clone(),
            (None, None) => String::new(),
        }
    }
}

/// A pre-computed score as submitted by a client-side calculator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(untagged)]
#[ts(export)]
pub enum ScoreValue {
    Number(f64),
    Text(String),
}

impl ScoreValue {
    /// Split into the `(score, score_text)` pair stored on documents.
    pub fn into_parts(value: Option<ScoreValue>) -> (Option<f64>, Option<String>) {
        match value {
            Some(ScoreValue::Number(n)) => (Some(n), None),
            Some(ScoreValue::Text(t)) => (None, Some(t)),
            None => (None, None),
        }
    }
}
