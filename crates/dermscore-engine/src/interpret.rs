use serde::Serialize;
use ts_rs::TS;

use dermscore_core::models::template::InterpretationRange;

pub const UNCLASSIFIED_LABEL: &str = "Unclassified";
pub const NO_GUIDANCE: &str = "No guidance available.";

/// A severity label and the guidance text that goes with it.
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export)]
pub struct Resolution {
    pub label: String,
    pub guidance: String,
}

/// Find the first range, in declaration order, whose closed interval
/// contains `score`.
///
/// Ranges may overlap and need not be sorted. Template authors rely on
/// declaration order to break ties, so this must stay a first-match scan.
pub fn resolve(ranges: &[InterpretationRange], score: f64) -> Resolution {
    ranges
        .iter()
        .find(|r| r.min <= score && score <= r.max)
        .map(|r| Resolution {
            label: r.label.clone(),
            guidance: r.guidance.clone(),
        })
        .unwrap_or_else(|| Resolution {
            label: UNCLASSIFIED_LABEL.to_string(),
            guidance: NO_GUIDANCE.to_string(),
        })
}
