use std::collections::BTreeMap;

use serde::Serialize;
use ts_rs::TS;

use dermscore_core::models::input::{Contribution, SanitizedValue};
use dermscore_core::models::template::Template;

use crate::error::ValidationError;
use crate::interpret;
use crate::render::{self, TemplateValues};
use crate::validate::{self, RawInputs};

/// Everything computed for one submission, before it is persisted.
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Evaluation {
    pub inputs: BTreeMap<String, SanitizedValue>,
    pub score: f64,
    pub contributions: Vec<Contribution>,
    pub interpretation_label: String,
    pub interpretation_summary: String,
    pub copy_blocks: Vec<String>,
}

/// Validate, score, interpret and render one submission.
///
/// The summary template sees `score`, `interpretationLabel` and `guidance`;
/// a blank summary template yields the range guidance verbatim. Copy blocks
/// see `score`, `interpretationLabel` and `interpretationSummary`.
pub fn evaluate(template: &Template, raw: &RawInputs) -> Result<Evaluation, ValidationError> {
    let validated = validate::validate(template, raw)?;
    let score = validated.total_score;
    let resolution = interpret::resolve(&template.interpretation.ranges, score);

    let summary_template = &template.interpretation.summary_template;
    let interpretation_summary = if summary_template.trim().is_empty() {
        resolution.guidance.clone()
    } else {
        let mut values = TemplateValues::new();
        values.insert("score".to_string(), score.into());
        values.insert("interpretationLabel".to_string(), resolution.label.clone().into());
        values.insert("guidance".to_string(), resolution.guidance.clone().into());
        render::render(summary_template, &values)
    };

    let mut values = TemplateValues::new();
    values.insert("score".to_string(), score.into());
    values.insert("interpretationLabel".to_string(), resolution.label.clone().into());
    values.insert(
        "interpretationSummary".to_string(),
        interpretation_summary.clone().into(),
    );

    let copy_blocks = template
        .copy_blocks
        .iter()
        .map(|block| render::render(&block.body_template, &values))
        .collect();

    Ok(Evaluation {
        inputs: validated.inputs,
        score,
        contributions: validated.contributions,
        interpretation_label: resolution.label,
        interpretation_summary,
        copy_blocks,
    })
}
