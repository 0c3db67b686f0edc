//! Built-in templates shipped with the service and seeded into the store.

pub mod braden;
pub mod dlqi;
pub mod scorten;

use std::sync::LazyLock;

use dermscore_core::models::template::{
    CopyBlock, InputDefinition, InputOption, InputType, InterpretationRange, Template,
};

static CATALOG: LazyLock<Vec<Template>> =
    LazyLock::new(|| vec![dlqi::template(), braden::template(), scorten::template()]);

/// Return all built-in templates.
pub fn all_templates() -> &'static [Template] {
    &CATALOG
}

/// Look up a built-in template by slug.
pub fn get_template(slug: &str) -> Option<&'static Template> {
    CATALOG.iter().find(|t| t.slug == slug)
}

fn select(id: &str, label: &str, options: &[(&str, &str, f64)]) -> InputDefinition {
    InputDefinition {
        id: id.to_string(),
        label: label.to_string(),
        input_type: InputType::Select,
        required: true,
        options: options
            .iter()
            .map(|(value, label, score)| InputOption {
                value: value.to_string(),
                label: label.to_string(),
                score: Some(*score),
            })
            .collect(),
        min: None,
        max: None,
        step: None,
        weight: None,
    }
}

fn flag(id: &str, label: &str) -> InputDefinition {
    InputDefinition {
        id: id.to_string(),
        label: label.to_string(),
        input_type: InputType::Boolean,
        required: false,
        options: vec![],
        min: None,
        max: None,
        step: None,
        weight: Some(1.0),
    }
}

fn range(min: f64, max: f64, label: &str, guidance: &str) -> InterpretationRange {
    InterpretationRange {
        min,
        max,
        label: label.to_string(),
        guidance: guidance.to_string(),
    }
}

fn copy(label: &str, body: &str) -> CopyBlock {
    CopyBlock {
        label: label.to_string(),
        body_template: body.to_string(),
    }
}
